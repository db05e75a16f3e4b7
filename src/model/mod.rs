//! Data model types for scenes and exported RailML documents.

mod component;
mod document;
mod point;
mod scene;
mod track;

pub use component::{Component, ComponentKind};
pub use document::{
    ComponentPosition, ComponentProperties, ConvertedComponent, ConvertedTrack, ExportInfo,
    GeometryInfo, Infrastructure, LineGeometry, Metadata, NodeType, PropertyDetails, Railml,
    RailmlDocument, Topology, TopologyEdge, TopologyNode, VisualProperties,
};
pub use point::Point;
pub use scene::Scene;
pub use track::Track;
