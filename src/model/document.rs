//! RailML document types produced by the document builder.
//!
//! Field names and nesting follow the JSON layout consumed by downstream
//! RailML tooling, hence the camelCase renames.

use super::Point;
use crate::config::CanvasDimensions;
use crate::geometry::{Bounds, GeoCoordinate};
use crate::stats::ExportStatistics;
use crate::validation::{ExportAssessment, ValidationResult};
use serde::Serialize;

/// Top-level exported document (`{ "railml": { ... } }`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RailmlDocument {
    pub railml: Railml,
}

/// The `railml` root element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Railml {
    pub version: String,
    pub xmlns: String,
    pub created: String,
    pub creator: String,
    pub infrastructure: Infrastructure,
    pub metadata: Metadata,
}

/// Infrastructure section: tracks, components, topology and geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Infrastructure {
    pub id: String,
    pub name: String,
    pub tracks: Vec<ConvertedTrack>,
    pub functional_infrastructure: Vec<ConvertedComponent>,
    pub topology: Topology,
    pub geometry: GeometryInfo,
}

/// A track with derived length and paired coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedTrack {
    pub id: String,
    pub name: String,
    /// Polyline length in pixels, rounded to two decimals.
    pub length: f64,
    pub geometry: LineGeometry,
    pub visual_properties: VisualProperties,
    pub created_at: String,
}

/// GeoJSON-style line geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineGeometry {
    pub coordinates: Vec<[f64; 2]>,
    #[serde(rename = "type")]
    pub geometry_type: String,
}

/// Stroke settings carried over from the editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualProperties {
    pub color: String,
    pub stroke_width: f64,
}

/// A component with a derived geographic coordinate and shaped properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedComponent {
    pub id: String,
    /// Omitted when the editor gave no type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    pub name: String,
    pub position: ComponentPosition,
    pub rotation: f64,
    pub properties: ComponentProperties,
    pub created_at: String,
}

/// Pixel position plus its projected geographic coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentPosition {
    pub x: f64,
    pub y: f64,
    pub coordinate: GeoCoordinate,
}

/// Properties common to every component plus the type-specific details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentProperties {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    pub name: String,
    pub id: String,
    #[serde(flatten)]
    pub details: Option<PropertyDetails>,
}

/// Type-specific component properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyDetails {
    #[serde(rename_all = "camelCase")]
    Signal {
        aspect: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        signal_number: Option<String>,
        signal_type: String,
    },
    #[serde(rename_all = "camelCase")]
    Switch { state: String, switch_type: String },
    #[serde(rename_all = "camelCase")]
    Station {
        station_type: String,
        platforms: serde_json::Value,
    },
    Platform { length: f64, height: f64 },
}

/// Network topology derived from track endpoints and components.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Topology {
    pub nodes: Vec<TopologyNode>,
    pub edges: Vec<TopologyEdge>,
    /// Component-to-track adjacency. Not computed; always empty.
    pub connections: Vec<serde_json::Value>,
}

/// Kind of topology node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeType {
    TrackEnd,
    Component,
}

/// A topology node: a track endpoint or a component position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyNode {
    pub id: String,
    pub position: Point,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
}

/// A topology edge, one per track.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyEdge {
    pub id: String,
    pub track_id: String,
    #[serde(rename = "type")]
    pub edge_type: String,
    pub length: f64,
}

/// Coordinate system and extent of the drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryInfo {
    pub coordinate_system: String,
    pub bounds: Bounds,
    pub scale: f64,
    pub unit: String,
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub export_info: ExportInfo,
    pub statistics: ExportStatistics,
    pub validation: ExportAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_result: Option<ValidationResult>,
}

/// Information about the export run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportInfo {
    pub version: String,
    pub timestamp: String,
    pub canvas_dimensions: CanvasDimensions,
    pub total_tracks: usize,
    pub total_components: usize,
}
