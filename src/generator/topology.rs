//! Topology and geometry sections of the RailML document.

use crate::config::CanvasDimensions;
use crate::geometry::Bounds;
use crate::model::{GeometryInfo, NodeType, Scene, Topology, TopologyEdge, TopologyNode};

/// Build nodes, edges and connections from a scene.
///
/// Nodes are numbered sequentially: two `trackEnd` nodes per non-degenerate
/// track, in track order, followed by one `component` node per component.
/// Every track yields one edge. Connections between components and tracks
/// are not analysed and stay empty.
pub fn generate_topology(scene: &Scene) -> Topology {
    Topology {
        nodes: generate_topology_nodes(scene),
        edges: generate_topology_edges(scene),
        connections: Vec::new(),
    }
}

fn generate_topology_nodes(scene: &Scene) -> Vec<TopologyNode> {
    let mut nodes = Vec::with_capacity(scene.tracks.len() * 2 + scene.components.len());
    let mut next_id = 0usize;
    let mut node_id = || {
        let id = format!("node_{}", next_id);
        next_id += 1;
        id
    };

    for track in &scene.tracks {
        if track.is_degenerate() {
            continue;
        }
        if let (Some(start), Some(end)) = (track.start(), track.end()) {
            for position in [start, end] {
                nodes.push(TopologyNode {
                    id: node_id(),
                    position,
                    node_type: NodeType::TrackEnd,
                    component_id: None,
                    component_type: None,
                });
            }
        }
    }

    for component in &scene.components {
        nodes.push(TopologyNode {
            id: node_id(),
            position: component.position,
            node_type: NodeType::Component,
            component_id: Some(component.id.clone()),
            component_type: component.type_name().map(str::to_string),
        });
    }

    nodes
}

fn generate_topology_edges(scene: &Scene) -> Vec<TopologyEdge> {
    scene
        .tracks
        .iter()
        .enumerate()
        .map(|(index, track)| TopologyEdge {
            id: format!("edge_track_{}", index),
            track_id: track.id.clone(),
            edge_type: "track".to_string(),
            length: track.length(),
        })
        .collect()
}

/// Describe the pixel coordinate system of the canvas.
pub fn generate_geometry(canvas: &CanvasDimensions) -> GeometryInfo {
    GeometryInfo {
        coordinate_system: "pixel".to_string(),
        bounds: Bounds::from_size(canvas.width, canvas.height),
        scale: 1.0,
        unit: "px".to_string(),
    }
}
