//! Aggregate statistics over tracks and components.

use crate::config::UNTYPED_COMPONENT;
use crate::model::{Component, ConvertedTrack, Scene};
use indexmap::IndexMap;
use serde::Serialize;

/// Length statistics over converted tracks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackStatistics {
    pub total_tracks: usize,
    pub total_length: f64,
    pub average_length: f64,
    pub shortest_track: f64,
    pub longest_track: f64,
}

/// Component counts by type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentStatistics {
    pub total_components: usize,
    /// Counts in first-seen order.
    pub by_type: IndexMap<String, usize>,
    /// `"none"` when there are no components.
    pub most_common_type: String,
}

/// Track and component statistics, flattened into one JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportStatistics {
    #[serde(flatten)]
    pub tracks: TrackStatistics,
    #[serde(flatten)]
    pub components: ComponentStatistics,
}

/// Summary figures for the plain-text design export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignStatistics {
    pub total_tracks: usize,
    /// Sum of rounded track lengths.
    pub total_length: f64,
    pub total_components: usize,
    /// Counts keyed by pluralized type (`signals`, `switches`, ...).
    pub components_by_type: IndexMap<String, usize>,
    pub average_track_length: f64,
}

/// Compute length statistics. An empty slice gives all zeros.
pub fn calculate_track_statistics(tracks: &[ConvertedTrack]) -> TrackStatistics {
    if tracks.is_empty() {
        return TrackStatistics::default();
    }

    let lengths = tracks.iter().map(|t| t.length);
    let total_length: f64 = lengths.clone().sum();

    TrackStatistics {
        total_tracks: tracks.len(),
        total_length,
        average_length: total_length / tracks.len() as f64,
        shortest_track: lengths.clone().fold(f64::INFINITY, f64::min),
        longest_track: lengths.fold(f64::NEG_INFINITY, f64::max),
    }
}

/// Count components per type.
///
/// Ties for the most common type go to the type encountered first.
pub fn calculate_component_statistics(components: &[Component]) -> ComponentStatistics {
    let mut by_type: IndexMap<String, usize> = IndexMap::new();
    for component in components {
        let type_name = component.type_name().unwrap_or(UNTYPED_COMPONENT);
        *by_type.entry(type_name.to_string()).or_insert(0) += 1;
    }

    let mut most_common: Option<(&String, usize)> = None;
    for (type_name, &count) in &by_type {
        if most_common.map_or(true, |(_, best)| count > best) {
            most_common = Some((type_name, count));
        }
    }
    let most_common_type = most_common
        .map(|(t, _)| t.clone())
        .unwrap_or_else(|| "none".to_string());

    ComponentStatistics {
        total_components: components.len(),
        by_type,
        most_common_type,
    }
}

/// Compute both statistics blocks for the document metadata.
pub fn calculate_export_statistics(
    tracks: &[ConvertedTrack],
    components: &[Component],
) -> ExportStatistics {
    ExportStatistics {
        tracks: calculate_track_statistics(tracks),
        components: calculate_component_statistics(components),
    }
}

/// Compute the summary figures shown in the plain-text export.
pub fn design_statistics(scene: &Scene) -> DesignStatistics {
    let total_length: f64 = scene.tracks.iter().map(|t| t.length()).sum();

    let mut components_by_type: IndexMap<String, usize> = IndexMap::new();
    for component in &scene.components {
        *components_by_type
            .entry(pluralize(component.type_name().unwrap_or(UNTYPED_COMPONENT)))
            .or_insert(0) += 1;
    }

    let average_track_length = if scene.tracks.is_empty() {
        0.0
    } else {
        total_length / scene.tracks.len() as f64
    };

    DesignStatistics {
        total_tracks: scene.tracks.len(),
        total_length,
        total_components: scene.components.len(),
        components_by_type,
        average_track_length,
    }
}

fn pluralize(type_name: &str) -> String {
    if type_name.ends_with("ch") || type_name.ends_with("sh") || type_name.ends_with('s') {
        format!("{}es", type_name)
    } else {
        format!("{}s", type_name)
    }
}
