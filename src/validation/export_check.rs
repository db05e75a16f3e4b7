//! Advisory quality checks over a scene before export.

use crate::config::{ISOLATION_DISTANCE, SHORT_TRACK_THRESHOLD};
use crate::model::Scene;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Overall export quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Good,
    NeedsAttention,
}

/// Issues and suggestions found before export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportAssessment {
    /// Problems that make the export questionable.
    pub issues: Vec<String>,
    /// Improvements worth considering.
    pub suggestions: Vec<String>,
    /// `Good` iff there are no issues.
    pub quality: Quality,
}

impl ExportAssessment {
    /// Log issues as warnings and suggestions as info.
    pub fn log(&self) {
        for issue in &self.issues {
            warn!("{}", issue);
        }
        for suggestion in &self.suggestions {
            info!("Suggestion: {}", suggestion);
        }
    }
}

/// Check a scene for empty designs, very short tracks and isolated components.
pub fn validate_export_data(scene: &Scene) -> ExportAssessment {
    let mut issues = Vec::new();
    let mut suggestions = Vec::new();

    if scene.tracks.is_empty() {
        issues.push("No tracks found in design".to_string());
    }

    if scene.components.is_empty() {
        suggestions.push("Consider adding railway components (signals, switches, etc.)".to_string());
    }

    let short_tracks = scene
        .tracks
        .iter()
        .filter(|t| t.length() < SHORT_TRACK_THRESHOLD)
        .count();
    if short_tracks > 0 {
        suggestions.push(format!(
            "{} track(s) are very short (< 10 pixels)",
            short_tracks
        ));
    }

    let isolated = scene
        .components
        .iter()
        .filter(|c| {
            scene
                .find_nearest_track_point(c.position.x, c.position.y, ISOLATION_DISTANCE)
                .is_none()
        })
        .count();
    if isolated > 0 {
        suggestions.push(format!("{} component(s) are not near any tracks", isolated));
    }

    let quality = if issues.is_empty() {
        Quality::Good
    } else {
        Quality::NeedsAttention
    };

    debug!(
        "Export assessment: {} issue(s), {} suggestion(s)",
        issues.len(),
        suggestions.len()
    );

    ExportAssessment {
        issues,
        suggestions,
        quality,
    }
}
