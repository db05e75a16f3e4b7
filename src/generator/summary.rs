//! Plain-text design summary, for consumers without a rich export format.

use crate::config::{CanvasDimensions, DEFAULT_TRACK_COLOR, UNTYPED_COMPONENT};
use crate::model::Scene;
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Render tracks and components of a scene as a plain-text listing.
pub fn generate_text_summary(
    scene: &Scene,
    canvas: &CanvasDimensions,
    at: DateTime<Utc>,
) -> String {
    let mut output = String::new();

    writeln!(output, "RAILWAY DESIGN EXPORT").unwrap();
    writeln!(output, "{}", "=".repeat(50)).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Export Date: {}", at.format("%Y-%m-%d %H:%M:%S UTC")).unwrap();
    writeln!(output, "Canvas Size: {}×{}", canvas.width, canvas.height).unwrap();
    writeln!(output).unwrap();

    writeln!(output, "TRACKS ({}):", scene.tracks.len()).unwrap();
    writeln!(output, "{}", "-".repeat(30)).unwrap();
    for (index, track) in scene.tracks.iter().enumerate() {
        let color = if track.color.is_empty() {
            DEFAULT_TRACK_COLOR
        } else {
            track.color.as_str()
        };
        writeln!(output, "Track {}:", index + 1).unwrap();
        writeln!(output, "  ID: {}", track.id).unwrap();
        writeln!(output, "  Color: {}", color).unwrap();
        writeln!(output, "  Length: {:.2} px", track.length()).unwrap();
        writeln!(output, "  Points: {}", track.point_count()).unwrap();
        writeln!(output).unwrap();
    }

    writeln!(output, "COMPONENTS ({}):", scene.components.len()).unwrap();
    writeln!(output, "{}", "-".repeat(30)).unwrap();
    for (index, component) in scene.components.iter().enumerate() {
        let name = if component.name.is_empty() {
            "Unnamed"
        } else {
            component.name.as_str()
        };
        writeln!(output, "Component {}:", index + 1).unwrap();
        writeln!(output, "  ID: {}", component.id).unwrap();
        writeln!(
            output,
            "  Type: {}",
            component.type_name().unwrap_or(UNTYPED_COMPONENT)
        )
        .unwrap();
        writeln!(output, "  Name: {}", name).unwrap();
        writeln!(
            output,
            "  Position: ({}, {})",
            component.position.x, component.position.y
        )
        .unwrap();
        writeln!(output).unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "NOTE: This is a simplified text export.").unwrap();

    output
}
