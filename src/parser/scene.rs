//! Scene loader.
//!
//! Editor state arrives as loosely-typed JSON: every field may be missing,
//! `null` or empty. Defaults are filled here, once, so the rest of the crate
//! works with fully-populated [`Scene`] values.

use crate::config::{
    DEFAULT_PLATFORM_HEIGHT, DEFAULT_PLATFORM_LENGTH, DEFAULT_STROKE_WIDTH, DEFAULT_TRACK_COLOR,
    UNTYPED_COMPONENT,
};
use crate::error::{ExportError, Result};
use crate::model::{Component, ComponentKind, Point, Scene, Track};
use crate::validation::is_truthy;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Keep a field only if it has the expected type; anything else is absent.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Strings as-is, numbers stringified, anything else absent.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawScene {
    #[serde(deserialize_with = "lenient")]
    tracks: Option<Vec<RawTrack>>,
    #[serde(deserialize_with = "lenient")]
    components: Option<Vec<RawComponent>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawTrack {
    #[serde(deserialize_with = "lenient_text")]
    id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    points: Option<Vec<f64>>,
    #[serde(deserialize_with = "lenient")]
    color: Option<String>,
    #[serde(deserialize_with = "lenient")]
    stroke_width: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    created_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPosition {
    #[serde(deserialize_with = "lenient")]
    x: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    y: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawComponent {
    #[serde(deserialize_with = "lenient_text")]
    id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    name: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient")]
    component_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    position: Option<RawPosition>,
    #[serde(deserialize_with = "lenient")]
    rotation: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    created_at: Option<String>,
    #[serde(deserialize_with = "lenient")]
    aspect: Option<String>,
    #[serde(deserialize_with = "lenient")]
    state: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    signal_number: Option<String>,
    #[serde(deserialize_with = "lenient")]
    signal_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    switch_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    station_type: Option<String>,
    /// Raw JSON; a non-array value is passed through for the validator.
    platforms: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    length: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    height: Option<f64>,
}

/// Empty strings count as missing.
fn text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Zero counts as missing.
fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|n| *n != 0.0)
}

fn text_or(value: Option<String>, default: &str) -> String {
    text(value).unwrap_or_else(|| default.to_string())
}

fn normalize_track(index: usize, raw: RawTrack) -> Result<Track> {
    let id = text(raw.id).unwrap_or_else(|| format!("track_{}", index));
    let points = raw.points.unwrap_or_default();
    if points.len() % 2 != 0 {
        return Err(ExportError::OddPointCount {
            track: id,
            count: points.len(),
        });
    }

    Ok(Track {
        name: text(raw.name).unwrap_or_else(|| format!("Track {}", index + 1)),
        id,
        points,
        color: text_or(raw.color, DEFAULT_TRACK_COLOR),
        stroke_width: nonzero(raw.stroke_width).unwrap_or(DEFAULT_STROKE_WIDTH),
        created_at: text(raw.created_at),
    })
}

fn normalize_component(index: usize, raw: RawComponent) -> Component {
    let type_name = text(raw.component_type);

    let kind = match type_name.as_deref() {
        Some("signal") => ComponentKind::Signal {
            aspect: text(raw.aspect)
                .or_else(|| text(raw.state))
                .unwrap_or_else(|| "red".to_string()),
            signal_number: text(raw.signal_number),
            signal_type: text_or(raw.signal_type, "main"),
        },
        Some("switch") => ComponentKind::Switch {
            state: text_or(raw.state, "normal"),
            switch_type: text_or(raw.switch_type, "simple"),
        },
        Some("station") => ComponentKind::Station {
            station_type: text_or(raw.station_type, "passenger"),
            platforms: raw
                .platforms
                .filter(is_truthy)
                .unwrap_or_else(|| Value::Array(Vec::new())),
        },
        Some("platform") => ComponentKind::Platform {
            length: nonzero(raw.length).unwrap_or(DEFAULT_PLATFORM_LENGTH),
            height: nonzero(raw.height).unwrap_or(DEFAULT_PLATFORM_HEIGHT),
        },
        _ => ComponentKind::Other {
            type_name: type_name.clone(),
        },
    };

    let position = raw.position.unwrap_or_default();
    let default_name = || {
        format!(
            "{} {}",
            type_name.as_deref().unwrap_or(UNTYPED_COMPONENT),
            index + 1
        )
    };

    Component {
        id: text(raw.id).unwrap_or_else(|| format!("component_{}", index)),
        name: text(raw.name).unwrap_or_else(default_name),
        position: Point::new(position.x.unwrap_or(0.0), position.y.unwrap_or(0.0)),
        rotation: raw.rotation.unwrap_or(0.0),
        created_at: text(raw.created_at),
        kind,
    }
}

/// Parse a scene from editor JSON.
///
/// Unknown keys are ignored. A track with an odd number of coordinates is
/// rejected.
pub fn parse_scene_str(json: &str) -> Result<Scene> {
    let raw: RawScene = serde_json::from_str(json)?;

    let tracks = raw
        .tracks
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, t)| normalize_track(i, t))
        .collect::<Result<Vec<_>>>()?;

    let components = raw
        .components
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, c)| normalize_component(i, c))
        .collect::<Vec<_>>();

    debug!(
        "Parsed scene with {} track(s) and {} component(s)",
        tracks.len(),
        components.len()
    );

    Ok(Scene { tracks, components })
}

/// Parse a scene from a JSON file.
pub fn parse_scene_file(path: &Path) -> Result<Scene> {
    if !path.exists() {
        return Err(ExportError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;

    if content.trim().is_empty() {
        return Err(ExportError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    parse_scene_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write;

    // ==================== Track normalization tests ====================

    #[test]
    fn test_track_defaults() {
        let scene = parse_scene_str(
            r#"{"tracks": [{"points": [0, 0, 10, 0], "color": "", "strokeWidth": 0}]}"#,
        )
        .unwrap();
        let track = &scene.tracks[0];
        assert_eq!(track.id, "track_0");
        assert_eq!(track.name, "Track 1");
        assert_eq!(track.color, "#333333");
        assert_eq!(track.stroke_width, 4.0);
        assert_eq!(track.created_at, None);
        assert!(scene.components.is_empty());
    }

    #[test]
    fn test_track_fields_kept() {
        let scene = parse_scene_str(
            r##"{"tracks": [{"id": "main", "name": "Main", "points": [1.5, 2, 3, 4],
                 "color": "#ff0000", "strokeWidth": 6, "createdAt": "2024-01-01T00:00:00Z",
                 "tension": 0.5}]}"##,
        )
        .unwrap();
        let track = &scene.tracks[0];
        assert_eq!(track.id, "main");
        assert_eq!(track.points, vec![1.5, 2.0, 3.0, 4.0]);
        assert_eq!(track.color, "#ff0000");
        assert_eq!(track.stroke_width, 6.0);
        assert_eq!(track.created_at.as_deref(), Some("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_odd_point_count_rejected() {
        let err = parse_scene_str(r#"{"tracks": [{"id": "bad", "points": [0, 0, 5]}]}"#)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::OddPointCount);
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn test_null_points_is_empty_track() {
        let scene = parse_scene_str(r#"{"tracks": [{"id": "t", "points": null}]}"#).unwrap();
        assert!(scene.tracks[0].points.is_empty());
        assert!(scene.tracks[0].is_degenerate());
    }

    // ==================== Component normalization tests ====================

    #[test]
    fn test_signal_aspect_falls_back_to_state() {
        let scene = parse_scene_str(
            r#"{"components": [
                {"type": "signal", "state": "green", "position": {"x": 5, "y": 6}},
                {"type": "signal", "aspect": "yellow", "state": "green"},
                {"type": "signal"}
            ]}"#,
        )
        .unwrap();

        let aspects: Vec<_> = scene
            .components
            .iter()
            .map(|c| match &c.kind {
                ComponentKind::Signal { aspect, .. } => aspect.as_str(),
                _ => panic!("expected signal"),
            })
            .collect();
        assert_eq!(aspects, vec!["green", "yellow", "red"]);
        assert_eq!(scene.components[0].position, Point::new(5.0, 6.0));
        assert_eq!(scene.components[0].id, "component_0");
        assert_eq!(scene.components[2].name, "signal 3");
    }

    #[test]
    fn test_component_kind_defaults() {
        let scene = parse_scene_str(
            r#"{"components": [
                {"id": "w", "type": "switch"},
                {"id": "st", "type": "station"},
                {"id": "p", "type": "platform", "length": 0, "height": 2},
                {"id": "b", "type": "balise", "rotation": 90}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            scene.components[0].kind,
            ComponentKind::Switch {
                state: "normal".to_string(),
                switch_type: "simple".to_string()
            }
        );
        assert_eq!(
            scene.components[1].kind,
            ComponentKind::Station {
                station_type: "passenger".to_string(),
                platforms: json!([])
            }
        );
        assert_eq!(
            scene.components[2].kind,
            ComponentKind::Platform {
                length: 80.0,
                height: 2.0
            }
        );
        assert_eq!(scene.components[3].type_name(), Some("balise"));
        assert_eq!(scene.components[3].rotation, 90.0);
        assert_eq!(scene.components[3].position, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_missing_type_stays_absent() {
        let scene = parse_scene_str(r#"{"components": [{}, {"type": ""}, {"type": 4}]}"#).unwrap();
        for component in &scene.components {
            assert_eq!(component.type_name(), None);
            assert_eq!(component.kind, ComponentKind::Other { type_name: None });
        }
        assert_eq!(scene.components[0].name, "unknown 1");
    }

    // ==================== Loose typing tests ====================

    #[test]
    fn test_station_platforms_kept_as_drawn() {
        let scene = parse_scene_str(
            r#"{"components": [
                {"id": "a", "type": "station", "platforms": 3},
                {"id": "b", "type": "station", "platforms": [{"id": "p1"}]},
                {"id": "c", "type": "station", "platforms": null},
                {"id": "d", "type": "station", "platforms": ""}
            ]}"#,
        )
        .unwrap();

        let platforms: Vec<_> = scene
            .components
            .iter()
            .map(|c| match &c.kind {
                ComponentKind::Station { platforms, .. } => platforms.clone(),
                _ => panic!("expected station"),
            })
            .collect();
        assert_eq!(
            platforms,
            vec![json!(3), json!([{"id": "p1"}]), json!([]), json!([])]
        );
    }

    #[test]
    fn test_wrong_typed_fields_fall_back_to_defaults() {
        let scene = parse_scene_str(
            r#"{"components": [
                {"id": "p", "type": "platform", "length": "120", "height": true},
                {"id": "s", "type": "signal", "aspect": 1, "position": {"x": "10", "y": 20}},
                {"id": "w", "type": "switch", "position": "left", "rotation": "90"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            scene.components[0].kind,
            ComponentKind::Platform {
                length: 80.0,
                height: 1.2
            }
        );
        match &scene.components[1].kind {
            ComponentKind::Signal { aspect, .. } => assert_eq!(aspect, "red"),
            other => panic!("expected signal, got {:?}", other),
        }
        assert_eq!(scene.components[1].position, Point::new(0.0, 20.0));
        assert_eq!(scene.components[2].position, Point::new(0.0, 0.0));
        assert_eq!(scene.components[2].rotation, 0.0);
    }

    #[test]
    fn test_numeric_ids_are_stringified() {
        let scene = parse_scene_str(
            r#"{
                "tracks": [{"id": 7, "name": 12, "points": [0, 0, 10, 0], "strokeWidth": "thick", "color": 5}],
                "components": [{"id": 3, "type": "signal", "signalNumber": 42}]
            }"#,
        )
        .unwrap();

        let track = &scene.tracks[0];
        assert_eq!(track.id, "7");
        assert_eq!(track.name, "12");
        assert_eq!(track.stroke_width, 4.0);
        assert_eq!(track.color, "#333333");

        let signal = &scene.components[0];
        assert_eq!(signal.id, "3");
        match &signal.kind {
            ComponentKind::Signal { signal_number, .. } => {
                assert_eq!(signal_number.as_deref(), Some("42"))
            }
            other => panic!("expected signal, got {:?}", other),
        }
    }

    #[test]
    fn test_non_array_sections_are_empty() {
        let scene = parse_scene_str(r#"{"tracks": {"id": "t"}, "components": "none"}"#).unwrap();
        assert!(scene.tracks.is_empty());
        assert!(scene.components.is_empty());
    }

    // ==================== File loading tests ====================

    #[test]
    fn test_invalid_json() {
        let err = parse_scene_str("{\"tracks\": [").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ParseError);
        assert_eq!(err.code_value(), -3);
    }

    #[test]
    fn test_parse_scene_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"tracks": [{{"id": "t1", "points": [0, 0, 30, 40]}}]}}"#).unwrap();

        let scene = parse_scene_file(file.path()).unwrap();
        assert_eq!(scene.tracks.len(), 1);
        assert_eq!(scene.tracks[0].length(), 50.0);
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_scene_file(Path::new("/nonexistent/scene.json")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::FileNotFound);
    }

    #[test]
    fn test_parse_empty_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "   ").unwrap();

        let err = parse_scene_file(file.path()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmptyFile);
    }
}
