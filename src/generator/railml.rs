//! RailML document builder.

use crate::config::{
    format_timestamp, ExportOptions, CREATOR, EXPORT_VERSION, RAILML_NAMESPACE, RAILML_VERSION,
};
use crate::error::{ExportError, Result};
use crate::geometry::{pixel_to_geo_coordinate, points_to_coordinates};
use crate::model::{
    Component, ComponentKind, ComponentPosition, ComponentProperties, ConvertedComponent,
    ConvertedTrack, ExportInfo, Infrastructure, LineGeometry, Metadata, PropertyDetails, Railml,
    RailmlDocument, Scene, Track, VisualProperties,
};
use crate::stats::calculate_export_statistics;
use crate::validation::{validate_export_data, validate_railml};
use tracing::{debug, info};

use super::topology::{generate_geometry, generate_topology};

/// Convert scene tracks, adding length and paired coordinates.
///
/// Tracks without a recorded creation time get `created_at`.
pub fn convert_tracks(scene: &Scene, created_at: &str) -> Vec<ConvertedTrack> {
    scene
        .tracks
        .iter()
        .map(|track| ConvertedTrack {
            id: track.id.clone(),
            name: track.name.clone(),
            length: track.length(),
            geometry: LineGeometry {
                coordinates: points_to_coordinates(&track.points),
                geometry_type: "LineString".to_string(),
            },
            visual_properties: VisualProperties {
                color: track.color.clone(),
                stroke_width: track.stroke_width,
            },
            created_at: track
                .created_at
                .clone()
                .unwrap_or_else(|| created_at.to_string()),
        })
        .collect()
}

/// Convert scene components, adding geographic coordinates and typed properties.
pub fn convert_components(scene: &Scene, created_at: &str) -> Vec<ConvertedComponent> {
    scene
        .components
        .iter()
        .map(|component| ConvertedComponent {
            id: component.id.clone(),
            component_type: component.type_name().map(str::to_string),
            name: component.name.clone(),
            position: ComponentPosition {
                x: component.position.x,
                y: component.position.y,
                coordinate: pixel_to_geo_coordinate(component.position.x, component.position.y),
            },
            rotation: component.rotation,
            properties: component_properties(component),
            created_at: component
                .created_at
                .clone()
                .unwrap_or_else(|| created_at.to_string()),
        })
        .collect()
}

/// Shape the `properties` object for a component's type.
pub fn component_properties(component: &Component) -> ComponentProperties {
    let details = match &component.kind {
        ComponentKind::Signal {
            aspect,
            signal_number,
            signal_type,
        } => Some(PropertyDetails::Signal {
            aspect: aspect.clone(),
            signal_number: signal_number.clone(),
            signal_type: signal_type.clone(),
        }),
        ComponentKind::Switch { state, switch_type } => Some(PropertyDetails::Switch {
            state: state.clone(),
            switch_type: switch_type.clone(),
        }),
        ComponentKind::Station {
            station_type,
            platforms,
        } => Some(PropertyDetails::Station {
            station_type: station_type.clone(),
            platforms: platforms.clone(),
        }),
        ComponentKind::Platform { length, height } => Some(PropertyDetails::Platform {
            length: *length,
            height: *height,
        }),
        ComponentKind::Other { .. } => None,
    };

    ComponentProperties {
        component_type: component.type_name().map(str::to_string),
        name: component.name.clone(),
        id: component.id.clone(),
        details,
    }
}

/// Build a RailML document from a scene.
///
/// When `options.validate` is set the finished document is run through the
/// validator and the result stored under `metadata.validationResult`.
pub fn build_document(scene: &Scene, options: &ExportOptions) -> RailmlDocument {
    let at = options.export_time();
    let timestamp = format_timestamp(at);

    let tracks = convert_tracks(scene, &timestamp);
    let components = convert_components(scene, &timestamp);
    debug!(
        "Converted {} track(s) and {} component(s)",
        tracks.len(),
        components.len()
    );

    let statistics = calculate_export_statistics(&tracks, &scene.components);

    let mut document = RailmlDocument {
        railml: Railml {
            version: RAILML_VERSION.to_string(),
            xmlns: RAILML_NAMESPACE.to_string(),
            created: timestamp.clone(),
            creator: CREATOR.to_string(),
            infrastructure: Infrastructure {
                id: options.resolve_id(at),
                name: options.resolve_name(),
                tracks,
                functional_infrastructure: components,
                topology: generate_topology(scene),
                geometry: generate_geometry(&options.canvas),
            },
            metadata: Metadata {
                export_info: ExportInfo {
                    version: EXPORT_VERSION.to_string(),
                    timestamp,
                    canvas_dimensions: options.canvas,
                    total_tracks: scene.tracks.len(),
                    total_components: scene.components.len(),
                },
                statistics,
                validation: validate_export_data(scene),
                validation_result: None,
            },
        },
    };

    if options.validate {
        let result = validate_railml(&document);
        document.railml.metadata.validation_result = Some(result);
    }

    info!(
        "Built RailML document '{}'",
        document.railml.infrastructure.id
    );

    document
}

/// Build a document and render it as pretty-printed JSON.
pub fn export_to_json(scene: &Scene, options: &ExportOptions) -> Result<String> {
    let document = build_document(scene, options);
    serde_json::to_string_pretty(&document).map_err(ExportError::Serialize)
}

/// A small one-track, one-signal scene.
pub fn sample_scene() -> Scene {
    let mut main_line = Track::new("track_1", vec![0.0, 0.0, 1000.0, 0.0]);
    main_line.name = "Main Line".to_string();

    let mut entry_signal = Component::signal("signal_1", 100.0, 50.0);
    entry_signal.name = "Entry Signal".to_string();

    Scene {
        tracks: vec![main_line],
        components: vec![entry_signal],
    }
}

/// The sample scene exported as a validated document.
pub fn generate_sample_document() -> RailmlDocument {
    let options = ExportOptions {
        infrastructure_id: Some("sample_infrastructure".to_string()),
        infrastructure_name: Some("Sample Railway Design".to_string()),
        ..Default::default()
    };
    build_document(&sample_scene(), &options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasDimensions;
    use crate::model::Point;
    use crate::validation::Quality;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fixed_options() -> ExportOptions {
        ExportOptions {
            timestamp: Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    // ==================== convert_tracks tests ====================

    #[test]
    fn test_convert_tracks() {
        let mut track = Track::new("t1", vec![0.0, 0.0, 30.0, 40.0]);
        track.created_at = Some("2023-05-01T08:00:00.000Z".to_string());
        let scene = Scene {
            tracks: vec![track, Track::new("t2", vec![])],
            components: vec![],
        };

        let converted = convert_tracks(&scene, "now");
        assert_eq!(converted[0].length, 50.0);
        assert_eq!(converted[0].geometry.coordinates, vec![[0.0, 0.0], [30.0, 40.0]]);
        assert_eq!(converted[0].created_at, "2023-05-01T08:00:00.000Z");
        assert_eq!(converted[1].length, 0.0);
        assert_eq!(converted[1].created_at, "now");
        assert_eq!(converted[1].visual_properties.color, "#333333");
    }

    // ==================== convert_components tests ====================

    #[test]
    fn test_convert_signal() {
        let scene = Scene {
            tracks: vec![],
            components: vec![Component::signal("s1", 100.0, 50.0)],
        };
        let converted = convert_components(&scene, "now");
        assert_eq!(
            serde_json::to_value(&converted[0]).unwrap(),
            json!({
                "id": "s1",
                "type": "signal",
                "name": "s1",
                "position": {
                    "x": 100.0,
                    "y": 50.0,
                    "coordinate": {"latitude": 0.005, "longitude": 0.01, "elevation": 0.0}
                },
                "rotation": 0.0,
                "properties": {
                    "type": "signal",
                    "name": "s1",
                    "id": "s1",
                    "aspect": "red",
                    "signalType": "main"
                },
                "createdAt": "now"
            })
        );
    }

    #[test]
    fn test_component_properties_by_kind() {
        let platform = Component::new(
            "p1",
            Point::default(),
            ComponentKind::Platform {
                length: 80.0,
                height: 1.2,
            },
        );
        assert_eq!(
            serde_json::to_value(component_properties(&platform)).unwrap(),
            json!({"type": "platform", "name": "p1", "id": "p1", "length": 80.0, "height": 1.2})
        );

        let station = Component::new(
            "st",
            Point::default(),
            ComponentKind::Station {
                station_type: "passenger".to_string(),
                platforms: json!([]),
            },
        );
        assert_eq!(
            serde_json::to_value(component_properties(&station)).unwrap(),
            json!({"type": "station", "name": "st", "id": "st", "stationType": "passenger", "platforms": []})
        );

        let other = Component::new(
            "b1",
            Point::default(),
            ComponentKind::Other {
                type_name: Some("balise".to_string()),
            },
        );
        assert_eq!(
            serde_json::to_value(component_properties(&other)).unwrap(),
            json!({"type": "balise", "name": "b1", "id": "b1"})
        );

        let untyped = Component::new("c", Point::default(), ComponentKind::Other { type_name: None });
        assert_eq!(
            serde_json::to_value(component_properties(&untyped)).unwrap(),
            json!({"name": "c", "id": "c"})
        );

        let switch = Component::switch("w1", 0.0, 0.0);
        assert_eq!(
            serde_json::to_value(component_properties(&switch)).unwrap(),
            json!({"type": "switch", "name": "w1", "id": "w1", "state": "normal", "switchType": "simple"})
        );
    }

    // ==================== build_document tests ====================

    #[test]
    fn test_build_empty_scene() {
        let document = build_document(&Scene::new(), &fixed_options());
        let railml = &document.railml;
        assert!(railml.infrastructure.tracks.is_empty());
        assert!(railml.infrastructure.functional_infrastructure.is_empty());
        assert_eq!(railml.metadata.statistics.tracks.total_tracks, 0);
        assert_eq!(railml.metadata.statistics.tracks.average_length, 0.0);
        assert_eq!(railml.metadata.statistics.components.most_common_type, "none");
        assert_eq!(railml.metadata.validation.quality, Quality::NeedsAttention);
        assert_eq!(railml.infrastructure.id, "infrastructure_1704110400000");

        let result = railml.metadata.validation_result.as_ref().unwrap();
        assert!(result.is_valid);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_build_document_metadata() {
        let options = ExportOptions {
            canvas: CanvasDimensions::new(800.0, 600.0),
            infrastructure_name: Some("Yard".to_string()),
            ..fixed_options()
        };
        let document = build_document(&sample_scene(), &options);
        let value = serde_json::to_value(&document).unwrap();

        assert_eq!(value["railml"]["version"], "3.1");
        assert_eq!(value["railml"]["created"], "2024-01-01T12:00:00.000Z");
        assert_eq!(value["railml"]["infrastructure"]["name"], "Yard");
        assert_eq!(
            value["railml"]["metadata"]["exportInfo"],
            json!({
                "version": "1.0.0",
                "timestamp": "2024-01-01T12:00:00.000Z",
                "canvasDimensions": {"width": 800.0, "height": 600.0},
                "totalTracks": 1,
                "totalComponents": 1
            })
        );
        assert_eq!(value["railml"]["metadata"]["statistics"]["totalLength"], 1000.0);
        assert_eq!(value["railml"]["metadata"]["statistics"]["byType"], json!({"signal": 1}));
        assert_eq!(value["railml"]["infrastructure"]["geometry"]["bounds"]["maxX"], 800.0);
        assert_eq!(value["railml"]["metadata"]["validationResult"]["isValid"], true);
    }

    #[test]
    fn test_build_without_validation() {
        let options = ExportOptions {
            validate: false,
            ..fixed_options()
        };
        let document = build_document(&sample_scene(), &options);
        assert!(document.railml.metadata.validation_result.is_none());

        let value = serde_json::to_value(&document).unwrap();
        assert!(value["railml"]["metadata"].get("validationResult").is_none());
    }

    #[test]
    fn test_untyped_component_fails_validation() {
        let mut scene = sample_scene();
        scene.add_component(Component::new(
            "c",
            Point::new(100.0, 5.0),
            ComponentKind::Other { type_name: None },
        ));

        let document = build_document(&scene, &fixed_options());
        let value = serde_json::to_value(&document).unwrap();
        assert!(value["railml"]["infrastructure"]["functionalInfrastructure"][1]
            .get("type")
            .is_none());

        let result = document.railml.metadata.validation_result.unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["Component c: missing required 'type' attribute"]);
    }

    #[test]
    fn test_station_platforms_not_array_is_reported() {
        let mut scene = sample_scene();
        scene.add_component(Component::new(
            "st",
            Point::new(200.0, 5.0),
            ComponentKind::Station {
                station_type: "passenger".to_string(),
                platforms: json!(3),
            },
        ));

        let result = build_document(&scene, &fixed_options())
            .railml
            .metadata
            .validation_result
            .unwrap();
        assert_eq!(result.errors, vec!["Station st: platforms must be an array"]);
    }

    #[test]
    fn test_export_to_json_is_reproducible() {
        let first = export_to_json(&sample_scene(), &fixed_options()).unwrap();
        let second = export_to_json(&sample_scene(), &fixed_options()).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("\"functionalInfrastructure\""));
    }

    #[test]
    fn test_sample_document_is_valid() {
        let document = generate_sample_document();
        assert_eq!(document.railml.infrastructure.id, "sample_infrastructure");
        assert_eq!(document.railml.infrastructure.tracks[0].length, 1000.0);
        let result = validate_railml(&document);
        assert!(result.is_valid, "{:?}", result.errors);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }
}
