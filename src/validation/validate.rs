//! Structural validation of RailML documents.
//!
//! The validator works on raw JSON so that documents produced elsewhere can
//! be checked too. Required and recommended fields use JavaScript-style
//! truthiness: a missing key, `null`, `false`, `0` and `""` all count as
//! absent. Nothing here fails; every problem becomes a diagnostic.

use crate::config::{
    RAILML_NAMESPACE, RAILML_VERSION, VALID_COMPONENT_TYPES, VALID_SIGNAL_ASPECTS,
    VALID_SIGNAL_TYPES, VALID_STATION_TYPES, VALID_SWITCH_STATES, VALID_SWITCH_TYPES,
};
use crate::model::RailmlDocument;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

/// Validation result with warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub is_valid: bool,
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a failing result with an error.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: vec![message.into()],
            warnings: Vec::new(),
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.is_valid = false;
    }
}

fn timestamp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{3})?Z?$")
            .expect("timestamp pattern is a valid regex")
    })
}

/// Whether a JSON value counts as present.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Get a field if it is truthy.
fn truthy<'a>(object: &'a Value, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|v| is_truthy(v))
}

/// Get a field unless it is missing or `null`.
fn present<'a>(object: &'a Value, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|v| !v.is_null())
}

/// Render a JSON value the way it appears inside messages.
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Label for an element: its `id` when present, else the fallback.
fn label(element: &Value, fallback: impl ToString) -> String {
    truthy(element, "id")
        .map(display)
        .unwrap_or_else(|| fallback.to_string())
}

fn is_one_of(value: &Value, allowed: &[&str]) -> bool {
    value.as_str().map_or(false, |s| allowed.contains(&s))
}

fn is_positive_number(value: &Value) -> bool {
    value.as_f64().map_or(false, |n| n > 0.0)
}

/// Validator for RailML documents against the expected schema version.
#[derive(Debug, Clone)]
pub struct RailmlValidator {
    /// Schema version documents are expected to declare.
    pub version: String,
    /// Namespace documents are expected to declare.
    pub namespace: String,
}

impl Default for RailmlValidator {
    fn default() -> Self {
        Self {
            version: RAILML_VERSION.to_string(),
            namespace: RAILML_NAMESPACE.to_string(),
        }
    }
}

impl RailmlValidator {
    /// Create a validator for the default schema version.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a document given as JSON text.
    pub fn validate_str(&self, json: &str) -> ValidationResult {
        match serde_json::from_str::<Value>(json) {
            Ok(document) => self.validate(&document),
            Err(err) => ValidationResult::error(format!("JSON parsing error: {}", err)),
        }
    }

    /// Validate a document.
    pub fn validate(&self, document: &Value) -> ValidationResult {
        let mut result = ValidationResult::ok();

        let Some(railml) = truthy(document, "railml") else {
            result.add_error("Missing required 'railml' root element");
            return result;
        };

        match truthy(railml, "version") {
            None => result.add_warning("Missing version information"),
            Some(version) if version.as_str() != Some(self.version.as_str()) => {
                result.add_warning(format!(
                    "Version mismatch: expected {}, got {}",
                    self.version,
                    display(version)
                ));
            }
            Some(_) => {}
        }

        if truthy(railml, "xmlns").is_none() {
            result.add_warning("Missing XML namespace declaration");
        }

        match truthy(railml, "infrastructure") {
            Some(infrastructure) => validate_infrastructure(infrastructure, &mut result),
            None => result.add_warning("No infrastructure data found"),
        }

        if let Some(metadata) = truthy(railml, "metadata") {
            validate_metadata(metadata, &mut result);
        }

        debug!(
            "Validated document: {} error(s), {} warning(s)",
            result.errors.len(),
            result.warnings.len()
        );

        result
    }
}

/// Validate a RailML document with the default validator.
pub fn validate_document(document: &Value) -> ValidationResult {
    RailmlValidator::default().validate(document)
}

/// Validate a RailML document given as JSON text.
pub fn validate_document_str(json: &str) -> ValidationResult {
    RailmlValidator::default().validate_str(json)
}

/// Validate a document produced by the document builder.
pub fn validate_railml(document: &RailmlDocument) -> ValidationResult {
    match serde_json::to_value(document) {
        Ok(value) => validate_document(&value),
        Err(err) => ValidationResult::error(format!("JSON parsing error: {}", err)),
    }
}

fn validate_infrastructure(infrastructure: &Value, result: &mut ValidationResult) {
    if truthy(infrastructure, "id").is_none() {
        result.add_error("Infrastructure missing required 'id' attribute");
    }

    if truthy(infrastructure, "name").is_none() {
        result.add_warning("Infrastructure missing 'name' attribute");
    }

    if let Some(tracks) = truthy(infrastructure, "tracks") {
        validate_tracks(tracks, result);
    }

    if let Some(components) = truthy(infrastructure, "functionalInfrastructure") {
        validate_functional_infrastructure(components, result);
    }

    if let Some(topology) = truthy(infrastructure, "topology") {
        validate_topology(topology, result);
    }

    if let Some(geometry) = truthy(infrastructure, "geometry") {
        validate_geometry(geometry, result);
    }
}

fn validate_tracks(tracks: &Value, result: &mut ValidationResult) {
    let Some(tracks) = tracks.as_array() else {
        result.add_error("Tracks must be an array");
        return;
    };

    for (index, track) in tracks.iter().enumerate() {
        if truthy(track, "id").is_none() {
            result.add_error(format!("Track {}: missing required 'id' attribute", index));
        }

        let track_label = label(track, index);

        match truthy(track, "geometry") {
            Some(geometry) => validate_track_geometry(geometry, &track_label, result),
            None => result.add_error(format!(
                "Track {}: missing geometry information",
                track_label
            )),
        }

        let length_ok = track
            .get("length")
            .and_then(Value::as_f64)
            .map_or(false, |length| length >= 0.0);
        if !length_ok {
            result.add_warning(format!("Track {}: invalid or missing length", track_label));
        }
    }
}

fn validate_track_geometry(geometry: &Value, track_label: &str, result: &mut ValidationResult) {
    let Some(coordinates) = truthy(geometry, "coordinates") else {
        result.add_error(format!(
            "Track {}: missing coordinates in geometry",
            track_label
        ));
        return;
    };

    let Some(coordinates) = coordinates.as_array() else {
        result.add_error(format!(
            "Track {}: coordinates must be an array",
            track_label
        ));
        return;
    };

    if coordinates.len() < 2 {
        result.add_warning(format!(
            "Track {}: track should have at least 2 coordinate points",
            track_label
        ));
    }

    for (index, coordinate) in coordinates.iter().enumerate() {
        let well_formed = coordinate
            .as_array()
            .map_or(false, |pair| pair.len() >= 2 && pair[..2].iter().all(Value::is_number));
        if !well_formed {
            result.add_error(format!(
                "Track {}: invalid coordinate format at index {}",
                track_label, index
            ));
        }
    }

    if let Some(geometry_type) = truthy(geometry, "type") {
        if geometry_type.as_str() != Some("LineString") {
            result.add_warning(format!(
                "Track {}: unexpected geometry type '{}', expected 'LineString'",
                track_label,
                display(geometry_type)
            ));
        }
    }
}

fn validate_functional_infrastructure(components: &Value, result: &mut ValidationResult) {
    let Some(components) = components.as_array() else {
        result.add_error("Functional infrastructure must be an array");
        return;
    };

    for (index, component) in components.iter().enumerate() {
        if truthy(component, "id").is_none() {
            result.add_error(format!(
                "Component {}: missing required 'id' attribute",
                index
            ));
        }

        let component_label = label(component, index);

        match truthy(component, "type") {
            None => result.add_error(format!(
                "Component {}: missing required 'type' attribute",
                component_label
            )),
            Some(component_type) if !is_one_of(component_type, VALID_COMPONENT_TYPES) => {
                result.add_warning(format!(
                    "Component {}: unknown type '{}'",
                    component_label,
                    display(component_type)
                ));
            }
            Some(_) => {}
        }

        match truthy(component, "position") {
            Some(position) => validate_component_position(position, &component_label, result),
            None => result.add_error(format!(
                "Component {}: missing position information",
                component_label
            )),
        }

        validate_component_properties(component, result);
    }
}

fn validate_component_position(position: &Value, component_label: &str, result: &mut ValidationResult) {
    if !position.get("x").map_or(false, Value::is_number) {
        result.add_error(format!(
            "Component {}: position.x must be a number",
            component_label
        ));
    }

    if !position.get("y").map_or(false, Value::is_number) {
        result.add_error(format!(
            "Component {}: position.y must be a number",
            component_label
        ));
    }

    if let Some(coordinate) = truthy(position, "coordinate") {
        let in_range = |key: &str, limit: f64| {
            coordinate
                .get(key)
                .and_then(Value::as_f64)
                .map_or(false, |v| (-limit..=limit).contains(&v))
        };

        if !in_range("latitude", 90.0) {
            result.add_error(format!(
                "Component {}: invalid latitude in coordinate",
                component_label
            ));
        }

        if !in_range("longitude", 180.0) {
            result.add_error(format!(
                "Component {}: invalid longitude in coordinate",
                component_label
            ));
        }
    }
}

/// Type-specific property checks.
fn validate_component_properties(component: &Value, result: &mut ValidationResult) {
    let Some(properties) = truthy(component, "properties") else {
        return;
    };
    let component_id = label(component, "unknown");

    let mut check_enum = |key: &str, allowed: &[&str], what: &str, prefix: &str| {
        if let Some(value) = truthy(properties, key) {
            if !is_one_of(value, allowed) {
                result.add_warning(format!(
                    "{} {}: unknown {} '{}'",
                    prefix,
                    component_id,
                    what,
                    display(value)
                ));
            }
        }
    };

    match component.get("type").and_then(Value::as_str) {
        Some("signal") => {
            check_enum("aspect", VALID_SIGNAL_ASPECTS, "aspect", "Signal");
            check_enum("signalType", VALID_SIGNAL_TYPES, "signal type", "Signal");
        }
        Some("switch") => {
            check_enum("state", VALID_SWITCH_STATES, "state", "Switch");
            check_enum("switchType", VALID_SWITCH_TYPES, "switch type", "Switch");
        }
        Some("station") => {
            check_enum("stationType", VALID_STATION_TYPES, "station type", "Station");
            if let Some(platforms) = truthy(properties, "platforms") {
                if !platforms.is_array() {
                    result.add_error(format!(
                        "Station {}: platforms must be an array",
                        component_id
                    ));
                }
            }
        }
        Some("platform") => {
            for key in ["length", "height"] {
                if let Some(value) = present(properties, key) {
                    if !is_positive_number(value) {
                        result.add_warning(format!(
                            "Platform {}: invalid {} property",
                            component_id, key
                        ));
                    }
                }
            }
        }
        _ => {}
    }
}

fn validate_topology(topology: &Value, result: &mut ValidationResult) {
    for (key, message) in [
        ("nodes", "Topology nodes must be an array"),
        ("edges", "Topology edges must be an array"),
        ("connections", "Topology connections must be an array"),
    ] {
        if let Some(value) = truthy(topology, key) {
            if !value.is_array() {
                result.add_error(message);
            }
        }
    }

    if let Some(nodes) = topology.get("nodes").and_then(Value::as_array) {
        for (index, node) in nodes.iter().enumerate() {
            if truthy(node, "id").is_none() {
                result.add_error(format!(
                    "Topology node {}: missing required 'id' attribute",
                    index
                ));
            }

            let node_label = label(node, index);

            if truthy(node, "position").is_none() {
                result.add_error(format!(
                    "Topology node {}: missing position information",
                    node_label
                ));
            }

            if truthy(node, "type").is_none() {
                result.add_warning(format!(
                    "Topology node {}: missing type information",
                    node_label
                ));
            }
        }
    }

    if let Some(edges) = topology.get("edges").and_then(Value::as_array) {
        for (index, edge) in edges.iter().enumerate() {
            if truthy(edge, "id").is_none() {
                result.add_error(format!(
                    "Topology edge {}: missing required 'id' attribute",
                    index
                ));
            }

            if truthy(edge, "trackId").is_none() {
                result.add_warning(format!(
                    "Topology edge {}: missing trackId reference",
                    label(edge, index)
                ));
            }
        }
    }
}

fn validate_geometry(geometry: &Value, result: &mut ValidationResult) {
    if truthy(geometry, "coordinateSystem").is_none() {
        result.add_warning("Missing coordinate system specification");
    }

    match truthy(geometry, "bounds") {
        None => result.add_warning("Missing geometry bounds information"),
        Some(bounds) => {
            let values: Vec<Option<f64>> = ["minX", "minY", "maxX", "maxY"]
                .iter()
                .map(|key| bounds.get(*key).filter(|v| v.is_number()).and_then(Value::as_f64))
                .collect();

            match values[..] {
                [Some(min_x), Some(min_y), Some(max_x), Some(max_y)] => {
                    if min_x >= max_x || min_y >= max_y {
                        result.add_error(
                            "Invalid bounds specification - min values must be less than max values",
                        );
                    }
                }
                _ => result.add_error("Invalid bounds specification - all bounds must be numbers"),
            }
        }
    }

    if let Some(scale) = present(geometry, "scale") {
        if !is_positive_number(scale) {
            result.add_warning("Invalid or missing scale specification");
        }
    }
}

fn validate_metadata(metadata: &Value, result: &mut ValidationResult) {
    let Some(export_info) = truthy(metadata, "exportInfo") else {
        return;
    };

    if truthy(export_info, "version").is_none() {
        result.add_warning("Missing export version information");
    }

    match truthy(export_info, "timestamp") {
        None => result.add_warning("Missing export timestamp"),
        Some(timestamp) => {
            let well_formed = timestamp
                .as_str()
                .map_or(false, |s| timestamp_pattern().is_match(s));
            if !well_formed {
                result.add_warning("Invalid timestamp format - should be ISO 8601");
            }
        }
    }

    if let Some(dimensions) = truthy(export_info, "canvasDimensions") {
        let numeric = |key: &str| dimensions.get(key).map_or(false, Value::is_number);
        if !numeric("width") || !numeric("height") {
            result.add_error("Invalid canvas dimensions specification");
        }
    }
}
