//! Structured diagnostics and schema description for UI consumers.

use super::ValidationResult;
use crate::config::{
    RAILML_NAMESPACE, RAILML_VERSION, VALID_COMPONENT_TYPES, VALID_SIGNAL_ASPECTS,
    VALID_SWITCH_STATES,
};
use indexmap::IndexMap;
use serde::Serialize;

/// Whether a diagnostic blocks validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Error,
    Warning,
}

/// How urgently a diagnostic should be addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

/// A single formatted validation message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    #[serde(rename = "type")]
    pub kind: DiagnosticKind,
    pub message: String,
    pub severity: Severity,
}

/// Counts accompanying formatted diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub is_valid: bool,
    pub error_count: usize,
    pub warning_count: usize,
}

/// Validation result reshaped for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedValidation {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub summary: ValidationSummary,
}

/// Convert a validation result into structured diagnostics.
pub fn format_validation_errors(result: &ValidationResult) -> FormattedValidation {
    let to_diagnostics = |messages: &[String], kind, severity| -> Vec<Diagnostic> {
        messages
            .iter()
            .map(|message| Diagnostic {
                kind,
                message: message.clone(),
                severity,
            })
            .collect()
    };

    FormattedValidation {
        errors: to_diagnostics(&result.errors, DiagnosticKind::Error, Severity::High),
        warnings: to_diagnostics(&result.warnings, DiagnosticKind::Warning, Severity::Medium),
        summary: ValidationSummary {
            is_valid: result.is_valid,
            error_count: result.errors.len(),
            warning_count: result.warnings.len(),
        },
    }
}

/// Description of the supported RailML subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaInfo {
    pub version: &'static str,
    pub namespace: &'static str,
    /// Section name to element name to description.
    pub supported_elements: IndexMap<&'static str, IndexMap<&'static str, &'static str>>,
    pub valid_component_types: &'static [&'static str],
    pub valid_signal_aspects: &'static [&'static str],
    pub valid_switch_states: &'static [&'static str],
}

/// Describe the schema subset this crate writes and validates.
pub fn schema_info() -> SchemaInfo {
    let infrastructure = IndexMap::from([
        ("tracks", "Railway track segments with geometry"),
        (
            "functionalInfrastructure",
            "Railway components (signals, switches, etc.)",
        ),
        (
            "topology",
            "Network topology with nodes, edges, and connections",
        ),
        ("geometry", "Coordinate system and spatial bounds"),
    ]);
    let metadata = IndexMap::from([
        (
            "exportInfo",
            "Export metadata including version and timestamps",
        ),
        ("canvasDimensions", "Original canvas size information"),
    ]);

    SchemaInfo {
        version: RAILML_VERSION,
        namespace: RAILML_NAMESPACE,
        supported_elements: IndexMap::from([
            ("infrastructure", infrastructure),
            ("metadata", metadata),
        ]),
        valid_component_types: VALID_COMPONENT_TYPES,
        valid_signal_aspects: VALID_SIGNAL_ASPECTS,
        valid_switch_states: VALID_SWITCH_STATES,
    }
}
