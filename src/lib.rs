//! railml-export - Convert railway track-layout scenes to RailML documents.
//!
//! A scene is the editor's set of polyline tracks and positioned components
//! (signals, switches, stations, platforms). This crate turns a scene into a
//! RailML 3.1 style JSON document with derived geometry, topology and
//! statistics, and validates such documents against the expected structure.
//!
//! # Example
//!
//! ```no_run
//! use railml_export::{export_scene_file, validate_document_str, ExportOptions};
//! use std::path::Path;
//!
//! let json = export_scene_file(Path::new("scene.json"), &ExportOptions::default()).unwrap();
//! let result = validate_document_str(&json);
//! assert!(result.is_valid);
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod history;
pub mod model;
pub mod parser;
pub mod stats;
pub mod validation;

// Re-exports for convenience
pub use config::{CanvasDimensions, ExportOptions};
pub use error::{ExportError, Result};
pub use generator::{
    build_document, export_to_json, generate_sample_document, generate_text_summary,
    generate_validation_report,
};
pub use history::SceneHistory;
pub use model::{Component, ComponentKind, Point, RailmlDocument, Scene, Track};
pub use parser::{parse_scene_file, parse_scene_str};
pub use stats::{design_statistics, DesignStatistics};
pub use validation::{
    format_validation_errors, schema_info, validate_document, validate_document_str,
    validate_export_data, validate_railml, RailmlValidator, ValidationResult,
};

/// Export a scene file as RailML JSON.
///
/// Loads and normalizes the scene, builds the document (validating it unless
/// `options.validate` is off) and renders it as pretty-printed JSON.
pub fn export_scene_file(input_path: &std::path::Path, options: &ExportOptions) -> Result<String> {
    let scene = parse_scene_file(input_path)?;

    validate_export_data(&scene).log();

    export_to_json(&scene, options)
}
