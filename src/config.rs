//! Configuration constants and export settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// RailML schema version written to and expected in documents.
pub const RAILML_VERSION: &str = "3.1";

/// RailML namespace URI.
pub const RAILML_NAMESPACE: &str = "https://www.railml.org/schemas/3.1";

/// Creator string written to exported documents.
pub const CREATOR: &str = "Railway Design Tool";

/// Version of the export format itself (metadata.exportInfo.version).
pub const EXPORT_VERSION: &str = "1.0.0";

/// Canvas width used when the rendering surface reports none.
pub const DEFAULT_CANVAS_WIDTH: f64 = 1200.0;

/// Canvas height used when the rendering surface reports none.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 800.0;

/// Default track stroke color.
pub const DEFAULT_TRACK_COLOR: &str = "#333333";

/// Default track stroke width in pixels.
pub const DEFAULT_STROKE_WIDTH: f64 = 4.0;

/// Default infrastructure name.
pub const DEFAULT_INFRASTRUCTURE_NAME: &str = "Exported Railway Design";

/// Pixels per degree in the placeholder pixel-to-geo projection.
pub const GEO_SCALE: f64 = 10_000.0;

/// Tracks shorter than this (in pixels) are reported as very short.
pub const SHORT_TRACK_THRESHOLD: f64 = 10.0;

/// Components farther than this from every track are reported as isolated.
pub const ISOLATION_DISTANCE: f64 = 50.0;

/// Maximum number of snapshots kept by the scene history.
pub const HISTORY_CAPACITY: usize = 50;

/// Default platform length.
pub const DEFAULT_PLATFORM_LENGTH: f64 = 80.0;

/// Default platform height.
pub const DEFAULT_PLATFORM_HEIGHT: f64 = 1.2;

/// Label for components without a type in statistics and summaries.
pub const UNTYPED_COMPONENT: &str = "unknown";

/// Component types known to the schema.
pub const VALID_COMPONENT_TYPES: &[&str] = &["signal", "switch", "station", "platform"];

/// Signal aspects known to the schema.
pub const VALID_SIGNAL_ASPECTS: &[&str] =
    &["red", "yellow", "green", "off", "danger", "caution", "clear"];

/// Signal types known to the schema.
pub const VALID_SIGNAL_TYPES: &[&str] = &["main", "distant", "shunting", "repeater"];

/// Switch states known to the schema.
pub const VALID_SWITCH_STATES: &[&str] = &["normal", "reverse"];

/// Switch types known to the schema.
pub const VALID_SWITCH_TYPES: &[&str] = &["simple", "english", "diamond", "doubleSlip"];

/// Station types known to the schema.
pub const VALID_STATION_TYPES: &[&str] = &["passenger", "freight", "junction", "depot"];

/// Pixel dimensions of the drawing canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasDimensions {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasDimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl CanvasDimensions {
    /// Create canvas dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Options for a single export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Infrastructure id; generated from the export time when absent.
    pub infrastructure_id: Option<String>,
    /// Infrastructure name; defaults to [`DEFAULT_INFRASTRUCTURE_NAME`].
    pub infrastructure_name: Option<String>,
    /// Run the validator and embed its result in the metadata.
    pub validate: bool,
    /// Canvas the scene was drawn on.
    pub canvas: CanvasDimensions,
    /// Export time; `None` means now.
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            infrastructure_id: None,
            infrastructure_name: None,
            validate: true,
            canvas: CanvasDimensions::default(),
            timestamp: None,
        }
    }
}

impl ExportOptions {
    /// Create export options for a canvas.
    pub fn new(canvas: CanvasDimensions) -> Self {
        Self {
            canvas,
            ..Default::default()
        }
    }

    /// Resolve the export time.
    pub fn export_time(&self) -> DateTime<Utc> {
        self.timestamp.unwrap_or_else(Utc::now)
    }

    /// Resolve the infrastructure id for a given export time.
    pub fn resolve_id(&self, at: DateTime<Utc>) -> String {
        self.infrastructure_id
            .clone()
            .unwrap_or_else(|| format!("infrastructure_{}", at.timestamp_millis()))
    }

    /// Resolve the infrastructure name.
    pub fn resolve_name(&self) -> String {
        self.infrastructure_name
            .clone()
            .unwrap_or_else(|| DEFAULT_INFRASTRUCTURE_NAME.to_string())
    }
}

/// Format a timestamp the way exported documents carry it (`2024-01-01T00:00:00.000Z`).
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    /// Floating-point comparison epsilon.
    pub const EPS: f64 = 0.0001;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Round to two decimal places.
    #[inline]
    pub fn round2(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }
}
