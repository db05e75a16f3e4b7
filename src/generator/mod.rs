//! Document and text generators.

mod railml;
mod report;
mod summary;
mod topology;

pub use railml::*;
pub use report::generate_validation_report;
pub use summary::generate_text_summary;
pub use topology::{generate_geometry, generate_topology};
