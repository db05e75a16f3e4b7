//! Geometry engine: distances, snapping, lengths and coordinate conversion.
//!
//! All functions are total over finite input. Coordinates come from JSON
//! numbers, so NaN and infinities never reach this module.

mod projection;
mod segment;

pub use projection::*;
pub use segment::*;
