//! Track - a polyline railway segment drawn in the editor.

use super::Point;
use crate::config::{DEFAULT_STROKE_WIDTH, DEFAULT_TRACK_COLOR};

/// A polyline railway segment.
///
/// `points` is a flat `x, y, x, y, ...` list and always has even length.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Unique track identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Flat alternating x/y coordinates.
    pub points: Vec<f64>,
    /// Stroke color.
    pub color: String,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Creation time as recorded by the editor.
    pub created_at: Option<String>,
}

impl Track {
    /// Create a track with default visual properties.
    pub fn new(id: impl Into<String>, points: Vec<f64>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            points,
            color: DEFAULT_TRACK_COLOR.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            created_at: None,
        }
    }

    /// Number of x/y pairs.
    pub fn point_count(&self) -> usize {
        self.points.len() / 2
    }

    /// Whether the track has fewer than two points.
    pub fn is_degenerate(&self) -> bool {
        self.point_count() < 2
    }

    /// Get the point at `index`.
    pub fn point(&self, index: usize) -> Option<Point> {
        let x = *self.points.get(index * 2)?;
        let y = *self.points.get(index * 2 + 1)?;
        Some(Point::new(x, y))
    }

    /// First point of the polyline.
    pub fn start(&self) -> Option<Point> {
        self.point(0)
    }

    /// Last point of the polyline.
    pub fn end(&self) -> Option<Point> {
        self.point_count().checked_sub(1).and_then(|i| self.point(i))
    }

    /// Iterate over consecutive point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points
            .chunks_exact(2)
            .zip(self.points.chunks_exact(2).skip(1))
            .map(|(a, b)| (Point::new(a[0], a[1]), Point::new(b[0], b[1])))
    }

    /// Polyline length rounded to two decimals.
    pub fn length(&self) -> f64 {
        crate::geometry::calculate_track_length(&self.points)
    }
}
