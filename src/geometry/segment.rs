//! Point-to-segment distance, track snapping and track lengths.

use crate::config::float_cmp::round2;
use crate::model::{Point, Track};

/// Closest point to `(px, py)` on the segment `(x1, y1)-(x2, y2)`.
///
/// The projection parameter is clamped to `[0, 1]`; a zero-length segment
/// yields its single point.
pub fn closest_point_on_segment(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> Point {
    let dx = x2 - x1;
    let dy = y2 - y1;
    let length_sq = dx * dx + dy * dy;

    if length_sq == 0.0 {
        return Point::new(x1, y1);
    }

    let t = (((px - x1) * dx + (py - y1) * dy) / length_sq).clamp(0.0, 1.0);
    Point::new(x1 + t * dx, y1 + t * dy)
}

/// Distance from `(px, py)` to the segment `(x1, y1)-(x2, y2)`.
pub fn distance_to_line_segment(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let closest = closest_point_on_segment(px, py, x1, y1, x2, y2);
    Point::new(px, py).distance_to(&closest)
}

/// Result of snapping a position to the nearest track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestTrackPoint<'a> {
    /// Closest point on the winning segment.
    pub point: Point,
    /// Track owning the winning segment.
    pub track: &'a Track,
    /// Index of the winning segment within the track (0 = first two points).
    pub segment_index: usize,
    /// Distance from the query position to `point`.
    pub distance: f64,
}

/// Find the closest track segment within `snap_distance` of `(x, y)`.
///
/// Tracks and their segments are scanned in order and only a strictly
/// smaller distance replaces the current best, so ties go to the first
/// segment encountered.
pub fn find_nearest_track_point(
    tracks: &[Track],
    x: f64,
    y: f64,
    snap_distance: f64,
) -> Option<NearestTrackPoint<'_>> {
    let mut best: Option<NearestTrackPoint<'_>> = None;

    for track in tracks {
        for (segment_index, (a, b)) in track.segments().enumerate() {
            let point = closest_point_on_segment(x, y, a.x, a.y, b.x, b.y);
            let distance = Point::new(x, y).distance_to(&point);

            if distance > snap_distance {
                continue;
            }
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(NearestTrackPoint {
                    point,
                    track,
                    segment_index,
                    distance,
                });
            }
        }
    }

    best
}

/// Sum of segment lengths of a flat `x, y, ...` list, rounded to two decimals.
///
/// Fewer than two points give 0.
pub fn calculate_track_length(points: &[f64]) -> f64 {
    let length: f64 = points
        .chunks_exact(2)
        .zip(points.chunks_exact(2).skip(1))
        .map(|(a, b)| ((b[0] - a[0]).powi(2) + (b[1] - a[1]).powi(2)).sqrt())
        .sum();
    round2(length)
}

/// Pair up a flat `x, y, ...` list.
pub fn points_to_coordinates(points: &[f64]) -> Vec<[f64; 2]> {
    points.chunks_exact(2).map(|p| [p[0], p[1]]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::float_cmp::approx_eq;

    // ==================== distance_to_line_segment tests ====================

    #[test]
    fn test_distance_perpendicular() {
        assert_eq!(distance_to_line_segment(50.0, 5.0, 0.0, 0.0, 100.0, 0.0), 5.0);
    }

    #[test]
    fn test_distance_clamped_to_endpoints() {
        // Beyond the end: distance to (100, 0)
        assert_eq!(distance_to_line_segment(103.0, 4.0, 0.0, 0.0, 100.0, 0.0), 5.0);
        // Before the start: distance to (0, 0)
        assert_eq!(distance_to_line_segment(-6.0, 8.0, 0.0, 0.0, 100.0, 0.0), 10.0);
    }

    #[test]
    fn test_distance_degenerate_segment() {
        assert_eq!(distance_to_line_segment(3.0, 4.0, 0.0, 0.0, 0.0, 0.0), 5.0);
    }

    #[test]
    fn test_distance_symmetric_under_reversal() {
        let cases = [
            (12.0, -7.0, 1.0, 2.0, 40.0, 33.0),
            (-3.5, 8.25, 10.0, 10.0, -20.0, 5.0),
            (0.0, 0.0, 5.0, 5.0, 5.0, 9.0),
        ];
        for (px, py, x1, y1, x2, y2) in cases {
            let forward = distance_to_line_segment(px, py, x1, y1, x2, y2);
            let reverse = distance_to_line_segment(px, py, x2, y2, x1, y1);
            assert!(approx_eq(forward, reverse), "{} vs {}", forward, reverse);
        }
    }

    // ==================== find_nearest_track_point tests ====================

    #[test]
    fn test_nearest_none_outside_snap_distance() {
        let tracks = vec![Track::new("t1", vec![0.0, 0.0, 100.0, 0.0])];
        assert!(find_nearest_track_point(&tracks, 50.0, 20.0, 10.0).is_none());
    }

    #[test]
    fn test_nearest_within_snap_distance() {
        let tracks = vec![Track::new("t1", vec![0.0, 0.0, 100.0, 0.0, 100.0, 100.0])];
        let nearest = find_nearest_track_point(&tracks, 95.0, 60.0, 10.0).unwrap();
        assert_eq!(nearest.track.id, "t1");
        assert_eq!(nearest.segment_index, 1);
        assert_eq!(nearest.point, Point::new(100.0, 60.0));
        assert_eq!(nearest.distance, 5.0);
        assert!(nearest.distance <= 10.0);
    }

    #[test]
    fn test_nearest_exactly_at_snap_distance() {
        let tracks = vec![Track::new("t1", vec![0.0, 0.0, 100.0, 0.0])];
        let nearest = find_nearest_track_point(&tracks, 50.0, 10.0, 10.0).unwrap();
        assert_eq!(nearest.distance, 10.0);
    }

    #[test]
    fn test_nearest_picks_minimum_across_tracks() {
        let tracks = vec![
            Track::new("far", vec![0.0, 0.0, 100.0, 0.0]),
            Track::new("near", vec![0.0, 18.0, 100.0, 18.0]),
        ];
        let nearest = find_nearest_track_point(&tracks, 50.0, 15.0, 20.0).unwrap();
        assert_eq!(nearest.track.id, "near");
        assert_eq!(nearest.distance, 3.0);
    }

    #[test]
    fn test_nearest_tie_goes_to_first_segment() {
        let tracks = vec![
            Track::new("a", vec![0.0, 0.0, 10.0, 0.0]),
            Track::new("b", vec![0.0, 10.0, 10.0, 10.0]),
        ];
        let nearest = find_nearest_track_point(&tracks, 5.0, 5.0, 10.0).unwrap();
        assert_eq!(nearest.track.id, "a");
    }

    #[test]
    fn test_nearest_ignores_degenerate_tracks() {
        let tracks = vec![Track::new("dot", vec![5.0, 5.0])];
        assert!(find_nearest_track_point(&tracks, 5.0, 5.0, 10.0).is_none());
    }

    // ==================== calculate_track_length tests ====================

    #[test]
    fn test_track_length_sum_of_segments() {
        assert_eq!(calculate_track_length(&[0.0, 0.0, 3.0, 4.0, 3.0, 10.0]), 11.0);
    }

    #[test]
    fn test_track_length_rounded() {
        // sqrt(2) * 100 = 141.4213...
        assert_eq!(calculate_track_length(&[0.0, 0.0, 100.0, 100.0]), 141.42);
        // 1/3 + 1/3
        assert_eq!(
            calculate_track_length(&[0.0, 0.0, 0.0, 1.0 / 3.0, 0.0, 2.0 / 3.0]),
            0.67
        );
    }

    #[test]
    fn test_track_length_short_inputs() {
        assert_eq!(calculate_track_length(&[]), 0.0);
        assert_eq!(calculate_track_length(&[7.0, 8.0]), 0.0);
    }

    #[test]
    fn test_points_to_coordinates() {
        assert_eq!(
            points_to_coordinates(&[1.0, 2.0, 3.0, 4.0]),
            vec![[1.0, 2.0], [3.0, 4.0]]
        );
        assert!(points_to_coordinates(&[]).is_empty());
    }
}
