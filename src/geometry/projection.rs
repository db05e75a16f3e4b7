//! Pixel-to-geographic projections and coordinate system handling.
//!
//! None of these are geodetic transforms. The editor works in canvas pixels
//! and the projections below are linear placeholders; exported documents
//! carry their exact output.

use crate::config::GEO_SCALE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Scale used by [`convert_coordinates`] for pixel to EPSG:4326.
const PIXEL_TO_WGS84_SCALE: f64 = 100_000.0;

/// Geographic coordinate attached to exported components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// Simplified linear projection: `latitude = y / 10000`, `longitude = x / 10000`.
pub fn pixel_to_geo_coordinate(x: f64, y: f64) -> GeoCoordinate {
    GeoCoordinate {
        latitude: y / GEO_SCALE,
        longitude: x / GEO_SCALE,
        elevation: 0.0,
    }
}

/// Axis-aligned extent in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounds of a canvas anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: width,
            max_y: height,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Geographic window that a pixel extent is mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoReference {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl Default for GeoReference {
    fn default() -> Self {
        Self {
            lat_min: 0.0,
            lat_max: 0.001,
            lon_min: 0.0,
            lon_max: 0.001,
        }
    }
}

/// Map `(x, y)` inside `bounds` linearly onto `reference`.
///
/// A zero-sized bound axis maps to the reference minimum on that axis.
pub fn pixel_to_geo_in_bounds(
    x: f64,
    y: f64,
    bounds: &Bounds,
    reference: &GeoReference,
) -> GeoCoordinate {
    let normalize = |value: f64, min: f64, span: f64| {
        if span == 0.0 {
            0.0
        } else {
            (value - min) / span
        }
    };
    let nx = normalize(x, bounds.min_x, bounds.width());
    let ny = normalize(y, bounds.min_y, bounds.height());

    GeoCoordinate {
        latitude: reference.lat_min + ny * (reference.lat_max - reference.lat_min),
        longitude: reference.lon_min + nx * (reference.lon_max - reference.lon_min),
        elevation: 0.0,
    }
}

/// Coordinate reference systems accepted in exported geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSystem {
    /// EPSG:4326
    Wgs84,
    /// EPSG:3857
    WebMercator,
    /// Canvas pixels.
    Pixel,
    /// Local engineering coordinates.
    Local,
}

impl CoordinateSystem {
    /// Check whether a CRS identifier is supported.
    pub fn is_supported(crs: &str) -> bool {
        crs.parse::<CoordinateSystem>().is_ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinateSystem::Wgs84 => "EPSG:4326",
            CoordinateSystem::WebMercator => "EPSG:3857",
            CoordinateSystem::Pixel => "pixel",
            CoordinateSystem::Local => "local",
        }
    }
}

impl FromStr for CoordinateSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EPSG:4326" => Ok(CoordinateSystem::Wgs84),
            "EPSG:3857" => Ok(CoordinateSystem::WebMercator),
            "pixel" => Ok(CoordinateSystem::Pixel),
            "local" => Ok(CoordinateSystem::Local),
            other => Err(format!("unsupported coordinate system '{}'", other)),
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert paired coordinates between coordinate systems.
///
/// Only pixel to EPSG:4326 is implemented (a plain scaling). Every other
/// pair is returned unchanged.
pub fn convert_coordinates(
    coordinates: &[[f64; 2]],
    from: CoordinateSystem,
    to: CoordinateSystem,
) -> Vec<[f64; 2]> {
    match (from, to) {
        (a, b) if a == b => coordinates.to_vec(),
        (CoordinateSystem::Pixel, CoordinateSystem::Wgs84) => coordinates
            .iter()
            .map(|[x, y]| [x / PIXEL_TO_WGS84_SCALE, y / PIXEL_TO_WGS84_SCALE])
            .collect(),
        _ => {
            warn!("Coordinate conversion from {} to {} not implemented", from, to);
            coordinates.to_vec()
        }
    }
}
