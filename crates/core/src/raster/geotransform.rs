//! Affine georeference for image pixels

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Affine transformation coefficients for georeferencing an image.
///
/// Converts between pixel coordinates (col, row) and map coordinates (x, y):
/// ```text
/// x = origin_x + col * pixel_width + row * row_rotation
/// y = origin_y + col * col_rotation + row * pixel_height
/// ```
///
/// For RowGuard the map coordinates are WGS84 longitude/latitude. For
/// north-up images the rotations are 0 and `pixel_height` is negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    /// X coordinate of the upper-left corner
    pub origin_x: f64,
    /// Y coordinate of the upper-left corner
    pub origin_y: f64,
    /// Pixel width (cell size in X direction)
    pub pixel_width: f64,
    /// Pixel height (cell size in Y direction, usually negative)
    pub pixel_height: f64,
    /// Rotation about X axis (usually 0)
    pub row_rotation: f64,
    /// Rotation about Y axis (usually 0)
    pub col_rotation: f64,
}

impl GeoTransform {
    /// Create a new GeoTransform with no rotation (north-up image)
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
            row_rotation: 0.0,
            col_rotation: 0.0,
        }
    }

    /// Create from GDAL-style array [origin_x, pixel_width, row_rotation, origin_y, col_rotation, pixel_height]
    pub fn from_gdal(coeffs: [f64; 6]) -> Self {
        Self {
            origin_x: coeffs[0],
            pixel_width: coeffs[1],
            row_rotation: coeffs[2],
            origin_y: coeffs[3],
            col_rotation: coeffs[4],
            pixel_height: coeffs[5],
        }
    }

    /// Map a pixel-space position to map coordinates.
    ///
    /// Integer positions address pixel centres, so `(0.0, 0.0)` maps to the
    /// centre of the upper-left pixel. Fractional positions such as region
    /// centroids are supported.
    pub fn pixel_to_geo(&self, x: f64, y: f64) -> (f64, f64) {
        let col_f = x + 0.5;
        let row_f = y + 0.5;

        let gx = self.origin_x + col_f * self.pixel_width + row_f * self.row_rotation;
        let gy = self.origin_y + col_f * self.col_rotation + row_f * self.pixel_height;

        (gx, gy)
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, -1.0)
    }
}

/// Parses either `origin_x,origin_y,pixel_width,pixel_height` (north-up) or
/// the six GDAL coefficients.
impl FromStr for GeoTransform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| Error::InvalidParameter {
                name: "geotransform",
                value: s.to_string(),
                reason: e.to_string(),
            })?;

        match values.as_slice() {
            &[ox, oy, pw, ph] => Ok(Self::new(ox, oy, pw, ph)),
            &[a, b, c, d, e, f] => Ok(Self::from_gdal([a, b, c, d, e, f])),
            _ => Err(Error::InvalidParameter {
                name: "geotransform",
                value: s.to_string(),
                reason: format!("expected 4 or 6 comma-separated numbers, got {}", values.len()),
            }),
        }
    }
}
