//! Coordinate reference systems for corridor distance queries
//!
//! Geographic degrees cannot be measured in metres directly, so every
//! distance query picks the UTM zone of the query point and projects into
//! it. The projection is rebuilt per query and never cached.

mod utm;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use utm::wgs84_to_utm;

/// EPSG code of WGS84 geographic coordinates
pub const WGS84_EPSG: u32 = 4326;

/// A UTM zone (1-60) and hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UtmZone {
    zone: u8,
    north: bool,
}

impl UtmZone {
    /// Zone containing the given WGS84 position.
    ///
    /// `zone = floor((lon + 180) / 6) + 1`, clamped to 1..=60 so that
    /// longitude 180 falls in zone 60. Latitude 0 counts as northern.
    pub fn for_lonlat(lon: f64, lat: f64) -> Self {
        let raw = ((lon + 180.0) / 6.0).floor() + 1.0;
        let zone = if raw.is_nan() { 1.0 } else { raw.clamp(1.0, 60.0) };
        Self {
            zone: zone as u8,
            north: lat >= 0.0,
        }
    }

    /// Parse an EPSG code into a zone: 326xx is north, 327xx is south.
    pub fn from_epsg(epsg: u32) -> Option<Self> {
        if (32601..=32660).contains(&epsg) {
            Some(Self { zone: (epsg - 32600) as u8, north: true })
        } else if (32701..=32760).contains(&epsg) {
            Some(Self { zone: (epsg - 32700) as u8, north: false })
        } else {
            None
        }
    }

    /// Zone number, 1-60
    pub fn zone(&self) -> u8 {
        self.zone
    }

    /// Whether this is a northern-hemisphere zone
    pub fn is_north(&self) -> bool {
        self.north
    }

    /// EPSG code of the equivalent WGS84 / UTM CRS
    pub fn epsg(&self) -> u32 {
        let base = if self.north { 32600 } else { 32700 };
        base + self.zone as u32
    }

    /// Longitude of the zone's central meridian, in degrees
    pub fn central_meridian(&self) -> f64 {
        (self.zone as f64 - 1.0) * 6.0 - 180.0 + 3.0
    }
}

impl fmt::Display for UtmZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

/// Forward WGS84 to UTM transform centred on a query location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalProjection {
    zone: UtmZone,
}

impl LocalProjection {
    /// Projection whose zone is chosen from the query longitude and latitude
    pub fn centered_on(lon: f64, lat: f64) -> Self {
        Self {
            zone: UtmZone::for_lonlat(lon, lat),
        }
    }

    pub fn zone(&self) -> UtmZone {
        self.zone
    }

    /// Project (lon, lat) degrees to (easting, northing) metres
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        wgs84_to_utm(lon, lat, self.zone)
    }

    /// Project a geometry coordinate; `x` is longitude and `y` latitude
    pub fn project_coord(&self, coord: geo_types::Coord<f64>) -> geo_types::Coord<f64> {
        let (x, y) = self.project(coord.x, coord.y);
        geo_types::Coord { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_at_origin() {
        let zone = UtmZone::for_lonlat(0.0, 0.0);
        assert_eq!(zone.zone(), 31);
        assert!(zone.is_north());
        assert_eq!(zone.epsg(), 32631);
        assert_eq!(zone.to_string(), "EPSG:32631");
    }

    #[test]
    fn test_zone_california() {
        let zone = UtmZone::for_lonlat(-122.0, 37.0);
        assert_eq!(zone.zone(), 10);
        assert!(zone.is_north());
        assert_eq!(zone.epsg(), 32610);
    }

    #[test]
    fn test_zone_southern_hemisphere() {
        let zone = UtmZone::for_lonlat(-58.3816, -34.6037);
        assert_eq!(zone.zone(), 21);
        assert!(!zone.is_north());
        assert_eq!(zone.epsg(), 32721);
    }

    #[test]
    fn test_zone_edges_clamped() {
        assert_eq!(UtmZone::for_lonlat(-180.0, 10.0).zone(), 1);
        assert_eq!(UtmZone::for_lonlat(180.0, 10.0).zone(), 60);
        assert_eq!(UtmZone::for_lonlat(179.9, 10.0).zone(), 60);
    }

    #[test]
    fn test_zone_boundary_is_floor() {
        // -120 is the western edge of zone 11
        assert_eq!(UtmZone::for_lonlat(-120.0, 0.0).zone(), 11);
        assert_eq!(UtmZone::for_lonlat(-120.0001, 0.0).zone(), 10);
    }

    #[test]
    fn test_epsg_round_trip() {
        assert_eq!(UtmZone::from_epsg(32630).map(|z| (z.zone(), z.is_north())), Some((30, true)));
        assert_eq!(UtmZone::from_epsg(32721).map(|z| (z.zone(), z.is_north())), Some((21, false)));
        assert_eq!(UtmZone::from_epsg(WGS84_EPSG), None);
        assert_eq!(UtmZone::from_epsg(32600), None);
        assert_eq!(UtmZone::from_epsg(32661), None);
    }

    #[test]
    fn test_central_meridian() {
        assert_eq!(UtmZone::for_lonlat(0.0, 0.0).central_meridian(), 3.0);
        assert_eq!(UtmZone::for_lonlat(-122.0, 37.0).central_meridian(), -123.0);
    }

    #[test]
    fn test_projection_centre_of_zone() {
        let proj = LocalProjection::centered_on(3.0, 0.0);
        let (e, n) = proj.project(3.0, 0.0);
        assert!((e - 500_000.0).abs() < 0.01);
        assert!(n.abs() < 0.01);
    }
}
