//! Corridor geometry and metric distance queries
//!
//! A [`Corridor`] is loaded once from GeoJSON, merged into a single line
//! or area geometry in WGS84 lon/lat, and then queried read-only. Each
//! query projects the corridor into the UTM zone of the query point so
//! distances come out in metres.

mod distance;
mod merge;

use std::path::Path;

use geo::Coord;
use rowguard_core::io::{parse_geojson_shapes, read_geojson_shapes};
use rowguard_core::{LocalProjection, Result, Shape};
use tracing::{debug, info};

pub use distance::planar_distance;
pub use merge::merge_shapes;

/// Merged corridor geometry in WGS84 lon/lat
#[derive(Debug, Clone, PartialEq)]
pub struct Corridor {
    geometry: Shape,
}

impl Corridor {
    /// Merge already-parsed shapes into a corridor
    pub fn from_shapes(shapes: Vec<Shape>) -> Result<Self> {
        let geometry = merge_shapes(shapes)?;
        Ok(Self { geometry })
    }

    /// Parse and merge a GeoJSON document
    pub fn from_geojson_str(text: &str) -> Result<Self> {
        Self::from_shapes(parse_geojson_shapes(text)?)
    }

    /// Read and merge a GeoJSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let corridor = Self::from_shapes(read_geojson_shapes(path)?)?;
        info!(
            "Loaded corridor {} ({}, {} coordinates)",
            path.display(),
            corridor.geometry.kind(),
            corridor.geometry.coord_count()
        );
        Ok(corridor)
    }

    pub fn geometry(&self) -> &Shape {
        &self.geometry
    }

    /// Whether the merged geometry has no coordinates
    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }

    /// Distance in metres from `(lon, lat)` to the corridor.
    ///
    /// Both are projected into the UTM zone of the query point. Points
    /// inside an area corridor are at 0; an empty corridor is infinitely far.
    pub fn distance_meters(&self, lon: f64, lat: f64) -> f64 {
        if self.is_empty() {
            return f64::INFINITY;
        }
        let projection = LocalProjection::centered_on(lon, lat);
        let projected = self.geometry.transform(&|c| projection.project_coord(c));
        let (x, y) = projection.project(lon, lat);
        let d = planar_distance(&projected, Coord { x, y });
        debug!(
            "Distance from ({lon}, {lat}) to corridor in {}: {d:.3} m",
            projection.zone()
        );
        d
    }

    /// Whether `(lon, lat)` lies within `buffer_meters` of the corridor
    pub fn buffer_contains(&self, lon: f64, lat: f64, buffer_meters: f64) -> bool {
        self.distance_meters(lon, lat) <= buffer_meters
    }
}

/// Load a corridor from a GeoJSON file
pub fn load_corridor<P: AsRef<Path>>(path: P) -> Result<Corridor> {
    Corridor::load(path)
}

/// Metric distance from a lon/lat point to the corridor
pub fn distance_to_corridor_meters(lon: f64, lat: f64, corridor: &Corridor) -> f64 {
    corridor.distance_meters(lon, lat)
}

/// Whether a lon/lat point is within `buffer_m` metres of the corridor
pub fn point_in_corridor_buffer(lon: f64, lat: f64, corridor: &Corridor, buffer_m: f64) -> bool {
    corridor.buffer_contains(lon, lat, buffer_m)
}
