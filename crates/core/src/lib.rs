//! # RowGuard Core
//!
//! Core types, projection and I/O shared by the RowGuard crates.
//!
//! This crate provides:
//! - `Raster<T>`: generic 2D grid used for image intensities and masks
//! - `GeoTransform`: affine pixel-to-map georeference
//! - `UtmZone` / `LocalProjection`: per-query WGS84 to UTM projection
//! - `Shape`: closed geometry enum for corridor line/area geometry
//! - `Settings`: YAML-backed pipeline, compliance and scoring settings
//! - I/O for images and GeoJSON corridors
//! - Algorithm trait for a consistent API

pub mod config;
pub mod crs;
pub mod error;
pub mod io;
pub mod raster;
pub mod vector;

pub use config::Settings;
pub use crs::{LocalProjection, UtmZone};
pub use error::{CorridorLoadError, Error, Result};
pub use raster::{GeoTransform, Raster, RasterElement};
pub use vector::Shape;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::Settings;
    pub use crate::crs::{LocalProjection, UtmZone};
    pub use crate::error::{CorridorLoadError, Error, Result};
    pub use crate::raster::{GeoTransform, Raster, RasterElement};
    pub use crate::vector::Shape;
    pub use crate::Algorithm;
}

/// Core trait for the RowGuard processing stages.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
