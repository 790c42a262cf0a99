//! Error types for RowGuard

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for RowGuard operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read image {path}: {reason}")]
    ImageRead { path: String, reason: String },

    #[error("cannot load corridor: {0}")]
    CorridorLoad(#[from] CorridorLoadError),

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Raster size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    SizeMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

/// Reasons a corridor geometry file is refused.
///
/// `UnsupportedGeometry` is raised both for geometry types that are never
/// accepted (points, collections) and for merges that do not reduce to pure
/// line or pure area geometry.
#[derive(Error, Debug)]
pub enum CorridorLoadError {
    #[error("corridor file not found: {0}")]
    NotFound(PathBuf),

    #[error("cannot read corridor file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed GeoJSON: {0}")]
    Parse(String),

    #[error("unsupported GeoJSON structure: {0}")]
    UnsupportedStructure(String),

    #[error("unsupported geometry type for corridor: {0}")]
    UnsupportedGeometry(String),

    #[error("corridor input contains no geometry")]
    NoGeometry,
}

/// Result type alias for RowGuard operations
pub type Result<T> = std::result::Result<T, Error>;
