//! Reading images and corridor geometry

mod geojson;
mod image;

pub use self::geojson::{parse_geojson_shapes, read_geojson_shapes};
pub use self::image::{decode_intensity, read_intensity, read_intensity_from_buffer, resample_to};
