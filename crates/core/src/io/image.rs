//! Image decoding into intensity rasters
//!
//! Any format the `image` crate can decode is accepted. Colour images are
//! reduced to 8-bit luma; the core never sees more than one channel.

use crate::error::{Error, Result};
use crate::raster::Raster;
use ::image::imageops::{self, FilterType};
use ::image::{DynamicImage, GrayImage};
use std::path::Path;

/// Read an image file as an 8-bit intensity raster
pub fn read_intensity<P: AsRef<Path>>(path: P) -> Result<Raster<u8>> {
    let path = path.as_ref();
    let img = ::image::open(path).map_err(|e| Error::ImageRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    decode_intensity(&img)
}

/// Decode an in-memory encoded image as an 8-bit intensity raster
pub fn read_intensity_from_buffer(data: &[u8]) -> Result<Raster<u8>> {
    let img = ::image::load_from_memory(data).map_err(|e| Error::ImageRead {
        path: "<buffer>".to_string(),
        reason: e.to_string(),
    })?;
    decode_intensity(&img)
}

/// Convert a decoded image of any channel layout to luma
pub fn decode_intensity(img: &DynamicImage) -> Result<Raster<u8>> {
    gray_to_raster(img.to_luma8())
}

/// Resample `raster` to `rows x cols` with bilinear filtering.
///
/// This is a lossy size alignment, not georegistration.
pub fn resample_to(raster: &Raster<u8>, rows: usize, cols: usize) -> Result<Raster<u8>> {
    if raster.shape() == (rows, cols) {
        return Ok(raster.clone());
    }
    let gray = raster_to_gray(raster)?;
    let resized = imageops::resize(&gray, cols as u32, rows as u32, FilterType::Triangle);
    gray_to_raster(resized)
}

fn gray_to_raster(gray: GrayImage) -> Result<Raster<u8>> {
    let (width, height) = gray.dimensions();
    Raster::from_vec(gray.into_raw(), height as usize, width as usize)
}

fn raster_to_gray(raster: &Raster<u8>) -> Result<GrayImage> {
    let (rows, cols) = raster.shape();
    let data: Vec<u8> = raster.data().iter().copied().collect();
    GrayImage::from_raw(cols as u32, rows as u32, data).ok_or(Error::InvalidDimensions {
        width: cols,
        height: rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{Rgb, RgbImage};

    #[test]
    fn test_colour_image_becomes_single_channel() {
        let mut rgb = RgbImage::new(4, 3);
        rgb.put_pixel(1, 2, Rgb([255, 255, 255]));
        let raster = decode_intensity(&DynamicImage::ImageRgb8(rgb)).unwrap();

        assert_eq!(raster.shape(), (3, 4));
        assert_eq!(raster.get(2, 1).unwrap(), 255);
        assert_eq!(raster.get(0, 0).unwrap(), 0);
    }

    #[test]
    fn test_missing_file_is_image_read_error() {
        let err = read_intensity("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, Error::ImageRead { .. }));
    }

    #[test]
    fn test_garbage_buffer_is_image_read_error() {
        let err = read_intensity_from_buffer(b"not an image").unwrap_err();
        assert!(matches!(err, Error::ImageRead { .. }));
    }

    #[test]
    fn test_resample_changes_shape() {
        let raster = Raster::filled(10, 20, 80u8);
        let resized = resample_to(&raster, 5, 7).unwrap();
        assert_eq!(resized.shape(), (5, 7));
        assert_eq!(resized.get(2, 3).unwrap(), 80);
    }

    #[test]
    fn test_read_png_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.png");
        let mut raster: Raster<u8> = Raster::new(8, 6);
        raster.fill_rect(1, 1, 3, 2, 200);

        raster_to_gray(&raster).unwrap().save(&path).unwrap();
        let back = read_intensity(&path).unwrap();
        assert_eq!(back, raster);
    }
}
