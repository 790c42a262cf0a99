//! Image-difference change detection
//!
//! Compares a before and an after grayscale image of the same footprint:
//!
//! 1. resample the after image to the before image's size if they differ
//! 2. per-pixel absolute difference
//! 3. threshold (`diff >= change_threshold` is change)
//! 4. binary closing then opening with a square element
//! 5. hole-filled components, filtered by minimum area
//!
//! Each surviving region carries its bounding box, pixel area, centroid
//! and the mean difference over its bounding box.

use std::path::Path;

use crate::maybe_rayon::*;
use crate::morphology::{closing, opening, StructuringElement, MASK_ON};
use rowguard_core::config::PipelineSettings;
use rowguard_core::io::{read_intensity, resample_to};
use rowguard_core::{Algorithm, Error, Raster, Result};
use serde::Serialize;
use tracing::{debug, info};

use super::regions::{external_components, BoundingBox};

/// Parameters for change detection
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionParams {
    /// Minimum absolute intensity difference counted as change
    pub change_threshold: u8,
    /// Smallest region kept, in pixels
    pub min_region_area: u64,
    /// Side of the square structuring element
    pub morphology_kernel_size: usize,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self::from(&PipelineSettings::default())
    }
}

impl From<&PipelineSettings> for DetectionParams {
    fn from(settings: &PipelineSettings) -> Self {
        Self {
            change_threshold: settings.change_threshold,
            min_region_area: settings.min_region_area,
            morphology_kernel_size: settings.morphology_kernel_size,
        }
    }
}

/// A detected change region in pixel space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeRegion {
    pub bounding_box: BoundingBox,
    /// Area in pixels, holes included
    pub area: u64,
    /// `(x, y)` centroid in pixel coordinates
    pub centroid: (f64, f64),
    /// Mean absolute difference over the bounding box, in `[0, 255]`
    pub magnitude: f64,
}

/// Region measurements handed to a true-positive classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionFeatures {
    pub area_pixels: u64,
    pub magnitude: f64,
}

impl ChangeRegion {
    pub fn features(&self) -> RegionFeatures {
        RegionFeatures {
            area_pixels: self.area,
            magnitude: self.magnitude,
        }
    }
}

/// Change detection as an [`Algorithm`] over a `(before, after)` pair
#[derive(Debug, Clone, Default)]
pub struct ChangeDetector;

impl Algorithm for ChangeDetector {
    type Input = (Raster<u8>, Raster<u8>);
    type Output = Vec<ChangeRegion>;
    type Params = DetectionParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "ChangeDetector"
    }

    fn description(&self) -> &'static str {
        "Absolute-difference change detection with morphological cleanup"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let (before, after) = input;
        detect_changes(&before, &after, &params)
    }
}

/// Per-pixel `|after - before|`.
///
/// Both rasters must have the same shape.
pub fn absolute_difference(before: &Raster<u8>, after: &Raster<u8>) -> Result<Raster<u8>> {
    let (rows, cols) = before.shape();
    if after.shape() != (rows, cols) {
        return Err(Error::SizeMismatch {
            er: rows,
            ec: cols,
            ar: after.rows(),
            ac: after.cols(),
        });
    }

    let (b, a) = (before.data(), after.data());
    let diff: Vec<u8> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            (0..cols)
                .map(|col| a[(row, col)].abs_diff(b[(row, col)]))
                .collect::<Vec<u8>>()
        })
        .collect();

    Raster::from_vec(diff, rows, cols)
}

/// Foreground where `diff >= threshold`
pub fn binarize(diff: &Raster<u8>, threshold: u8) -> Raster<u8> {
    Raster::from_array(diff.data().mapv(|d| if d >= threshold { MASK_ON } else { 0 }))
}

/// Detect change regions between two grayscale images.
///
/// The after image is resampled to the before image's dimensions when
/// they differ. Regions are returned in raster-scan order.
pub fn detect_changes(
    before: &Raster<u8>,
    after: &Raster<u8>,
    params: &DetectionParams,
) -> Result<Vec<ChangeRegion>> {
    let element = StructuringElement::square(params.morphology_kernel_size);
    element.validate()?;

    let (rows, cols) = before.shape();
    let resampled;
    let after = if after.shape() != (rows, cols) {
        debug!(
            "Resampling after image from {:?} to {:?}",
            after.shape(),
            (rows, cols)
        );
        resampled = resample_to(after, rows, cols)?;
        &resampled
    } else {
        after
    };

    let diff = absolute_difference(before, after)?;
    let mask = binarize(&diff, params.change_threshold);
    let cleaned = opening(&closing(&mask, &element)?, &element)?;
    debug!(
        "Change mask: {} pixels above threshold, {} after cleanup",
        mask.count_set(),
        cleaned.count_set()
    );

    let regions: Vec<ChangeRegion> = external_components(&cleaned)
        .into_iter()
        .filter(|c| c.area >= params.min_region_area)
        .map(|c| {
            let b = c.bounding_box;
            let stats = diff.window_stats(b.x, b.y, b.width, b.height);
            ChangeRegion {
                bounding_box: b,
                area: c.area,
                centroid: c.centroid,
                magnitude: stats.mean,
            }
        })
        .collect();

    info!("Detected {} candidate changes", regions.len());
    Ok(regions)
}

/// Read both images as grayscale and run [`detect_changes`]
pub fn detect_changes_from_paths<P: AsRef<Path>, Q: AsRef<Path>>(
    before: P,
    after: Q,
    params: &DetectionParams,
) -> Result<Vec<ChangeRegion>> {
    let before = read_intensity(before)?;
    let after = read_intensity(after)?;
    detect_changes(&before, &after, params)
}
