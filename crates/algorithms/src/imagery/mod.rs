//! Imagery change detection
//!
//! Turns a before/after image pair into a list of change regions:
//! absolute difference, threshold, mask cleanup, then component extraction
//! with per-region area, centroid and mean change magnitude.

mod change_detection;
mod regions;

pub use change_detection::{
    absolute_difference, binarize, detect_changes, detect_changes_from_paths, ChangeDetector,
    ChangeRegion, DetectionParams, RegionFeatures,
};
pub use regions::{external_components, BoundingBox, Component};
