//! # RowGuard Algorithms
//!
//! Change assessment for corridor rights-of-way.
//!
//! ## Stages
//!
//! - **imagery**: image-difference change detection into change regions
//! - **morphology**: binary mask erosion, dilation, closing and opening
//! - **corridor**: corridor loading and metric distance via local UTM projection
//! - **compliance**: minimum setback check
//! - **scoring**: composite threat score, level and reasons
//! - **assessment**: runs the stages above over detected regions

pub mod assessment;
pub mod compliance;
pub mod corridor;
pub mod imagery;
pub mod morphology;
pub mod scoring;

mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::assessment::{
        assess_regions, AssessedEvent, AssessmentContext, TruePositiveClassifier,
    };
    pub use crate::compliance::{check_setback, ComplianceVerdict};
    pub use crate::corridor::{
        distance_to_corridor_meters, load_corridor, point_in_corridor_buffer, Corridor,
    };
    pub use crate::imagery::{
        detect_changes, detect_changes_from_paths, BoundingBox, ChangeDetector, ChangeRegion,
        DetectionParams, RegionFeatures,
    };
    pub use crate::scoring::{compute_threat, EncroachmentCategory, ThreatLevel, ThreatResult};
    pub use rowguard_core::prelude::*;
}
