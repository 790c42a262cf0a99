//! Per-region assessment
//!
//! Runs each detected region through the downstream stages: optional
//! true-positive filtering, map placement, corridor distance, buffer
//! membership, setback compliance and threat scoring.

use crate::compliance::{check_setback, ComplianceVerdict};
use crate::corridor::Corridor;
use crate::imagery::{ChangeRegion, RegionFeatures};
use crate::maybe_rayon::*;
use crate::scoring::{compute_threat, ThreatResult};
use rowguard_core::{GeoTransform, Settings};
use serde::Serialize;
use tracing::{debug, info};

/// Probability that a region is a real encroachment.
///
/// Implemented outside this crate by whatever model the caller trusts.
/// Closures `Fn(RegionFeatures) -> f64` implement it too.
pub trait TruePositiveClassifier: Sync {
    /// Probability in `[0, 1]`
    fn true_positive_probability(&self, features: RegionFeatures) -> f64;
}

impl<F> TruePositiveClassifier for F
where
    F: Fn(RegionFeatures) -> f64 + Sync,
{
    fn true_positive_probability(&self, features: RegionFeatures) -> f64 {
        self(features)
    }
}

/// Inputs shared by every region of one run
#[derive(Debug, Clone)]
pub struct AssessmentContext<'a> {
    pub settings: &'a Settings,
    pub corridor: Option<&'a Corridor>,
    /// Georeference of the before image; places centroids on the map
    pub geotransform: Option<GeoTransform>,
    /// Fixed `(lon, lat)` used for every region when no georeference is set
    pub event_location: Option<(f64, f64)>,
    /// Encroachment category label passed to the scorer
    pub category: &'a str,
}

impl<'a> AssessmentContext<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            corridor: None,
            geotransform: None,
            event_location: None,
            category: "unknown",
        }
    }

    /// `(lon, lat)` of a region, if any georeference is available
    pub fn locate(&self, region: &ChangeRegion) -> Option<(f64, f64)> {
        match self.geotransform {
            Some(gt) => Some(gt.pixel_to_geo(region.centroid.0, region.centroid.1)),
            None => self.event_location,
        }
    }
}

/// Where an event's distance came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceSource {
    /// Projected distance to the loaded corridor
    Corridor,
    /// `scoring.default_distance_m`, for lack of a corridor or a location
    Default,
}

/// A region with everything the downstream stages concluded about it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessedEvent {
    #[serde(flatten)]
    pub region: ChangeRegion,
    pub true_positive_probability: Option<f64>,
    /// `(lon, lat)` of the region centroid
    pub location: Option<(f64, f64)>,
    pub distance_m: f64,
    pub distance_source: DistanceSource,
    pub in_corridor_buffer: bool,
    pub compliance: ComplianceVerdict,
    pub threat: ThreatResult,
}

/// Assess every region, dropping those the classifier rates below
/// `pipeline.min_true_positive_probability`.
///
/// Output order follows input order.
pub fn assess_regions(
    regions: &[ChangeRegion],
    ctx: &AssessmentContext<'_>,
    classifier: Option<&dyn TruePositiveClassifier>,
) -> Vec<AssessedEvent> {
    let min_probability = ctx.settings.pipeline.min_true_positive_probability;

    let events: Vec<AssessedEvent> = regions
        .par_iter()
        .filter_map(|region| {
            let probability =
                classifier.map(|c| c.true_positive_probability(region.features()));
            if probability.is_some_and(|p| !(p >= min_probability)) {
                debug!("Dropping region at {:?} (p = {:?})", region.centroid, probability);
                return None;
            }
            Some(assess_region(region, probability, ctx))
        })
        .collect();

    if classifier.is_some() {
        info!("Kept {}/{} regions after classification", events.len(), regions.len());
    }
    events
}

fn assess_region(
    region: &ChangeRegion,
    probability: Option<f64>,
    ctx: &AssessmentContext<'_>,
) -> AssessedEvent {
    let settings = ctx.settings;
    let location = ctx.locate(region);

    let (distance_m, distance_source, in_corridor_buffer) = match (ctx.corridor, location) {
        (Some(corridor), Some((lon, lat))) => {
            let d = corridor.distance_meters(lon, lat);
            (d, DistanceSource::Corridor, d <= settings.pipeline.corridor_buffer_meters)
        }
        _ => (settings.scoring.default_distance_m, DistanceSource::Default, false),
    };

    let compliance = check_setback(distance_m, settings.compliance.setback_meters);
    let threat = compute_threat(
        ctx.category,
        distance_m,
        compliance.passes,
        region.magnitude,
        region.area,
    );

    AssessedEvent {
        region: region.clone(),
        true_positive_probability: probability,
        location,
        distance_m,
        distance_source,
        in_corridor_buffer,
        compliance,
        threat,
    }
}
