//! Threat scoring
//!
//! A 0-100 score summed from five parts:
//!
//! | part | range |
//! |---|---|
//! | category base | 15 to 40 |
//! | distance (closer is higher, flat beyond 100 m) | 0 to 50 |
//! | change magnitude | 0 to 10 |
//! | region area | 0 to 10 |
//! | compliance | +10 non-compliant, -5 compliant |
//!
//! The total is clamped to `[0, 100]` and mapped to a [`ThreatLevel`].

use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Kind of encroachment, from the detection label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EncroachmentCategory {
    Structure,
    Road,
    Equipment,
    Water,
    Unknown,
}

impl EncroachmentCategory {
    /// Case-insensitive label lookup; unrecognised labels are `Unknown`
    pub fn parse(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "structure" => Self::Structure,
            "road" => Self::Road,
            "equipment" => Self::Equipment,
            "water" => Self::Water,
            _ => Self::Unknown,
        }
    }

    pub fn base_score(self) -> f64 {
        match self {
            Self::Structure => 40.0,
            Self::Road => 35.0,
            Self::Equipment => 25.0,
            Self::Water => 20.0,
            Self::Unknown => 15.0,
        }
    }
}

impl From<&str> for EncroachmentCategory {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}

/// Qualitative threat level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl ThreatLevel {
    /// Level for a score; each lower bound is inclusive
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Critical
        } else if score >= 60.0 {
            Self::High
        } else if score >= 40.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score, level and the contribution of each part
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreatResult {
    pub score: f64,
    pub level: ThreatLevel,
    pub reasons: Vec<String>,
}

/// Compute the threat score for one encroachment.
///
/// `category` is matched case-insensitively and echoed verbatim in the
/// first reason. NaN or negative distances and magnitudes count as 0.
pub fn compute_threat(
    category: &str,
    distance_m: f64,
    compliance_passes: bool,
    magnitude: f64,
    area_pixels: u64,
) -> ThreatResult {
    let base = EncroachmentCategory::parse(category).base_score();

    let distance = non_negative(distance_m);
    let dist_component = 50.0 * (1.0 - distance.min(100.0) / 100.0);

    let magnitude = non_negative(magnitude).min(255.0);
    let mag_component = (magnitude / 255.0 * 10.0).min(15.0);
    let area_component = (area_pixels as f64 / 1000.0).min(10.0);

    let (compliance_component, compliance_reason) = if compliance_passes {
        (-5.0, "compliant -5.0")
    } else {
        (10.0, "non_compliant +10.0")
    };

    let score = (base + dist_component + mag_component + area_component + compliance_component)
        .clamp(0.0, 100.0);
    let level = ThreatLevel::from_score(score);
    debug!("Threat for {category} at {distance:.1} m: {score:.1} ({level})");

    ThreatResult {
        score,
        level,
        reasons: vec![
            format!("base({category})={base:.1}"),
            format!("dist_component={dist_component:.1} (distance {distance:.1}m)"),
            format!("mag={mag_component:.1}"),
            format!("area={area_component:.1}"),
            compliance_reason.to_string(),
        ],
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}
