//! Minimum setback compliance

use serde::Serialize;

/// Outcome of a setback check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceVerdict {
    pub passes: bool,
    pub explanation: String,
}

/// Check a distance against the minimum setback.
///
/// Passes when `distance_m >= minimum_setback_m`. Negative distances count
/// as 0; a NaN distance never passes.
pub fn check_setback(distance_m: f64, minimum_setback_m: f64) -> ComplianceVerdict {
    let distance = if distance_m < 0.0 { 0.0 } else { distance_m };
    let passes = distance >= minimum_setback_m;
    let op = if passes { ">=" } else { "<" };
    ComplianceVerdict {
        passes,
        explanation: format!("distance {distance:.1}m {op} setback {minimum_setback_m:.1}m"),
    }
}

impl ComplianceVerdict {
    /// Replace the outcome with an externally supplied one.
    ///
    /// The explanation keeps the measured comparison and states the
    /// override; an override that agrees with the check changes nothing.
    pub fn overridden(self, passes: bool) -> Self {
        if passes == self.passes {
            return self;
        }
        let outcome = if passes { "pass" } else { "fail" };
        ComplianceVerdict {
            passes,
            explanation: format!("overridden to {outcome} ({})", self.explanation),
        }
    }
}
