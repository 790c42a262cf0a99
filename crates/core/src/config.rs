//! Pipeline, compliance and scoring settings
//!
//! Settings are plain values threaded through each call; nothing here is
//! process-global. Files are YAML mappings; sections this crate does not
//! know about (alerting, reporting, ...) are ignored so a shared settings
//! file can carry them.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Default location of the settings file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "configs/settings.yaml";

/// All RowGuard settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pipeline: PipelineSettings,
    pub compliance: ComplianceSettings,
    pub scoring: ScoringSettings,
}

/// Change detection and corridor buffer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Half-width of the corridor buffer, in metres
    #[serde(alias = "pipeline_buffer_meters")]
    pub corridor_buffer_meters: f64,
    /// Smallest change region kept, in pixels
    #[serde(alias = "min_contour_area")]
    pub min_region_area: u64,
    /// Minimum absolute intensity difference counted as change
    pub change_threshold: u8,
    /// Side of the square structuring element used for mask cleanup
    #[serde(alias = "morphological_kernel")]
    pub morphology_kernel_size: usize,
    /// Regions a classifier rates below this are dropped before scoring
    pub min_true_positive_probability: f64,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            corridor_buffer_meters: 15.0,
            min_region_area: 200,
            change_threshold: 30,
            morphology_kernel_size: 3,
            min_true_positive_probability: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceSettings {
    /// Minimum required distance between an encroachment and the corridor
    pub setback_meters: f64,
}

impl Default for ComplianceSettings {
    fn default() -> Self {
        Self { setback_meters: 15.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    /// Distance assumed when no event location or corridor is available
    pub default_distance_m: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self { default_distance_m: 100.0 }
    }
}

impl Settings {
    /// Load settings from `path`, or from [`DEFAULT_CONFIG_PATH`] when `None`.
    ///
    /// A missing file is not an error: defaults are returned.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        if !path.exists() {
            info!("Config file {} not found; using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        let settings = Self::from_yaml_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse settings from YAML text; an empty document yields defaults
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        let settings = match value {
            serde_yaml::Value::Null => Self::default(),
            serde_yaml::Value::Mapping(_) => {
                serde_yaml::from_value(value).map_err(|e| Error::Config(e.to_string()))?
            }
            _ => return Err(Error::Config("settings must be a YAML mapping".to_string())),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        let p = &self.pipeline;
        if p.morphology_kernel_size == 0 {
            return Err(invalid("morphology_kernel_size", p.morphology_kernel_size, "must be at least 1"));
        }
        if !(p.corridor_buffer_meters >= 0.0) {
            return Err(invalid("corridor_buffer_meters", p.corridor_buffer_meters, "must be non-negative"));
        }
        if !(0.0..=1.0).contains(&p.min_true_positive_probability) {
            return Err(invalid(
                "min_true_positive_probability",
                p.min_true_positive_probability,
                "must be within [0, 1]",
            ));
        }
        if !(self.compliance.setback_meters >= 0.0) {
            return Err(invalid("setback_meters", self.compliance.setback_meters, "must be non-negative"));
        }
        if !(self.scoring.default_distance_m >= 0.0) {
            return Err(invalid("default_distance_m", self.scoring.default_distance_m, "must be non-negative"));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, value: impl ToString, reason: &str) -> Error {
    Error::InvalidParameter {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.pipeline.change_threshold, 30);
        assert_eq!(s.pipeline.min_region_area, 200);
        assert_eq!(s.pipeline.morphology_kernel_size, 3);
        assert_eq!(s.pipeline.corridor_buffer_meters, 15.0);
        assert_eq!(s.compliance.setback_meters, 15.0);
        assert_eq!(s.scoring.default_distance_m, 100.0);
    }

    #[test]
    fn test_legacy_key_names_and_unknown_sections() {
        let yaml = r#"
app:
  reports_dir: reports
pipeline:
  pipeline_buffer_meters: 25
  min_contour_area: 50
  change_threshold: 12
  morphological_kernel: 5
alerts:
  sms: {enabled: false, to: []}
compliance:
  setback_meters: 30
"#;
        let s = Settings::from_yaml_str(yaml).unwrap();
        assert_eq!(s.pipeline.corridor_buffer_meters, 25.0);
        assert_eq!(s.pipeline.min_region_area, 50);
        assert_eq!(s.pipeline.change_threshold, 12);
        assert_eq!(s.pipeline.morphology_kernel_size, 5);
        assert_eq!(s.compliance.setback_meters, 30.0);
        assert_eq!(s.scoring, ScoringSettings::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let s = Settings::from_yaml_str("pipeline:\n  change_threshold: 40\n").unwrap();
        assert_eq!(s.pipeline.change_threshold, 40);
        assert_eq!(s.pipeline.min_region_area, 200);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(Settings::from_yaml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn test_non_mapping_rejected() {
        assert!(matches!(Settings::from_yaml_str("- 1\n- 2\n"), Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Settings::from_yaml_str("pipeline:\n  morphology_kernel_size: 0\n").is_err());
        assert!(Settings::from_yaml_str("compliance:\n  setback_meters: -1\n").is_err());
        assert!(Settings::from_yaml_str("pipeline:\n  min_true_positive_probability: 1.5\n").is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let s = Settings::load(Some(Path::new("/no/such/settings.yaml"))).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "compliance:\n  setback_meters: 22.5\n").unwrap();
        let s = Settings::load(Some(&path)).unwrap();
        assert_eq!(s.compliance.setback_meters, 22.5);
    }
}
