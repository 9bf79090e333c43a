//! Bootstrap and curve configuration.
//!
//! Both structs load from TOML or JSON; missing fields take their defaults.
//!
//! ```toml
//! trait_kind = "ZeroYield"
//! day_count = "Act365Fixed"
//! jump_dates = ["2025-12-31"]
//!
//! [bootstrap]
//! accuracy = 1e-12
//! interpolation = "Linear"
//! ```

use std::path::Path;

use pillar_core::daycounts::DayCountConvention;
use pillar_core::types::Date;
use pillar_math::solvers::SolverConfig;
use serde::{Deserialize, Serialize};

use crate::bootstrap::{BootstrapTrait, TraitKind};
use crate::error::{CurveError, CurveResult};
use crate::interpolation::InterpolationMethod;

/// Settings for one bootstrap pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Residual tolerance for each segment
    #[serde(default = "default_accuracy")]
    pub accuracy: f64,

    /// Solver iteration budget for each segment
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Largest rate used to bracket node values
    #[serde(default = "default_max_rate")]
    pub max_rate: f64,

    /// Interpolation over curve nodes
    #[serde(default)]
    pub interpolation: InterpolationMethod,

    /// Curve-level extrapolation policy
    #[serde(default)]
    pub allow_extrapolation: bool,
}

fn default_accuracy() -> f64 {
    1e-12
}

fn default_max_iterations() -> u32 {
    100
}

fn default_max_rate() -> f64 {
    1.0
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            accuracy: default_accuracy(),
            max_iterations: default_max_iterations(),
            max_rate: default_max_rate(),
            interpolation: InterpolationMethod::default(),
            allow_extrapolation: false,
        }
    }
}

impl BootstrapConfig {
    /// Sets the accuracy.
    #[must_use]
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy;
        self
    }

    /// Sets the interpolation.
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: InterpolationMethod) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Sets the per-segment iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the bracketing rate.
    #[must_use]
    pub fn with_max_rate(mut self, max_rate: f64) -> Self {
        self.max_rate = max_rate;
        self
    }

    /// Sets the extrapolation policy.
    #[must_use]
    pub fn with_extrapolation(mut self, allow: bool) -> Self {
        self.allow_extrapolation = allow;
        self
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfig`] for a non-positive accuracy or
    /// max rate, or a zero iteration budget.
    pub fn validate(&self) -> CurveResult<()> {
        if !(self.accuracy > 0.0 && self.accuracy.is_finite()) {
            return Err(CurveError::invalid_config(format!(
                "accuracy must be positive, got {}",
                self.accuracy
            )));
        }
        if self.max_iterations == 0 {
            return Err(CurveError::invalid_config("max_iterations must be at least 1"));
        }
        if !(self.max_rate > 0.0 && self.max_rate.is_finite()) {
            return Err(CurveError::invalid_config(format!(
                "max_rate must be positive, got {}",
                self.max_rate
            )));
        }
        Ok(())
    }

    /// Solver settings for one segment.
    #[must_use]
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::default()
            .with_tolerance(self.accuracy)
            .with_max_iterations(self.max_iterations)
    }
}

/// Everything about a curve that does not come from market quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CurveConfig {
    /// Quantity stored on the nodes
    #[serde(default)]
    pub trait_kind: TraitKind,

    /// Day count of curve time
    #[serde(default)]
    pub day_count: DayCountConvention,

    /// Explicit jump dates; empty for year-end defaults
    #[serde(default)]
    pub jump_dates: Vec<Date>,

    /// Bootstrap settings
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl CurveConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> CurveResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| CurveError::invalid_config(format!("TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON document.
    pub fn from_json_str(content: &str) -> CurveResult<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| CurveError::invalid_config(format!("JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the bootstrap settings and the trait/interpolation pairing.
    pub fn validate(&self) -> CurveResult<()> {
        self.bootstrap.validate()?;
        self.trait_kind
            .strategy()
            .supports(self.bootstrap.interpolation)
    }

    /// Loads a `.toml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> CurveResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CurveError::invalid_config(format!("cannot read {}: {e}", path.display()))
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> CurveResult<String> {
        toml::to_string(self).map_err(|e| CurveError::invalid_config(format!("TOML: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BootstrapConfig::default();
        assert_eq!(config.accuracy, 1e-12);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.max_rate, 1.0);
        assert_eq!(config.interpolation, InterpolationMethod::LogLinear);
        assert!(!config.allow_extrapolation);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = BootstrapConfig::default();
        assert!(base.with_accuracy(0.0).validate().unwrap_err().is_configuration());
        assert!(base.with_accuracy(f64::NAN).validate().is_err());
        assert!(base.with_max_iterations(0).validate().is_err());
        assert!(base.with_max_rate(-0.5).validate().is_err());
    }

    #[test]
    fn test_toml_with_partial_fields() {
        let config = CurveConfig::from_toml_str(
            r#"
            trait_kind = "ForwardRate"
            jump_dates = ["2025-12-31", "2026-12-31"]

            [bootstrap]
            interpolation = "BackwardFlat"
            max_rate = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.trait_kind, TraitKind::ForwardRate);
        assert_eq!(config.day_count, DayCountConvention::Act365Fixed);
        assert_eq!(config.jump_dates.len(), 2);
        assert_eq!(config.bootstrap.interpolation, InterpolationMethod::BackwardFlat);
        assert_eq!(config.bootstrap.max_rate, 0.5);
        assert_eq!(config.bootstrap.accuracy, 1e-12);
    }

    #[test]
    fn test_json_and_round_trip() {
        let config = CurveConfig::from_json_str(
            r#"{"trait_kind": "ZeroYield", "bootstrap": {"interpolation": "CubicSpline"}}"#,
        )
        .unwrap();
        assert_eq!(config.trait_kind, TraitKind::ZeroYield);

        let text = config.to_toml_string().unwrap();
        assert_eq!(CurveConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_documents() {
        assert!(CurveConfig::from_toml_str("[bootstrap]\naccuracy = -1.0")
            .unwrap_err()
            .is_configuration());
        assert!(CurveConfig::from_json_str("{not json").is_err());
        assert!(CurveConfig::from_toml_str("trait_kind = \"Hazard\"").is_err());
        // rate traits cannot use the default log-linear interpolation
        assert!(matches!(
            CurveConfig::from_toml_str("trait_kind = \"ZeroYield\""),
            Err(CurveError::UnsupportedInterpolation { .. })
        ));
        // discount factors cannot be backward-flat
        assert!(matches!(
            CurveConfig::from_toml_str("[bootstrap]\ninterpolation = \"BackwardFlat\""),
            Err(CurveError::UnsupportedInterpolation { .. })
        ));
    }
}
