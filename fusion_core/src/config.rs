// fusion_core/src/config.rs

//! Tunable tolerances for the numerical kernels.
//!
//! The defaults are what the estimator runs with; a TOML file can override
//! any subset of them.

use std::path::Path;

use figment::{
    providers::{Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::error::{FusionError, Result};
use crate::math::DEFAULT_MAT_EXP_ORDER;

/// Default absolute tolerance on `|P - Pᵀ|`, scaled by the largest entry of `P`.
pub const DEFAULT_SYMMETRY_TOLERANCE: f64 = 1e-9;
/// Eigenvalues down to `-psd_tolerance` are treated as zero.
pub const DEFAULT_PSD_TOLERANCE: f64 = 1e-12;
/// Largest accepted `λ_max / λ_min` when the condition number is checked.
pub const DEFAULT_MAX_CONDITION_NUMBER: f64 = 1e12;

/// # KernelConfig
/// Tolerances used by the covariance checks and the default order of the
/// truncated matrix exponential.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KernelConfig {
    pub symmetry_tolerance: f64,
    pub psd_tolerance: f64,
    pub max_condition_number: f64,
    /// Number of Taylor terms used by propagation when no order is given.
    pub mat_exp_order: u32,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            symmetry_tolerance: DEFAULT_SYMMETRY_TOLERANCE,
            psd_tolerance: DEFAULT_PSD_TOLERANCE,
            max_condition_number: DEFAULT_MAX_CONDITION_NUMBER,
            mat_exp_order: DEFAULT_MAT_EXP_ORDER,
        }
    }
}

impl KernelConfig {
    /// Loads the configuration from a TOML file. Missing keys keep their defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = Figment::new().merge(Toml::file(path.as_ref())).extract()?;
        config.validate()
    }

    /// Parses the configuration from an in-memory TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = Figment::new().merge(Toml::string(source)).extract()?;
        config.validate()
    }

    fn validate(self) -> Result<Self> {
        if self.mat_exp_order < 1 {
            return Err(FusionError::InvalidSeriesOrder {
                order: self.mat_exp_order,
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = KernelConfig::from_toml_str("").unwrap();
        assert_eq!(config, KernelConfig::default());
        assert_eq!(config.mat_exp_order, 4);
    }

    #[test]
    fn partial_document_overrides_only_given_keys() {
        let config = KernelConfig::from_toml_str(
            r#"
            max_condition_number = 1e6
            mat_exp_order = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.max_condition_number, 1e6);
        assert_eq!(config.mat_exp_order, 8);
        assert_eq!(config.symmetry_tolerance, DEFAULT_SYMMETRY_TOLERANCE);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = KernelConfig::from_toml_str("unknown_knob = 3").unwrap_err();
        assert!(matches!(err, FusionError::Config(_)));
    }

    #[test]
    fn zero_series_order_is_rejected_on_load() {
        let err = KernelConfig::from_toml_str("mat_exp_order = 0").unwrap_err();
        assert!(matches!(err, FusionError::InvalidSeriesOrder { order: 0 }));
    }

    #[test]
    fn missing_file_yields_defaults() {
        // A missing file is an empty provider for figment.
        let config = KernelConfig::from_toml_file("does/not/exist.toml").unwrap();
        assert_eq!(config, KernelConfig::default());
    }
}
