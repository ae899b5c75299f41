// fusion_core/src/math/covariance.rs

use std::fmt;

use nalgebra::DMatrix;
use tracing::warn;

use crate::config::KernelConfig;
use crate::error::{FusionError, Result};

/// The first property a covariance matrix failed in [`inspect_cov`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CovIssue {
    /// At least one entry is NaN or infinite.
    NonFinite,
    NotSquare { rows: usize, cols: usize },
    /// Largest `|P - Pᵀ|` entry exceeded the symmetry tolerance.
    NotSymmetric { max_asymmetry: f64 },
    /// Smallest eigenvalue is negative beyond the PSD tolerance.
    NotPositiveSemiDefinite { min_eigenvalue: f64 },
    IllConditioned { condition_number: f64, limit: f64 },
}

impl fmt::Display for CovIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => write!(f, "contains NaN or Inf entries"),
            Self::NotSquare { rows, cols } => write!(f, "is not square ({rows}x{cols})"),
            Self::NotSymmetric { max_asymmetry } => {
                write!(f, "is not symmetric (max asymmetry {max_asymmetry:e})")
            }
            Self::NotPositiveSemiDefinite { min_eigenvalue } => write!(
                f,
                "is not positive semi-definite (min eigenvalue {min_eigenvalue:e})"
            ),
            Self::IllConditioned {
                condition_number,
                limit,
            } => write!(
                f,
                "is ill-conditioned (condition number {condition_number:e} > {limit:e})"
            ),
        }
    }
}

/// Receives the diagnostic of a failed covariance check.
///
/// Any `Fn(&str, &CovIssue)` closure is a reporter, which is what tests use to
/// capture diagnostics instead of logging them.
pub trait CovReporter {
    fn report(&self, description: &str, issue: &CovIssue);
}

impl<F> CovReporter for F
where
    F: Fn(&str, &CovIssue),
{
    fn report(&self, description: &str, issue: &CovIssue) {
        self(description, issue)
    }
}

/// Default reporter: a `warn!` event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl CovReporter for TracingReporter {
    fn report(&self, description: &str, issue: &CovIssue) {
        warn!(covariance = description, "Covariance {description} {issue}");
    }
}

/// Checks `cov` without any side effect and returns the first violated property.
///
/// Checks run in order: finite entries, square shape, symmetry, positive
/// semi-definiteness, and (with `check_cond`) the condition number.
/// Tolerances are relative to the largest absolute entry when that exceeds one.
pub fn inspect_cov(
    cov: &DMatrix<f64>,
    check_cond: bool,
    config: &KernelConfig,
) -> Option<CovIssue> {
    if !cov.iter().all(|v| v.is_finite()) {
        return Some(CovIssue::NonFinite);
    }

    let (rows, cols) = cov.shape();
    if rows != cols {
        return Some(CovIssue::NotSquare { rows, cols });
    }
    if rows == 0 {
        return None;
    }

    let scale = cov.amax().max(1.0);

    let max_asymmetry = (cov - cov.transpose()).amax();
    if max_asymmetry > config.symmetry_tolerance * scale {
        return Some(CovIssue::NotSymmetric { max_asymmetry });
    }

    let eigenvalues = cov.symmetric_eigenvalues();
    let min_eigenvalue = eigenvalues.min();
    if min_eigenvalue < -config.psd_tolerance * scale {
        return Some(CovIssue::NotPositiveSemiDefinite { min_eigenvalue });
    }

    if check_cond {
        let max_eigenvalue = eigenvalues.max();
        let condition_number = if min_eigenvalue > 0.0 {
            max_eigenvalue / min_eigenvalue
        } else {
            f64::INFINITY
        };
        if condition_number > config.max_condition_number {
            return Some(CovIssue::IllConditioned {
                condition_number,
                limit: config.max_condition_number,
            });
        }
    }

    None
}

/// Validates a covariance matrix, logging a warning tagged with `description`
/// when it is invalid.
///
/// Returns `true` when the matrix is a valid covariance. Never mutates the
/// input and never fails; deciding what to do with a bad covariance is up to
/// the caller.
pub fn check_cov(cov: &DMatrix<f64>, description: &str, check_cond: bool) -> bool {
    check_cov_with(
        cov,
        description,
        check_cond,
        &KernelConfig::default(),
        &TracingReporter,
    )
}

/// [`check_cov`] with explicit tolerances and diagnostic sink.
pub fn check_cov_with(
    cov: &DMatrix<f64>,
    description: &str,
    check_cond: bool,
    config: &KernelConfig,
    reporter: &impl CovReporter,
) -> bool {
    match inspect_cov(cov, check_cond, config) {
        Some(issue) => {
            reporter.report(description, &issue);
            false
        }
        None => true,
    }
}

/// Symmetrizes a square matrix as `(M + Mᵀ) / 2`.
///
/// Returns an error when `mat` is not square.
pub fn enforce_matrix_symmetry(mat: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    let (rows, cols) = mat.shape();
    if rows != cols {
        return Err(FusionError::NotSquare { rows, cols });
    }
    Ok((mat + mat.transpose()) * 0.5)
}
