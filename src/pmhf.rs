//! PMHF and lifetime probability calculation
//!
//! Converts aggregated residual rates (FIT) into a probability of
//! hazardous failure per hour and, when a lifetime is available, the mean
//! probability over the operating life.

use crate::aggregate::ScopeAggregate;
use serde::{Deserialize, Serialize};

/// FIT is failures per 10^9 hours
const FIT_TO_PER_HOUR: f64 = 1e-9;

/// PMHF model selection
///
/// The interface only collects a lifetime, not a diagnostic test
/// interval, so the single-term form is the default. The dual-point form
/// reproduces the combinatorial model where a residual first fault
/// coincides with a latent fault over the exposure time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PmhfModel {
    /// PMHF = latent multiple-point residual rate, converted to /h
    #[default]
    SingleTerm,
    /// PMHF = residual single-point rate + latent x detected
    /// multiple-point rates weighted by the lifetime; requires a lifetime
    DualPoint,
}

/// Result of the PMHF calculation
///
/// `None` fields mean the required inputs were missing, reported as
/// insufficient data rather than a number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PmhfResult {
    /// Probability of hazardous failure per hour
    pub pmhf: Option<f64>,
    /// Mean probability of hazardous failure over the lifetime
    pub mphf: Option<f64>,
}

/// Calculate PMHF/MPHF for an aggregated scope
pub fn calculate_pmhf(
    model: PmhfModel,
    agg: &ScopeAggregate,
    lifetime_hours: Option<f64>,
) -> PmhfResult {
    let pmhf = match model {
        PmhfModel::SingleTerm => Some(agg.mpf_latent * FIT_TO_PER_HOUR),
        PmhfModel::DualPoint => lifetime_hours.map(|hours| {
            agg.spf_residual * FIT_TO_PER_HOUR
                + (agg.mpf_latent * FIT_TO_PER_HOUR) * (agg.mpf_detected * FIT_TO_PER_HOUR) * hours
        }),
    };

    let mphf = match (pmhf, lifetime_hours) {
        (Some(rate), Some(hours)) => Some(rate * hours),
        _ => None,
    };

    PmhfResult { pmhf, mphf }
}
