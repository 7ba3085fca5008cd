//! Failure-rate aggregation across components
//!
//! Rolls per-failure-mode residuals up to a scope (a whole project, or
//! the components linked to one safety function) and derives the
//! architectural metrics. Division by a zero total is never performed:
//! SPFM and LFM are `None` when no failure rate has been entered.

use crate::classification::ModeResiduals;
use crate::model::ComponentRecord;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Rollup for a single component, in FIT
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentAggregate {
    pub comp_id: String,
    /// Base failure rate as entered on the component
    pub failure_rate: f64,
    /// Sum of failure-mode rates; the metrics denominator contribution
    pub mode_rate_total: f64,
    pub spf_residual: f64,
    pub mpf_latent: f64,
    pub mpf_detected: f64,
    pub mode_count: usize,
}

/// Rollup over a set of components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeAggregate {
    /// Sum of failure-mode rates over all components (FIT); denominator
    /// for SPFM and LFM
    pub total_failure_rate: f64,
    /// Sum of component base failure rates as entered (FIT)
    pub component_rate_total: f64,
    /// Total undetected single-point rate (FIT)
    pub spf_residual: f64,
    /// Total undetected multiple-point rate (FIT)
    pub mpf_latent: f64,
    /// Total detected multiple-point rate (FIT)
    pub mpf_detected: f64,
    /// Per-component breakdown, keyed by comp_id in input order
    pub components: IndexMap<String, ComponentAggregate>,
}

impl ScopeAggregate {
    /// Aggregate over component records in their given order
    pub fn over<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ComponentRecord>,
    {
        let mut agg = Self {
            total_failure_rate: 0.0,
            component_rate_total: 0.0,
            spf_residual: 0.0,
            mpf_latent: 0.0,
            mpf_detected: 0.0,
            components: IndexMap::new(),
        };

        for record in records {
            let mut comp = ComponentAggregate {
                comp_id: record.component.comp_id.clone(),
                failure_rate: record.component.failure_rate,
                mode_rate_total: 0.0,
                spf_residual: 0.0,
                mpf_latent: 0.0,
                mpf_detected: 0.0,
                mode_count: record.failure_modes.len(),
            };

            for mode in &record.failure_modes {
                let residuals = ModeResiduals::of(mode);
                comp.mode_rate_total += mode.failure_rate_total;
                comp.spf_residual += residuals.spf_residual;
                comp.mpf_latent += residuals.mpf_latent;
                comp.mpf_detected += residuals.mpf_detected;
            }

            agg.total_failure_rate += comp.mode_rate_total;
            agg.component_rate_total += comp.failure_rate;
            agg.spf_residual += comp.spf_residual;
            agg.mpf_latent += comp.mpf_latent;
            agg.mpf_detected += comp.mpf_detected;
            agg.components.insert(comp.comp_id.clone(), comp);
        }

        agg
    }

    /// Single Point Fault Metric as a fraction in [0, 1]
    ///
    /// `None` when the total failure rate is zero; the caller reports
    /// this as N/A rather than a number.
    pub fn spfm(&self) -> Option<f64> {
        if self.total_failure_rate > 0.0 {
            Some(1.0 - self.spf_residual / self.total_failure_rate)
        } else {
            None
        }
    }

    /// Latent Fault Metric as a fraction in [0, 1]; `None` on zero total
    pub fn lfm(&self) -> Option<f64> {
        if self.total_failure_rate > 0.0 {
            Some(1.0 - self.mpf_latent / self.total_failure_rate)
        } else {
            None
        }
    }
}
