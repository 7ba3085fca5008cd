//! Verdict projection against ASIL targets
//!
//! Compares computed metrics with the target table for a safety
//! function's integrity level and emits PASS, FAIL, or INSUFFICIENT_DATA.

use crate::asil::{AsilLevel, MetricTargets};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of assessing one safety function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// All applicable targets met
    Pass,
    /// At least one target missed
    Fail,
    /// Lifetime or failure rate data missing; no numeric comparison made
    InsufficientData,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Fail => write!(f, "FAIL"),
            Verdict::InsufficientData => write!(f, "INSUFFICIENT_DATA"),
        }
    }
}

/// Per-calculation overrides for the conventional ASIL target table
///
/// The standard mapping is a convention, not a constant; projects with a
/// contracted table set the values here and they replace the defaults for
/// every level in that calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetOverrides {
    /// Override minimum SPFM (fraction)
    pub spfm_min: Option<f64>,
    /// Override minimum LFM (fraction)
    pub lfm_min: Option<f64>,
    /// Override PMHF ceiling (per hour)
    pub pmhf_ceiling: Option<f64>,
}

impl TargetOverrides {
    fn apply(&self, mut targets: MetricTargets) -> MetricTargets {
        if self.spfm_min.is_some() {
            targets.spfm_min = self.spfm_min;
        }
        if self.lfm_min.is_some() {
            targets.lfm_min = self.lfm_min;
        }
        if self.pmhf_ceiling.is_some() {
            targets.pmhf_ceiling = self.pmhf_ceiling;
        }
        targets
    }
}

/// Assess computed metrics against the targets for one integrity level
///
/// A missing lifetime or an absent metric (zero total failure rate)
/// short-circuits to `InsufficientData`; division-by-zero states never
/// reach a numeric comparison.
pub fn assess(
    level: AsilLevel,
    spfm: Option<f64>,
    lfm: Option<f64>,
    pmhf: Option<f64>,
    lifetime_hours: Option<f64>,
    overrides: &TargetOverrides,
) -> Verdict {
    if lifetime_hours.is_none() {
        return Verdict::InsufficientData;
    }
    let (Some(spfm), Some(lfm)) = (spfm, lfm) else {
        return Verdict::InsufficientData;
    };

    let targets = overrides.apply(level.targets());

    if let Some(min) = targets.spfm_min {
        if spfm < min {
            return Verdict::Fail;
        }
    }
    if let Some(min) = targets.lfm_min {
        if lfm < min {
            return Verdict::Fail;
        }
    }
    if let Some(ceiling) = targets.pmhf_ceiling {
        match pmhf {
            Some(rate) if rate >= ceiling => return Verdict::Fail,
            Some(_) => {}
            None => return Verdict::InsufficientData,
        }
    }

    Verdict::Pass
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_OVERRIDES: TargetOverrides = TargetOverrides {
        spfm_min: None,
        lfm_min: None,
        pmhf_ceiling: None,
    };

    #[test]
    fn test_asil_d_fails_below_spfm_target() {
        let verdict = assess(
            AsilLevel::D,
            Some(0.95),
            Some(0.95),
            Some(1e-9),
            Some(10000.0),
            &NO_OVERRIDES,
        );
        assert_eq!(verdict, Verdict::Fail);
    }

    #[test]
    fn test_asil_d_passes_at_targets() {
        let verdict = assess(
            AsilLevel::D,
            Some(0.995),
            Some(0.92),
            Some(5e-9),
            Some(10000.0),
            &NO_OVERRIDES,
        );
        assert_eq!(verdict, Verdict::Pass);
    }

    #[test]
    fn test_pmhf_ceiling_enforced() {
        let verdict = assess(
            AsilLevel::D,
            Some(0.995),
            Some(0.92),
            Some(2e-8),
            Some(10000.0),
            &NO_OVERRIDES,
        );
        assert_eq!(verdict, Verdict::Fail);
    }

    #[test]
    fn test_missing_metrics_are_insufficient_data() {
        let verdict = assess(AsilLevel::B, None, None, None, Some(10000.0), &NO_OVERRIDES);
        assert_eq!(verdict, Verdict::InsufficientData);
    }

    #[test]
    fn test_missing_lifetime_is_insufficient_data() {
        let verdict = assess(
            AsilLevel::B,
            Some(0.99),
            Some(0.95),
            Some(1e-9),
            None,
            &NO_OVERRIDES,
        );
        assert_eq!(verdict, Verdict::InsufficientData);
    }

    #[test]
    fn test_qm_passes_with_data() {
        let verdict = assess(
            AsilLevel::QM,
            Some(0.1),
            Some(0.1),
            Some(1.0),
            Some(1.0),
            &NO_OVERRIDES,
        );
        assert_eq!(verdict, Verdict::Pass);
    }

    #[test]
    fn test_overrides_replace_table() {
        let overrides = TargetOverrides {
            spfm_min: Some(0.50),
            lfm_min: Some(0.50),
            pmhf_ceiling: Some(1e-3),
        };
        let verdict = assess(
            AsilLevel::D,
            Some(0.60),
            Some(0.60),
            Some(1e-6),
            Some(10000.0),
            &overrides,
        );
        assert_eq!(verdict, Verdict::Pass);
    }
}
