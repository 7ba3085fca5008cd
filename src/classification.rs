//! Failure mode classification and residual failure rates
//!
//! Each failure mode is classed as single-point, multiple-point (latent),
//! or both. The class carries the diagnostic mechanism covering it; the
//! residual rates derived here are the inputs to SPFM/LFM aggregation and
//! the PMHF calculation.

use crate::model::{FailureMode, ValidationError};
use serde::{Deserialize, Serialize};

/// A diagnostic safety mechanism and its coverage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticMechanism {
    /// Mechanism name (e.g. "ECC", "watchdog"); may be empty when a
    /// coverage figure was entered without naming the mechanism
    pub name: String,
    /// Diagnostic coverage in percent, within [0, 100]
    pub coverage: f64,
}

impl DiagnosticMechanism {
    /// Create a mechanism, rejecting coverage outside [0, 100]
    pub fn new(name: impl Into<String>, coverage: f64) -> Result<Self, ValidationError> {
        if !(0.0..=100.0).contains(&coverage) {
            return Err(ValidationError::CoverageOutOfRange(coverage));
        }
        Ok(Self {
            name: name.into(),
            coverage,
        })
    }

    /// Mechanism with no detection capability
    pub fn none() -> Self {
        Self {
            name: String::new(),
            coverage: 0.0,
        }
    }

    /// Fraction of faults this mechanism detects
    pub fn detected_fraction(&self) -> f64 {
        self.coverage / 100.0
    }

    /// Fraction of faults this mechanism leaves undetected
    pub fn undetected_fraction(&self) -> f64 {
        1.0 - self.coverage / 100.0
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=100.0).contains(&self.coverage) {
            return Err(ValidationError::CoverageOutOfRange(self.coverage));
        }
        Ok(())
    }
}

/// Failure class assignment for one failure mode
///
/// The class is a tagged variant so the "neither SPF nor MPF" case is
/// unrepresentable; each variant carries exactly the mechanisms it needs.
/// A `Dual` mode contributes to both residual pools independently, since
/// one fault can surface as a first or a latent fault depending on which
/// detection layer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FailureClassification {
    /// Single-point fault only
    SinglePoint { spf: DiagnosticMechanism },
    /// Multiple-point (latent) fault only
    MultiplePoint { mpf: DiagnosticMechanism },
    /// Both single-point and multiple-point
    Dual {
        spf: DiagnosticMechanism,
        mpf: DiagnosticMechanism,
    },
}

impl FailureClassification {
    /// Build a classification from the flag-based wire shape
    /// (`is_spf`/`is_mpf` booleans plus optional mechanisms). A missing
    /// mechanism on a set flag defaults to zero coverage; both flags
    /// unset is rejected.
    pub fn from_flags(
        is_spf: bool,
        is_mpf: bool,
        spf: Option<DiagnosticMechanism>,
        mpf: Option<DiagnosticMechanism>,
    ) -> Result<Self, ValidationError> {
        match (is_spf, is_mpf) {
            (true, true) => Ok(Self::Dual {
                spf: spf.unwrap_or_else(DiagnosticMechanism::none),
                mpf: mpf.unwrap_or_else(DiagnosticMechanism::none),
            }),
            (true, false) => Ok(Self::SinglePoint {
                spf: spf.unwrap_or_else(DiagnosticMechanism::none),
            }),
            (false, true) => Ok(Self::MultiplePoint {
                mpf: mpf.unwrap_or_else(DiagnosticMechanism::none),
            }),
            (false, false) => Err(ValidationError::NoFailureClass),
        }
    }

    /// Whether this mode contributes to the single-point pool
    pub fn is_single_point(&self) -> bool {
        matches!(self, Self::SinglePoint { .. } | Self::Dual { .. })
    }

    /// Whether this mode contributes to the multiple-point pool
    pub fn is_multiple_point(&self) -> bool {
        matches!(self, Self::MultiplePoint { .. } | Self::Dual { .. })
    }

    /// The mechanism covering single-point faults, if any
    pub fn spf_mechanism(&self) -> Option<&DiagnosticMechanism> {
        match self {
            Self::SinglePoint { spf } | Self::Dual { spf, .. } => Some(spf),
            Self::MultiplePoint { .. } => None,
        }
    }

    /// The mechanism covering multiple-point faults, if any
    pub fn mpf_mechanism(&self) -> Option<&DiagnosticMechanism> {
        match self {
            Self::MultiplePoint { mpf } | Self::Dual { mpf, .. } => Some(mpf),
            Self::SinglePoint { .. } => None,
        }
    }

    /// Re-check coverage ranges; needed because mechanism fields are
    /// public and may bypass [`DiagnosticMechanism::new`]
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(spf) = self.spf_mechanism() {
            spf.validate()?;
        }
        if let Some(mpf) = self.mpf_mechanism() {
            mpf.validate()?;
        }
        Ok(())
    }
}

/// Residual failure rate contributions of one failure mode, in FIT
///
/// The pools are independent: a `Dual` mode contributes its full rate to
/// both the single-point and the multiple-point split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeResiduals {
    /// Undetected single-point contribution (residual fault rate)
    pub spf_residual: f64,
    /// Undetected multiple-point contribution (latent fault rate)
    pub mpf_latent: f64,
    /// Detected multiple-point contribution
    pub mpf_detected: f64,
}

impl ModeResiduals {
    /// Residuals for a failure mode record
    pub fn of(mode: &FailureMode) -> Self {
        Self::from_rate(mode.failure_rate_total, &mode.classification)
    }

    /// Residuals for a raw rate (FIT) under a classification
    pub fn from_rate(rate_fit: f64, class: &FailureClassification) -> Self {
        let mut residuals = Self::default();
        if let Some(spf) = class.spf_mechanism() {
            residuals.spf_residual = rate_fit * spf.undetected_fraction();
        }
        if let Some(mpf) = class.mpf_mechanism() {
            residuals.mpf_latent = rate_fit * mpf.undetected_fraction();
            residuals.mpf_detected = rate_fit * mpf.detected_fraction();
        }
        residuals
    }
}
