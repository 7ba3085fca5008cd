//! ASIL (Automotive Safety Integrity Level) definitions and metric targets
//!
//! Implements ISO 26262 ASIL levels A through D with the conventional
//! hardware architectural metric targets used for pass/fail projection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// ASIL levels according to ISO 26262
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AsilLevel {
    /// Quality Management (QM) - No safety requirements
    QM,
    /// ASIL A - Lowest safety integrity level
    A,
    /// ASIL B - Low safety integrity level
    B,
    /// ASIL C - Medium safety integrity level
    C,
    /// ASIL D - Highest safety integrity level
    D,
}

impl fmt::Display for AsilLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsilLevel::A => write!(f, "ASIL A"),
            AsilLevel::B => write!(f, "ASIL B"),
            AsilLevel::C => write!(f, "ASIL C"),
            AsilLevel::D => write!(f, "ASIL D"),
            AsilLevel::QM => write!(f, "QM"),
        }
    }
}

/// Error for unrecognized ASIL level strings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized ASIL level '{0}'")]
pub struct ParseAsilError(pub String);

impl FromStr for AsilLevel {
    type Err = ParseAsilError;

    /// Accepts "ASIL A".."ASIL D", bare "A".."D", and "QM". An empty
    /// string maps to QM, matching records entered before a target level
    /// was assigned.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let level = trimmed
            .strip_prefix("ASIL ")
            .or_else(|| trimmed.strip_prefix("asil "))
            .unwrap_or(trimmed);
        match level.to_ascii_uppercase().as_str() {
            "A" => Ok(AsilLevel::A),
            "B" => Ok(AsilLevel::B),
            "C" => Ok(AsilLevel::C),
            "D" => Ok(AsilLevel::D),
            "QM" | "" => Ok(AsilLevel::QM),
            _ => Err(ParseAsilError(s.to_string())),
        }
    }
}

/// Hardware architectural metric targets for one ASIL level
///
/// SPFM/LFM minima are fractions of the total failure rate; the PMHF
/// ceiling is in failures per hour. `None` means the level imposes no
/// requirement on that metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricTargets {
    /// Minimum Single Point Fault Metric (fraction)
    pub spfm_min: Option<f64>,
    /// Minimum Latent Fault Metric (fraction)
    pub lfm_min: Option<f64>,
    /// Maximum probability of hazardous failure (per hour)
    pub pmhf_ceiling: Option<f64>,
}

impl AsilLevel {
    /// Get the conventional metric targets for this ASIL level
    ///
    /// Values follow the common industry mapping; callers needing a
    /// project-specific table apply overrides at calculation time.
    pub fn targets(&self) -> MetricTargets {
        match self {
            AsilLevel::QM => MetricTargets {
                spfm_min: None,
                lfm_min: None,
                pmhf_ceiling: None,
            },
            AsilLevel::A => MetricTargets {
                spfm_min: Some(0.90),
                lfm_min: Some(0.60),
                pmhf_ceiling: Some(1e-6),
            },
            AsilLevel::B => MetricTargets {
                spfm_min: Some(0.90),
                lfm_min: Some(0.80),
                pmhf_ceiling: Some(1e-7),
            },
            AsilLevel::C => MetricTargets {
                spfm_min: Some(0.97),
                lfm_min: Some(0.80),
                pmhf_ceiling: Some(1e-7),
            },
            AsilLevel::D => MetricTargets {
                spfm_min: Some(0.99),
                lfm_min: Some(0.90),
                pmhf_ceiling: Some(1e-8),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asil_ordering() {
        assert!(AsilLevel::D > AsilLevel::C);
        assert!(AsilLevel::C > AsilLevel::B);
        assert!(AsilLevel::B > AsilLevel::A);
        assert!(AsilLevel::A > AsilLevel::QM);
    }

    #[test]
    fn test_asil_targets() {
        let d = AsilLevel::D.targets();
        assert_eq!(d.spfm_min, Some(0.99));
        assert_eq!(d.lfm_min, Some(0.90));
        assert_eq!(d.pmhf_ceiling, Some(1e-8));

        let qm = AsilLevel::QM.targets();
        assert!(qm.spfm_min.is_none());
        assert!(qm.lfm_min.is_none());
        assert!(qm.pmhf_ceiling.is_none());
    }

    #[test]
    fn test_asil_parsing() {
        assert_eq!("ASIL D".parse::<AsilLevel>().unwrap(), AsilLevel::D);
        assert_eq!("B".parse::<AsilLevel>().unwrap(), AsilLevel::B);
        assert_eq!("asil c".parse::<AsilLevel>().unwrap(), AsilLevel::C);
        assert_eq!("".parse::<AsilLevel>().unwrap(), AsilLevel::QM);
        assert!("ASIL E".parse::<AsilLevel>().is_err());
    }

    #[test]
    fn test_asil_display() {
        assert_eq!(AsilLevel::A.to_string(), "ASIL A");
        assert_eq!(AsilLevel::QM.to_string(), "QM");
    }
}
