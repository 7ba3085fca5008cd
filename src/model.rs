//! FMEDA domain entities
//!
//! Projects own safety functions and components; components own failure
//! modes. Safety functions may additionally be linked to the components
//! they depend on, which scopes metric calculation to that subset.

use crate::asil::AsilLevel;
use crate::classification::FailureClassification;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store-assigned entity identifier
pub type EntityId = u64;

/// Structured validation failure, rejected at entity creation/update
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("failure rate must be non-negative, got {0}")]
    NegativeFailureRate(f64),
    #[error("diagnostic coverage must be within [0, 100], got {0}")]
    CoverageOutOfRange(f64),
    #[error("failure mode must be classified as SPF, MPF, or both")]
    NoFailureClass,
    #[error("duplicate failure mode description '{0}' on component '{1}'")]
    DuplicateDescription(String, String),
    #[error("duplicate component id '{0}' in project")]
    DuplicateComponentId(String),
    #[error("duplicate safety function id '{0}' in project")]
    DuplicateSafetyFunctionId(String),
    #[error("project name must not be empty")]
    EmptyProjectName,
    #[error("project lifetime must be non-negative, got {0}")]
    NegativeLifetime(f64),
    #[error("component {component} and safety function {safety_function} belong to different projects")]
    CrossProjectLink {
        component: EntityId,
        safety_function: EntityId,
    },
}

/// A project owning all analysis entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    /// Operating lifetime in hours; 0 means not yet set
    pub lifetime_hours: f64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Project {
    /// Lifetime usable for analysis, or `None` while unset
    ///
    /// Data entry is sequenced by the caller but not enforced at the
    /// storage layer, so a zero lifetime is stored as entered and only
    /// the calculator treats it as missing.
    pub fn lifetime(&self) -> Option<f64> {
        if self.lifetime_hours > 0.0 {
            Some(self.lifetime_hours)
        } else {
            None
        }
    }
}

/// A safety function with a target integrity level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyFunction {
    pub id: EntityId,
    pub project_id: EntityId,
    /// User-facing identifier, unique within the project
    pub sf_id: String,
    pub description: String,
    pub target_integrity_level: AsilLevel,
    /// Components this function depends on; empty means the function is
    /// assessed against the whole project
    pub related_components: Vec<EntityId>,
}

/// A hardware component contributing failure rate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub id: EntityId,
    pub project_id: EntityId,
    /// User-facing identifier, unique within the project
    pub comp_id: String,
    pub component_type: String,
    /// Base failure rate in FIT (failures per 10^9 hours)
    pub failure_rate: f64,
    pub is_safety_related: bool,
}

/// A failure mode of one component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureMode {
    pub id: EntityId,
    pub component_id: EntityId,
    /// Unique per owning component, compared case-insensitively
    pub description: String,
    /// Total rate of this mode in FIT
    pub failure_rate_total: f64,
    pub system_level_effect: String,
    pub classification: FailureClassification,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// A component together with its failure modes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub component: Component,
    pub failure_modes: Vec<FailureMode>,
}

/// Fully materialized, immutable input set for one calculation
///
/// The calling layer is responsible for producing this atomically; the
/// engine assumes no edits happen for the duration of one pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub project: Project,
    pub safety_functions: Vec<SafetyFunction>,
    pub components: Vec<ComponentRecord>,
}
