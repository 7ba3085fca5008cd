//! # FMEDA Aggregation Engine
//!
//! ISO 26262-style FMEDA (Failure Mode, Effects, and Diagnostic Analysis)
//! computation for safety engineering records. Aggregates component failure
//! rates and per-failure-mode diagnostic coverage into hardware
//! architectural metrics (SPFM, LFM, PMHF/MPHF) and projects them against
//! each safety function's target ASIL.
//!
//! The engine is a pure, synchronous, single-pass computation over an
//! immutable snapshot of one project's entities. Transport, persistence,
//! and UI concerns live outside this crate.

use thiserror::Error;

pub mod aggregate;
pub mod asil;
pub mod classification;
pub mod engine;
pub mod model;
pub mod pmhf;
pub mod report;
pub mod store;
pub mod verdict;

pub use aggregate::ScopeAggregate;
pub use asil::{AsilLevel, MetricTargets};
pub use classification::{DiagnosticMechanism, FailureClassification, ModeResiduals};
pub use engine::{CalcConfig, FmedaEngine, FmedaResults, SafetyFunctionResult};
pub use model::{
    Component, ComponentRecord, EntityId, FailureMode, Project, ProjectSnapshot, SafetyFunction,
    ValidationError,
};
pub use pmhf::{PmhfModel, PmhfResult};
pub use report::format_results_report;
pub use store::ProjectStore;
pub use verdict::{TargetOverrides, Verdict};

/// FMEDA engine errors
#[derive(Error, Debug)]
pub enum FmedaError {
    #[error("validation failed: {0}")]
    Validation(#[from] model::ValidationError),
    #[error("unknown project id {0}")]
    UnknownProject(model::EntityId),
    #[error("unknown safety function id {0}")]
    UnknownSafetyFunction(model::EntityId),
    #[error("unknown component id {0}")]
    UnknownComponent(model::EntityId),
    #[error("unknown failure mode id {0}")]
    UnknownFailureMode(model::EntityId),
}

pub type FmedaResult<T> = Result<T, FmedaError>;
