//! One-shot FMEDA calculation over a project snapshot
//!
//! The engine is stateless apart from its configuration: running the same
//! snapshot twice yields bit-identical results.

use crate::aggregate::ScopeAggregate;
use crate::asil::AsilLevel;
use crate::model::{ComponentRecord, EntityId, ProjectSnapshot, SafetyFunction};
use crate::pmhf::{calculate_pmhf, PmhfModel};
use crate::verdict::{assess, TargetOverrides, Verdict};
use serde::{Deserialize, Serialize};

/// Configuration for one calculation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CalcConfig {
    /// PMHF model to apply
    pub pmhf_model: PmhfModel,
    /// Replacements for the conventional ASIL target table
    pub target_overrides: TargetOverrides,
}

/// Structured result for one project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FmedaResults {
    pub project_id: EntityId,
    pub project_name: String,
    /// Lifetime used for MPHF, `None` while unset
    pub lifetime_hours: Option<f64>,
    /// Project-wide metrics; `None` means N/A (no failure rate entered)
    pub spfm: Option<f64>,
    pub lfm: Option<f64>,
    pub pmhf: Option<f64>,
    pub mphf: Option<f64>,
    /// Project-wide rollup with per-component breakdown
    pub aggregate: ScopeAggregate,
    pub safety_functions: Vec<SafetyFunctionResult>,
}

/// Result for one safety function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyFunctionResult {
    pub sf_id: String,
    pub target_integrity_level: AsilLevel,
    /// Metrics over the function's scope (linked components, or the
    /// whole project when no links exist)
    pub spfm: Option<f64>,
    pub lfm: Option<f64>,
    pub pmhf: Option<f64>,
    pub mphf: Option<f64>,
    pub verdict: Verdict,
    /// True when metrics were computed over explicitly linked components
    pub scoped: bool,
}

/// FMEDA calculation engine
#[derive(Debug, Clone, Default)]
pub struct FmedaEngine {
    config: CalcConfig,
}

impl FmedaEngine {
    pub fn new(config: CalcConfig) -> Self {
        Self { config }
    }

    /// Run the full calculation for one project snapshot
    pub fn calculate(&self, snapshot: &ProjectSnapshot) -> FmedaResults {
        tracing::debug!(
            project = %snapshot.project.name,
            components = snapshot.components.len(),
            safety_functions = snapshot.safety_functions.len(),
            "running FMEDA calculation"
        );

        let lifetime = snapshot.project.lifetime();
        let project_agg = ScopeAggregate::over(snapshot.components.iter());
        let project_pmhf = calculate_pmhf(self.config.pmhf_model, &project_agg, lifetime);
        let project_spfm = project_agg.spfm();
        let project_lfm = project_agg.lfm();

        let safety_functions = snapshot
            .safety_functions
            .iter()
            .map(|sf| {
                self.assess_safety_function(sf, snapshot, &project_agg, lifetime)
            })
            .collect();

        FmedaResults {
            project_id: snapshot.project.id,
            project_name: snapshot.project.name.clone(),
            lifetime_hours: lifetime,
            spfm: project_spfm,
            lfm: project_lfm,
            pmhf: project_pmhf.pmhf,
            mphf: project_pmhf.mphf,
            aggregate: project_agg,
            safety_functions,
        }
    }

    /// Assess one safety function, scoping metrics to its linked
    /// components when links exist
    fn assess_safety_function(
        &self,
        sf: &SafetyFunction,
        snapshot: &ProjectSnapshot,
        project_agg: &ScopeAggregate,
        lifetime: Option<f64>,
    ) -> SafetyFunctionResult {
        let scoped = !sf.related_components.is_empty();
        let scope_agg;
        let agg = if scoped {
            let linked: Vec<&ComponentRecord> = snapshot
                .components
                .iter()
                .filter(|record| sf.related_components.contains(&record.component.id))
                .collect();
            scope_agg = ScopeAggregate::over(linked.into_iter());
            &scope_agg
        } else {
            project_agg
        };

        let pmhf = calculate_pmhf(self.config.pmhf_model, agg, lifetime);
        let spfm = agg.spfm();
        let lfm = agg.lfm();
        let verdict = assess(
            sf.target_integrity_level,
            spfm,
            lfm,
            pmhf.pmhf,
            lifetime,
            &self.config.target_overrides,
        );

        SafetyFunctionResult {
            sf_id: sf.sf_id.clone(),
            target_integrity_level: sf.target_integrity_level,
            spfm,
            lfm,
            pmhf: pmhf.pmhf,
            mphf: pmhf.mphf,
            verdict,
            scoped,
        }
    }
}
