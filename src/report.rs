//! Plain-text results report

use crate::engine::FmedaResults;
use std::fmt::Write as _;

fn fmt_fraction(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => "N/A".to_string(),
    }
}

fn fmt_rate(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.3e} /h", v),
        None => "N/A".to_string(),
    }
}

/// Format a calculation result as a human-readable report
pub fn format_results_report(results: &FmedaResults) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "=== FMEDA Results: {} ===", results.project_name);
    match results.lifetime_hours {
        Some(hours) => {
            let _ = writeln!(output, "Lifetime: {} h", hours);
        }
        None => {
            let _ = writeln!(output, "Lifetime: NOT SET");
        }
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "Project metrics:");
    let _ = writeln!(output, "  SPFM: {}", fmt_fraction(results.spfm));
    let _ = writeln!(output, "  LFM:  {}", fmt_fraction(results.lfm));
    let _ = writeln!(output, "  PMHF: {}", fmt_rate(results.pmhf));
    let _ = writeln!(
        output,
        "  MPHF: {}",
        match results.mphf {
            Some(v) => format!("{:.3e}", v),
            None => "N/A".to_string(),
        }
    );
    let _ = writeln!(output);

    let _ = writeln!(output, "Components:");
    let _ = writeln!(output, "{}", "-".repeat(72));
    for comp in results.aggregate.components.values() {
        let _ = writeln!(
            output,
            "  {:<16} rate {:>10.2} FIT  modes {:>3}  residual SPF {:>10.2}  latent MPF {:>10.2}",
            comp.comp_id, comp.mode_rate_total, comp.mode_count, comp.spf_residual, comp.mpf_latent
        );
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "Safety functions:");
    let _ = writeln!(output, "{}", "-".repeat(72));
    for sf in &results.safety_functions {
        let _ = writeln!(
            output,
            "  {:<12} {:<8} SPFM {:<8} LFM {:<8} -> {}",
            sf.sf_id,
            sf.target_integrity_level.to_string(),
            fmt_fraction(sf.spfm),
            fmt_fraction(sf.lfm),
            sf.verdict
        );
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asil::AsilLevel;
    use crate::engine::{FmedaEngine, SafetyFunctionResult};
    use crate::model::{Project, ProjectSnapshot, SafetyFunction};
    use crate::verdict::Verdict;
    use chrono::Utc;

    #[test]
    fn test_report_contains_na_for_empty_project() {
        let now = Utc::now();
        let snapshot = ProjectSnapshot {
            project: Project {
                id: 1,
                name: "empty".to_string(),
                lifetime_hours: 0.0,
                created_at: now,
                modified_at: now,
            },
            safety_functions: vec![SafetyFunction {
                id: 2,
                project_id: 1,
                sf_id: "SF1".to_string(),
                description: String::new(),
                target_integrity_level: AsilLevel::D,
                related_components: vec![],
            }],
            components: vec![],
        };
        let results = FmedaEngine::default().calculate(&snapshot);
        let report = format_results_report(&results);
        assert!(report.contains("FMEDA Results: empty"));
        assert!(report.contains("Lifetime: NOT SET"));
        assert!(report.contains("SPFM: N/A"));
        assert!(report.contains("INSUFFICIENT_DATA"));
        assert!(report.contains("ASIL D"));
    }

    #[test]
    fn test_report_formats_verdict_line() {
        let sf = SafetyFunctionResult {
            sf_id: "SF2".to_string(),
            target_integrity_level: AsilLevel::B,
            spfm: Some(0.95),
            lfm: Some(0.85),
            pmhf: Some(1e-9),
            mphf: Some(1e-5),
            verdict: Verdict::Pass,
            scoped: true,
        };
        let results = FmedaResults {
            project_id: 1,
            project_name: "demo".to_string(),
            lifetime_hours: Some(10000.0),
            spfm: Some(0.95),
            lfm: Some(0.85),
            pmhf: Some(1e-9),
            mphf: Some(1e-5),
            aggregate: crate::aggregate::ScopeAggregate::over(std::iter::empty()),
            safety_functions: vec![sf],
        };
        let report = format_results_report(&results);
        assert!(report.contains("SPFM: 95.00%"));
        assert!(report.contains("PASS"));
    }
}
