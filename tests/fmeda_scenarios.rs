//! End-to-end FMEDA scenarios through the store and engine

use fmeda_engine::{
    AsilLevel, CalcConfig, DiagnosticMechanism, FailureClassification, FmedaEngine, PmhfModel,
    ProjectStore, Verdict,
};

fn spf(coverage: f64) -> FailureClassification {
    FailureClassification::SinglePoint {
        spf: DiagnosticMechanism::new("checker", coverage).unwrap(),
    }
}

fn mpf(coverage: f64) -> FailureClassification {
    FailureClassification::MultiplePoint {
        mpf: DiagnosticMechanism::new("self test", coverage).unwrap(),
    }
}

#[test]
fn spfm_from_single_covered_mode() {
    // 100 FIT component, one SPF mode at 90% coverage: 10 FIT residual,
    // SPFM = 1 - 10/100 = 0.90
    let mut store = ProjectStore::new();
    let project = store.create_project("demo", 10000.0).unwrap();
    let component = store
        .create_component(project, "U1", "MCU", 100.0, true)
        .unwrap();
    store
        .create_failure_mode(component, "stuck-at", 100.0, "loss of output", spf(90.0))
        .unwrap();

    let results = FmedaEngine::default().calculate(&store.snapshot(project).unwrap());
    assert!((results.aggregate.spf_residual - 10.0).abs() < 1e-9);
    assert!((results.spfm.unwrap() - 0.90).abs() < 1e-9);
}

#[test]
fn pmhf_and_mphf_over_lifetime() {
    // 5000 FIT latent MPF = 5e-6 /h; over 20000 h the mean probability is 0.1
    let mut store = ProjectStore::new();
    let project = store.create_project("demo", 20000.0).unwrap();
    let component = store
        .create_component(project, "U1", "ASIC", 5000.0, true)
        .unwrap();
    store
        .create_failure_mode(component, "latent defect", 5000.0, "", mpf(0.0))
        .unwrap();

    let results = FmedaEngine::default().calculate(&store.snapshot(project).unwrap());
    assert!((results.pmhf.unwrap() - 5e-6).abs() < 1e-12);
    assert!((results.mphf.unwrap() - 0.1).abs() < 1e-9);
}

#[test]
fn asil_d_fails_below_spfm_threshold() {
    // SPFM of 0.95 misses the 0.99 ASIL D minimum
    let mut store = ProjectStore::new();
    let project = store.create_project("demo", 10000.0).unwrap();
    store
        .create_safety_function(project, "SF1", "braking", AsilLevel::D)
        .unwrap();
    let component = store
        .create_component(project, "U1", "MCU", 100.0, true)
        .unwrap();
    store
        .create_failure_mode(component, "stuck-at", 100.0, "", spf(95.0))
        .unwrap();

    let results = FmedaEngine::default().calculate(&store.snapshot(project).unwrap());
    assert!((results.spfm.unwrap() - 0.95).abs() < 1e-9);
    assert_eq!(results.safety_functions[0].verdict, Verdict::Fail);
}

#[test]
fn empty_project_reports_na_everywhere() {
    let mut store = ProjectStore::new();
    let project = store.create_project("empty", 10000.0).unwrap();
    store
        .create_safety_function(project, "SF1", "", AsilLevel::A)
        .unwrap();
    store
        .create_safety_function(project, "SF2", "", AsilLevel::D)
        .unwrap();

    let results = FmedaEngine::default().calculate(&store.snapshot(project).unwrap());
    assert!(results.spfm.is_none());
    assert!(results.lfm.is_none());
    for sf in &results.safety_functions {
        assert_eq!(sf.verdict, Verdict::InsufficientData);
    }
}

#[test]
fn missing_lifetime_withholds_mphf_but_not_metrics() {
    let mut store = ProjectStore::new();
    let project = store.create_project("no lifetime", 0.0).unwrap();
    store
        .create_safety_function(project, "SF1", "", AsilLevel::B)
        .unwrap();
    let component = store
        .create_component(project, "U1", "", 100.0, true)
        .unwrap();
    store
        .create_failure_mode(component, "fm", 100.0, "", spf(99.0))
        .unwrap();

    let results = FmedaEngine::default().calculate(&store.snapshot(project).unwrap());
    assert!(results.spfm.is_some());
    assert!(results.lfm.is_some());
    assert!(results.mphf.is_none());
    assert_eq!(
        results.safety_functions[0].verdict,
        Verdict::InsufficientData
    );
}

#[test]
fn dual_point_model_matches_hand_calculation() {
    let mut store = ProjectStore::new();
    let lifetime = 15000.0;
    let project = store.create_project("dual", lifetime).unwrap();
    let component = store
        .create_component(project, "U1", "", 1000.0, true)
        .unwrap();
    let class = FailureClassification::Dual {
        spf: DiagnosticMechanism::new("lockstep", 90.0).unwrap(),
        mpf: DiagnosticMechanism::new("bist", 60.0).unwrap(),
    };
    store
        .create_failure_mode(component, "fm", 1000.0, "", class)
        .unwrap();

    let engine = FmedaEngine::new(CalcConfig {
        pmhf_model: PmhfModel::DualPoint,
        ..Default::default()
    });
    let results = engine.calculate(&store.snapshot(project).unwrap());

    // spf residual 100 FIT, mpf latent 400 FIT, mpf detected 600 FIT
    let expected = 100.0e-9 + 400.0e-9 * 600.0e-9 * lifetime;
    assert!((results.pmhf.unwrap() - expected).abs() < 1e-15);
    assert!((results.mphf.unwrap() - expected * lifetime).abs() < 1e-12);
}

#[test]
fn recalculation_on_unchanged_store_is_bit_identical() {
    let mut store = ProjectStore::new();
    let project = store.create_project("stable", 20000.0).unwrap();
    store
        .create_safety_function(project, "SF1", "", AsilLevel::C)
        .unwrap();
    for (i, rate) in [120.0, 45.5, 300.25].iter().enumerate() {
        let component = store
            .create_component(project, &format!("U{}", i + 1), "IC", *rate, true)
            .unwrap();
        store
            .create_failure_mode(component, "short", *rate / 2.0, "", spf(87.5))
            .unwrap();
        store
            .create_failure_mode(component, "open", *rate / 2.0, "", mpf(62.5))
            .unwrap();
    }

    let engine = FmedaEngine::default();
    let snapshot = store.snapshot(project).unwrap();
    let first = serde_json::to_string(&engine.calculate(&snapshot)).unwrap();
    let second = serde_json::to_string(&engine.calculate(&store.snapshot(project).unwrap())).unwrap();
    assert_eq!(first, second);
}

#[test]
fn linked_safety_function_assessed_on_its_own_components() {
    let mut store = ProjectStore::new();
    let project = store.create_project("scoped", 10000.0).unwrap();
    let sf = store
        .create_safety_function(project, "SF1", "steering", AsilLevel::D)
        .unwrap();
    let covered = store
        .create_component(project, "U1", "", 100.0, true)
        .unwrap();
    let uncovered = store
        .create_component(project, "U2", "", 100.0, false)
        .unwrap();
    store
        .create_failure_mode(covered, "fm", 100.0, "", spf(99.5))
        .unwrap();
    store
        .create_failure_mode(uncovered, "fm", 100.0, "", spf(0.0))
        .unwrap();
    store.set_related_components(sf, &[covered]).unwrap();

    let results = FmedaEngine::default().calculate(&store.snapshot(project).unwrap());
    let sf_result = &results.safety_functions[0];
    assert!(sf_result.scoped);
    assert_eq!(sf_result.verdict, Verdict::Pass);
    // the project-wide figure would have failed ASIL D
    assert!(results.spfm.unwrap() < 0.99);
}

#[test]
fn verdict_uses_target_overrides() {
    let mut store = ProjectStore::new();
    let project = store.create_project("custom table", 10000.0).unwrap();
    store
        .create_safety_function(project, "SF1", "", AsilLevel::D)
        .unwrap();
    let component = store
        .create_component(project, "U1", "", 100.0, true)
        .unwrap();
    store
        .create_failure_mode(component, "fm", 100.0, "", spf(95.0))
        .unwrap();

    let engine = FmedaEngine::new(CalcConfig {
        target_overrides: fmeda_engine::TargetOverrides {
            spfm_min: Some(0.90),
            lfm_min: Some(0.50),
            pmhf_ceiling: Some(1e-3),
        },
        ..Default::default()
    });
    let results = engine.calculate(&store.snapshot(project).unwrap());
    assert_eq!(results.safety_functions[0].verdict, Verdict::Pass);
}
