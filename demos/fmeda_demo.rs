//! FMEDA engine walkthrough
//!
//! Builds a small project in the store, runs the calculation, and prints
//! the results report.

use fmeda_engine::{
    format_results_report, AsilLevel, DiagnosticMechanism, FailureClassification, FmedaEngine,
    ProjectStore,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut store = ProjectStore::new();
    let project = store.create_project("Brake-by-wire ECU", 20000.0)?;

    let sf = store.create_safety_function(
        project,
        "SF-BRK-01",
        "Apply requested braking torque",
        AsilLevel::D,
    )?;

    let mcu = store.create_component(project, "U1", "MCU", 150.0, true)?;
    let driver = store.create_component(project, "U2", "Gate driver", 80.0, true)?;

    store.create_failure_mode(
        mcu,
        "core lockup",
        100.0,
        "loss of torque command",
        FailureClassification::Dual {
            spf: DiagnosticMechanism::new("lockstep core", 99.0)?,
            mpf: DiagnosticMechanism::new("startup BIST", 90.0)?,
        },
    )?;
    store.create_failure_mode(
        mcu,
        "flash corruption",
        50.0,
        "wrong torque command",
        FailureClassification::SinglePoint {
            spf: DiagnosticMechanism::new("ECC", 99.5)?,
        },
    )?;
    store.create_failure_mode(
        driver,
        "output stage short",
        80.0,
        "uncommanded braking",
        FailureClassification::MultiplePoint {
            mpf: DiagnosticMechanism::new("readback comparison", 95.0)?,
        },
    )?;

    store.set_related_components(sf, &[mcu, driver])?;

    let engine = FmedaEngine::default();
    let results = engine.calculate(&store.snapshot(project)?);
    println!("{}", format_results_report(&results));

    Ok(())
}
