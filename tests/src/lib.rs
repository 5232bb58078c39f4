//! Shared fixtures for the end-to-end scenarios.

use std::path::{Path, PathBuf};

use obesity_form::RawInput;
use obesity_model::Predictor;

/// Directory of the demo artifact set.
pub fn demo_artifacts() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../artifacts/demo")
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Loads the demo artifact set; panics if it is broken.
pub fn demo_predictor() -> Predictor {
    init_logger();
    match Predictor::load(demo_artifacts()) {
        Ok(p) => p,
        Err(e) => panic!("demo artifacts failed to load: {e}"),
    }
}

/// The reference person: a 25 year old woman, 1.70 m, 65 kg.
pub fn reference_input() -> RawInput {
    RawInput {
        gender: "Female".into(),
        age: 25.0,
        height: 1.70,
        weight: 65.0,
        family_history: "no".into(),
        favc: "no".into(),
        fcvc: 2.0,
        ncp: 3.0,
        caec: "Sometimes".into(),
        smoke: "no".into(),
        ch2o: 2.0,
        scc: "no".into(),
        faf: 1.0,
        tue: 1.0,
        calc: "no".into(),
        mtrans: "Public_Transportation".into(),
    }
}
