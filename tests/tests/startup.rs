use std::fs;
use std::path::Path;

use obesity_model::{ArtifactError, Predictor};
use serde_json::Value;
use tempfile::TempDir;
use tests::{demo_artifacts, init_logger};

fn copy_demo() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for entry in fs::read_dir(demo_artifacts()).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), dir.path().join(entry.file_name())).unwrap();
    }
    dir
}

fn rewrite(dir: &Path, file: &str, edit: impl FnOnce(&mut Value)) {
    let path = dir.join(file);
    let mut v: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    edit(&mut v);
    fs::write(&path, v.to_string()).unwrap();
}

#[test]
fn untouched_copy_serves_requests() {
    init_logger();
    let dir = copy_demo();
    let predictor = Predictor::load(dir.path()).unwrap();
    assert_eq!(
        predictor.predict(&tests::reference_input()).unwrap().label,
        "Normal_Weight"
    );
}

#[test]
fn scaler_from_another_run_stops_startup() {
    init_logger();
    let dir = copy_demo();
    rewrite(dir.path(), "scaler.json", |v| v["run_id"] = Value::from("retrained"));
    assert!(matches!(
        Predictor::load(dir.path()),
        Err(ArtifactError::RunMismatch { artifact: "scaler", .. })
    ));
}

#[test]
fn tables_that_cannot_encode_the_form_stop_startup() {
    init_logger();
    let dir = copy_demo();
    rewrite(dir.path(), "encoders.json", |v| {
        v["tables"]["Gender"] = serde_json::json!(["Female"]);
    });
    assert!(matches!(
        Predictor::load(dir.path()),
        Err(ArtifactError::Schema(msg)) if msg.contains("Male")
    ));
}

#[test]
fn missing_model_file_stops_startup() {
    init_logger();
    let dir = copy_demo();
    fs::remove_file(dir.path().join("model.json")).unwrap();
    assert!(matches!(
        Predictor::load(dir.path()),
        Err(ArtifactError::Io { .. })
    ));
}
