//! Text and JSON rendering of prediction outcomes.

use std::fmt::Write as _;

use obesity_encode::EncodeError;
use obesity_form::RawInput;
use obesity_model::{ArtifactBundle, PredictError, Prediction};
use serde::Serialize;
use serde_json::Value as JsonValue;

pub const SUCCESS_PREFIX: &str = "Predicted obesity level";

pub fn render_prediction(prediction: &Prediction) -> String {
    format!("{SUCCESS_PREFIX}: {}", prediction.label)
}

pub fn render_error(err: &PredictError) -> String {
    format!("error: {err}")
}

/// Column a rejection is about, when there is a single one.
pub fn error_field(err: &PredictError) -> Option<String> {
    match err {
        PredictError::Validation(v) => v.field().map(str::to_string),
        PredictError::Encode(
            EncodeError::UnknownCategory { column, .. }
            | EncodeError::TypeMismatch { column, .. },
        ) => Some(column.clone()),
        PredictError::Encode(
            EncodeError::MissingField(column)
            | EncodeError::NonFinite(column)
            | EncodeError::MissingTable(column),
        ) => Some(column.clone()),
        _ => None,
    }
}

/// One request's outcome as printed by `predict --json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Report {
    Predicted(Prediction),
    Rejected {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<String>,
    },
}

impl Report {
    pub fn from_result(result: &Result<Prediction, PredictError>) -> Self {
        match result {
            Ok(p) => Report::Predicted(p.clone()),
            Err(e) => Report::Rejected {
                error: e.to_string(),
                field: error_field(e),
            },
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Report::Rejected { .. })
    }
}

/// Reads a single request object or an array of them.
pub fn parse_requests(text: &str) -> Result<Vec<RawInput>, serde_json::Error> {
    let value: JsonValue = serde_json::from_str(text)?;
    if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|one| vec![one])
    }
}

/// Human-readable summary of a loaded bundle.
pub fn render_inspect(bundle: &ArtifactBundle) -> String {
    let mut out = String::new();
    let manifest = bundle.manifest();
    let _ = writeln!(out, "run: {}", manifest.run_id);
    if let Some(dir) = bundle.source() {
        let _ = writeln!(out, "artifacts: {}", dir.display());
    }
    if let Some(desc) = &manifest.description {
        let _ = writeln!(out, "description: {desc}");
    }
    if let Some(created) = &manifest.created_at {
        let _ = writeln!(out, "created: {created}");
    }
    let _ = writeln!(out, "columns:");
    for (i, col) in bundle.schema().columns().iter().enumerate() {
        let _ = writeln!(out, "  {i:>2} {:<32} {}", col.name, col.kind);
    }
    let scaled: Vec<&str> = bundle.scaler().columns().collect();
    let _ = writeln!(out, "scaled: {}", scaled.join(", "));
    let _ = writeln!(out, "estimator: {}", bundle.classifier().backend_name());
    let target = bundle.target();
    let _ = writeln!(out, "target ({}):", target.column);
    for class in bundle.classifier().classes() {
        if let Ok(label) = target.inverse(*class) {
            let _ = writeln!(out, "  {class} {label}");
        }
    }
    out
}
