use std::path::PathBuf;

use obesity_encode::EncodeError;
use obesity_form::ValidationError;
use thiserror::Error;

/// Errors raised by a classifier backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    #[error("Invalid model: {0}")]
    InvalidModel(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A required artifact could not be loaded or does not fit the others.
///
/// Always fatal: no request can be served from an inconsistent artifact set.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{artifact} was produced by run '{found}', the manifest expects '{expected}'")]
    RunMismatch {
        artifact: &'static str,
        expected: String,
        found: String,
    },
    #[error("invalid {artifact}: {reason}")]
    Invalid {
        artifact: &'static str,
        reason: String,
    },
    #[error("schema mismatch: {0}")]
    Schema(String),
}

/// Reasons a single prediction request is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("model predicted class {0}, which has no target label")]
    UnknownClass(i64),
}
