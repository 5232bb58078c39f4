//! Inference side of the obesity level predictor.
//!
//! An [`ArtifactBundle`] is the serialized output of one training run: the
//! manifest with the column order, category tables, a [`StandardScaler`], the
//! fitted classifier and the target labels. Loading cross-checks all of them;
//! a [`Predictor`] then serves requests from the bundle without mutating it.

pub mod backend;
pub mod backends;
pub mod bundle;
pub mod error;
pub mod manifest;
pub mod model;
pub mod predictor;
pub mod scaler;
pub mod target;

pub use backend::{argmax, ClassifierBackend};
pub use bundle::ArtifactBundle;
pub use error::{ArtifactError, BackendError, PredictError};
pub use manifest::{ArtifactFiles, ArtifactManifest, Stamped};
pub use model::{Classifier, EstimatorParams, ModelArtifact, RawPrediction};
pub use predictor::{ClassProbability, Prediction, Predictor};
pub use scaler::StandardScaler;
pub use target::TargetLabels;
