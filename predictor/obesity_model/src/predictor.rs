//! The request path: validate, encode, scale, infer, decode.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use obesity_encode::{FeatureEncoder, FeatureVector};
use obesity_form::{validate_input, RawInput};

use crate::bundle::ArtifactBundle;
use crate::error::{ArtifactError, PredictError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassProbability {
    pub label: String,
    pub probability: f64,
}

/// Result of one successful request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Predicted obesity level.
    pub label: String,
    /// Encoded class the model produced.
    pub class: i64,
    /// One entry per model class, in model class order.
    pub probabilities: Vec<ClassProbability>,
}

impl Prediction {
    pub fn confidence(&self) -> Option<f64> {
        self.probabilities
            .iter()
            .find(|p| p.label == self.label)
            .map(|p| p.probability)
    }
}

/// Serves predictions from one artifact bundle.
///
/// Cloning is cheap and every clone shares the same read-only bundle.
#[derive(Debug, Clone)]
pub struct Predictor {
    bundle: Arc<ArtifactBundle>,
}

impl Predictor {
    pub fn new(bundle: ArtifactBundle) -> Self {
        Self {
            bundle: Arc::new(bundle),
        }
    }

    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        ArtifactBundle::load(dir).map(Self::new)
    }

    pub fn bundle(&self) -> &ArtifactBundle {
        &self.bundle
    }

    /// Validates and encodes a submission without scaling it.
    pub fn encode(&self, input: &RawInput) -> Result<FeatureVector, PredictError> {
        validate_input(input)?;
        let bundle = &*self.bundle;
        Ok(FeatureEncoder::new(bundle.schema(), bundle.tables()).encode(input)?)
    }

    pub fn predict(&self, input: &RawInput) -> Result<Prediction, PredictError> {
        let row = self.encode(input)?;
        self.predict_vector(&row)
    }

    /// Scales an encoded row and classifies it.
    pub fn predict_vector(&self, row: &FeatureVector) -> Result<Prediction, PredictError> {
        let bundle = &*self.bundle;
        if !bundle.schema().matches(row.columns()) {
            return Err(PredictError::SchemaMismatch(format!(
                "row columns [{}] differ from the schema",
                row.columns().join(", ")
            )));
        }
        let scaled = bundle.scaler().transform(row)?;
        log::trace!("scaled row {:?}", scaled.values());

        let raw = bundle.classifier().predict(scaled.values())?;
        let target = bundle.target();
        let label = target.inverse(raw.class)?.to_string();
        let probabilities = bundle
            .classifier()
            .classes()
            .iter()
            .zip(&raw.probabilities)
            .map(|(class, p)| -> Result<ClassProbability, PredictError> {
                Ok(ClassProbability {
                    label: target.inverse(*class)?.to_string(),
                    probability: *p,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("predicted {label} (class {})", raw.class);
        Ok(Prediction {
            label,
            class: raw.class,
            probabilities,
        })
    }
}
