//! Serialized classifier and the runtime wrapper around its backend.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::backend::ClassifierBackend;
use crate::backends::{DecisionTree, LinearParams, LogisticRegression, RandomForest, TreeNodes};
use crate::error::{BackendError, PredictError};

/// Fitted estimator parameters, tagged by estimator family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimatorParams {
    LogisticRegression(LinearParams),
    DecisionTree { tree: TreeNodes },
    RandomForest { trees: Vec<TreeNodes> },
}

/// Contents of the model artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub n_features_in: usize,
    /// Column names seen at fit time, when the training frame had them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names_in: Option<Vec<String>>,
    /// Encoded target values, one per probability column.
    pub classes: Vec<i64>,
    #[serde(flatten)]
    pub estimator: EstimatorParams,
}

/// Outcome of one inference: the encoded class and all class probabilities.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPrediction {
    pub class: i64,
    pub index: usize,
    pub probabilities: Vec<f64>,
}

/// A validated, ready-to-use classifier.
pub struct Classifier {
    classes: Vec<i64>,
    feature_names_in: Option<Vec<String>>,
    backend: Box<dyn ClassifierBackend>,
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier")
            .field("backend", &self.backend.backend_name())
            .field("n_features", &self.backend.n_features())
            .field("classes", &self.classes)
            .finish()
    }
}

impl Classifier {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, BackendError> {
        let ModelArtifact {
            n_features_in,
            feature_names_in,
            classes,
            estimator,
        } = artifact;

        if classes.is_empty() {
            return Err(BackendError::InvalidModel("model has no classes".into()));
        }
        let mut seen = HashSet::with_capacity(classes.len());
        if let Some(dup) = classes.iter().find(|c| !seen.insert(**c)) {
            return Err(BackendError::InvalidModel(format!(
                "class {dup} is listed twice"
            )));
        }
        if let Some(names) = &feature_names_in {
            if names.len() != n_features_in {
                return Err(BackendError::InvalidModel(format!(
                    "{} feature names for {n_features_in} features",
                    names.len()
                )));
            }
        }

        let n_classes = classes.len();
        let backend: Box<dyn ClassifierBackend> = match estimator {
            EstimatorParams::LogisticRegression(params) => {
                Box::new(LogisticRegression::new(params, n_classes)?)
            }
            EstimatorParams::DecisionTree { tree } => {
                Box::new(DecisionTree::new(tree, n_features_in, n_classes)?)
            }
            EstimatorParams::RandomForest { trees } => {
                Box::new(RandomForest::new(trees, n_features_in, n_classes)?)
            }
        };
        if backend.n_features() != n_features_in {
            return Err(BackendError::InvalidModel(format!(
                "estimator takes {} features, n_features_in is {n_features_in}",
                backend.n_features()
            )));
        }

        Ok(Self {
            classes,
            feature_names_in,
            backend,
        })
    }

    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    pub fn feature_names_in(&self) -> Option<&[String]> {
        self.feature_names_in.as_deref()
    }

    pub fn n_features(&self) -> usize {
        self.backend.n_features()
    }

    pub fn backend_name(&self) -> &str {
        self.backend.backend_name()
    }

    pub fn predict(&self, row: &[f64]) -> Result<RawPrediction, PredictError> {
        let (index, probabilities) = self.backend.predict(row)?;
        let class = *self
            .classes
            .get(index)
            .ok_or_else(|| BackendError::InvalidModel(format!("no class at index {index}")))?;
        log::debug!("{} picked class {class}", self.backend.backend_name());
        Ok(RawPrediction {
            class,
            index,
            probabilities,
        })
    }
}
