//! Logistic regression backend: scores = coef · x + intercept

use serde::{Deserialize, Serialize};

use crate::backend::{check_row, ClassifierBackend};
use crate::error::BackendError;

/// Fitted parameters as exported from training.
///
/// `coef` has one row per class, or a single row for a two-class model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearParams {
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

/// Multinomial logistic regression.
///
/// With more than two classes the probabilities are the softmax of the class
/// scores. A two-class model with a single coefficient row scores the second
/// class and uses the logistic function.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    n_features: usize,
    n_classes: usize,
}

impl LogisticRegression {
    pub fn new(params: LinearParams, n_classes: usize) -> Result<Self, BackendError> {
        let LinearParams { coef, intercept } = params;
        let rows = coef.len();
        let expected_rows = if n_classes == 2 && rows == 1 { 1 } else { n_classes };
        if n_classes < 2 || rows != expected_rows {
            return Err(BackendError::InvalidModel(format!(
                "{rows} coefficient rows for {n_classes} classes"
            )));
        }
        if intercept.len() != rows {
            return Err(BackendError::InvalidModel(format!(
                "{} intercepts for {rows} coefficient rows",
                intercept.len()
            )));
        }
        let n_features = coef[0].len();
        if n_features == 0 || coef.iter().any(|r| r.len() != n_features) {
            return Err(BackendError::InvalidModel(
                "coefficient rows must be non-empty and of equal length".into(),
            ));
        }
        let all_finite = coef.iter().flatten().chain(&intercept).all(|x| x.is_finite());
        if !all_finite {
            return Err(BackendError::InvalidModel(
                "coefficients must be finite".into(),
            ));
        }
        Ok(Self {
            coef,
            intercept,
            n_features,
            n_classes,
        })
    }

    fn scores(&self, row: &[f64]) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(w, b)| w.iter().zip(row).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect()
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exp: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exp.iter().sum();
    exp.into_iter().map(|e| e / total).collect()
}

impl ClassifierBackend for LogisticRegression {
    fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, BackendError> {
        check_row(row, self.n_features)?;
        let scores = self.scores(row);
        if scores.len() == 1 {
            let p = sigmoid(scores[0]);
            Ok(vec![1.0 - p, p])
        } else {
            Ok(softmax(&scores))
        }
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn backend_name(&self) -> &str {
        "logistic_regression"
    }
}
