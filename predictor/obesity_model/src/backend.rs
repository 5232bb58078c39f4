//! Pluggable classifier backend trait

use crate::error::BackendError;

/// A fitted classifier that scores one row at a time.
///
/// Implementations are immutable after construction, so one instance can
/// serve any number of threads.
pub trait ClassifierBackend: Send + Sync {
    /// Class probabilities for one row, indexed like the model's classes.
    fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, BackendError>;

    /// Number of input columns the model was fitted on.
    fn n_features(&self) -> usize;

    fn n_classes(&self) -> usize;

    /// Get backend name/identifier
    fn backend_name(&self) -> &str;

    /// Index of the most probable class, with the probabilities it was
    /// picked from.
    fn predict(&self, row: &[f64]) -> Result<(usize, Vec<f64>), BackendError> {
        let proba = self.predict_proba(row)?;
        let index =
            argmax(&proba).ok_or_else(|| BackendError::InvalidInput("no class scores".into()))?;
        Ok((index, proba))
    }
}

/// Position of the largest value; ties go to the lowest index.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

pub(crate) fn check_row(row: &[f64], n_features: usize) -> Result<(), BackendError> {
    if row.len() != n_features {
        return Err(BackendError::InvalidInput(format!(
            "expected {n_features} features, got {}",
            row.len()
        )));
    }
    if let Some(i) = row.iter().position(|x| !x.is_finite()) {
        return Err(BackendError::InvalidInput(format!(
            "feature {i} is not finite"
        )));
    }
    Ok(())
}
