//! Standard scaling of the continuous columns.

use serde::{Deserialize, Serialize};

use obesity_encode::FeatureVector;

use crate::error::PredictError;

/// Fitted `(x - mean) / scale` transform over named columns.
///
/// Columns are matched by name, so the scaler may cover any subset of the
/// feature vector in any order. Columns it does not name pass through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub feature_names_in: Vec<String>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn validate(&self) -> Result<(), String> {
        let n = self.feature_names_in.len();
        if n == 0 {
            return Err("scaler names no columns".into());
        }
        if self.mean.len() != n || self.scale.len() != n {
            return Err(format!(
                "{n} columns but {} means and {} scales",
                self.mean.len(),
                self.scale.len()
            ));
        }
        for (i, name) in self.feature_names_in.iter().enumerate() {
            if self.feature_names_in[..i].contains(name) {
                return Err(format!("column {name} is scaled twice"));
            }
            if !self.mean[i].is_finite() {
                return Err(format!("mean of {name} is not finite"));
            }
            if !(self.scale[i].is_finite() && self.scale[i] > 0.0) {
                return Err(format!("scale of {name} must be positive"));
            }
        }
        Ok(())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.feature_names_in.iter().map(String::as_str)
    }

    /// Scales the named columns of `row` and returns the result.
    pub fn transform(&self, row: &FeatureVector) -> Result<FeatureVector, PredictError> {
        let mut out = row.clone();
        for ((name, mean), scale) in self
            .feature_names_in
            .iter()
            .zip(&self.mean)
            .zip(&self.scale)
        {
            let pos = row
                .columns()
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| {
                    PredictError::SchemaMismatch(format!("scaled column {name} is not in the row"))
                })?;
            let x = &mut out.values_mut()[pos];
            *x = (*x - mean) / scale;
        }
        Ok(out)
    }
}
