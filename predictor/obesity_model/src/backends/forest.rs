//! Random forest backend: the mean of its trees' leaf distributions.

use crate::backend::{check_row, ClassifierBackend};
use crate::backends::tree::TreeNodes;
use crate::error::BackendError;

#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<TreeNodes>,
    n_features: usize,
    n_classes: usize,
}

impl RandomForest {
    pub fn new(
        trees: Vec<TreeNodes>,
        n_features: usize,
        n_classes: usize,
    ) -> Result<Self, BackendError> {
        if trees.is_empty() {
            return Err(BackendError::InvalidModel("forest has no trees".into()));
        }
        for (i, tree) in trees.iter().enumerate() {
            tree.validate(n_features, n_classes).map_err(|e| match e {
                BackendError::InvalidModel(msg) => {
                    BackendError::InvalidModel(format!("tree {i}: {msg}"))
                }
                other => other,
            })?;
        }
        Ok(Self {
            trees,
            n_features,
            n_classes,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl ClassifierBackend for RandomForest {
    fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, BackendError> {
        check_row(row, self.n_features)?;
        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (acc, p) in proba.iter_mut().zip(tree.leaf_proba(row)) {
                *acc += p;
            }
        }
        let n = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n);
        Ok(proba)
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn backend_name(&self) -> &str {
        "random_forest"
    }
}
