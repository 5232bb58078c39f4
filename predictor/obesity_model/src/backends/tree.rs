//! Decision tree backend over array-encoded nodes.

use serde::{Deserialize, Serialize};

use crate::backend::{check_row, ClassifierBackend};
use crate::error::BackendError;

/// Marks a node without children.
pub const LEAF: i64 = -1;

/// Parallel node arrays of a fitted tree.
///
/// Node `i` is a leaf when `children_left[i] == LEAF`. Otherwise rows with
/// `x[feature[i]] <= threshold[i]` continue at `children_left[i]`, the rest
/// at `children_right[i]`. `value[i]` is the class distribution (counts or
/// fractions) of the training rows that reached the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNodes {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl TreeNodes {
    pub fn len(&self) -> usize {
        self.children_left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children_left.is_empty()
    }

    /// Checks the arrays can be walked safely for rows of `n_features`.
    ///
    /// Children must lie after their parent, which rules out cycles.
    pub fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), BackendError> {
        let n = self.len();
        let invalid = |msg: String| Err(BackendError::InvalidModel(msg));
        if n == 0 {
            return invalid("tree has no nodes".into());
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|&len| len != n)
        {
            return invalid("node arrays differ in length".into());
        }

        for i in 0..n {
            let (left, right) = (self.children_left[i], self.children_right[i]);
            let dist = &self.value[i];
            if dist.len() != n_classes {
                return invalid(format!(
                    "node {i} has {} class values, expected {n_classes}",
                    dist.len()
                ));
            }
            if dist.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return invalid(format!("node {i} has a negative or non-finite class value"));
            }
            if left == LEAF {
                if right != LEAF {
                    return invalid(format!("node {i} has only one child"));
                }
                if dist.iter().sum::<f64>() <= 0.0 {
                    return invalid(format!("leaf {i} has an empty class distribution"));
                }
                continue;
            }
            let in_range = |c: i64| c > i as i64 && (c as usize) < n;
            if !in_range(left) || !in_range(right) {
                return invalid(format!("node {i} has children out of order or range"));
            }
            let f = self.feature[i];
            if f < 0 || f as usize >= n_features {
                return invalid(format!("node {i} splits on unknown feature {f}"));
            }
            if !self.threshold[i].is_finite() {
                return invalid(format!("node {i} has a non-finite threshold"));
            }
        }
        Ok(())
    }

    /// Index of the leaf `row` ends up in. Assumes a validated tree.
    pub fn leaf_index(&self, row: &[f64]) -> usize {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let f = self.feature[node] as usize;
            node = if row[f] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        node
    }

    /// Normalised class distribution of the leaf `row` ends up in.
    pub fn leaf_proba(&self, row: &[f64]) -> Vec<f64> {
        let dist = &self.value[self.leaf_index(row)];
        let total: f64 = dist.iter().sum();
        dist.iter().map(|v| v / total).collect()
    }
}

#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: TreeNodes,
    n_features: usize,
    n_classes: usize,
}

impl DecisionTree {
    pub fn new(nodes: TreeNodes, n_features: usize, n_classes: usize) -> Result<Self, BackendError> {
        nodes.validate(n_features, n_classes)?;
        Ok(Self {
            nodes,
            n_features,
            n_classes,
        })
    }

    pub fn nodes(&self) -> &TreeNodes {
        &self.nodes
    }
}

impl ClassifierBackend for DecisionTree {
    fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, BackendError> {
        check_row(row, self.n_features)?;
        Ok(self.nodes.leaf_proba(row))
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn backend_name(&self) -> &str {
        "decision_tree"
    }
}
