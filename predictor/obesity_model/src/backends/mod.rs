//! Concrete classifier backends.

pub mod forest;
pub mod linear;
pub mod tree;

pub use forest::RandomForest;
pub use linear::{LinearParams, LogisticRegression};
pub use tree::{DecisionTree, TreeNodes};
