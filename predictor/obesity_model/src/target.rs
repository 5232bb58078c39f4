//! Decoding of predicted class codes back to obesity levels.

use serde::{Deserialize, Serialize};

use obesity_encode::{EncodeError, EncodingTable, TableError};

use crate::error::PredictError;

/// Target label encoder: class code `i` is `classes[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetLabels {
    pub column: String,
    classes: EncodingTable,
}

impl TargetLabels {
    pub fn new<I, S>(column: impl Into<String>, classes: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            column: column.into(),
            classes: EncodingTable::new(classes)?,
        })
    }

    pub fn classes(&self) -> &[String] {
        self.classes.classes()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn encode(&self, label: &str) -> Result<i64, EncodeError> {
        self.classes.encode(&self.column, label).map(i64::from)
    }

    /// Label of a predicted class code.
    pub fn inverse(&self, class: i64) -> Result<&str, PredictError> {
        u32::try_from(class)
            .ok()
            .and_then(|code| self.classes.decode(code))
            .ok_or(PredictError::UnknownClass(class))
    }
}
