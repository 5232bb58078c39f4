//! Category to code tables for nominal columns.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{EncodeError, TableError};

/// Bijection between the labels of a nominal column and integer codes.
///
/// A label's code is its position in `classes`, the convention of a fitted
/// label encoder. Serialized as the plain list of classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct EncodingTable {
    classes: Vec<String>,
    index: HashMap<String, u32>,
}

impl EncodingTable {
    pub fn new<I, S>(classes: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let classes: Vec<String> = classes.into_iter().map(Into::into).collect();
        if classes.is_empty() {
            return Err(TableError::Empty);
        }
        let mut index = HashMap::with_capacity(classes.len());
        for (code, label) in classes.iter().enumerate() {
            if index.insert(label.clone(), code as u32).is_some() {
                return Err(TableError::DuplicateLabel(label.clone()));
            }
        }
        Ok(Self { classes, index })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Code of `label`; `column` only feeds the error message.
    pub fn encode(&self, column: &str, label: &str) -> Result<u32, EncodeError> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| EncodeError::UnknownCategory {
                column: column.to_string(),
                value: label.to_string(),
            })
    }

    pub fn decode(&self, code: u32) -> Option<&str> {
        self.classes.get(code as usize).map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for EncodingTable {
    type Error = TableError;

    fn try_from(classes: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(classes)
    }
}

impl From<EncodingTable> for Vec<String> {
    fn from(table: EncodingTable) -> Self {
        table.classes
    }
}
