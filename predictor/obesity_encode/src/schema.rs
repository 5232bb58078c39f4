//! Ordered column schema and the category tables it is derived from.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::ordinal::OrdinalMap;
use crate::table::EncodingTable;

/// All category lookup state of one training run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTables {
    #[serde(default)]
    pub nominal: BTreeMap<String, EncodingTable>,
    #[serde(default)]
    pub ordinal: BTreeMap<String, OrdinalMap>,
}

impl CategoryTables {
    pub fn new(
        nominal: BTreeMap<String, EncodingTable>,
        ordinal: BTreeMap<String, OrdinalMap>,
    ) -> Result<Self, TableError> {
        if let Some(col) = nominal.keys().find(|c| ordinal.contains_key(*c)) {
            return Err(TableError::Conflict(col.clone()));
        }
        Ok(Self { nominal, ordinal })
    }

    pub fn kind_of(&self, column: &str) -> ColumnKind {
        if self.nominal.contains_key(column) {
            ColumnKind::Nominal
        } else if self.ordinal.contains_key(column) {
            ColumnKind::Ordinal
        } else {
            ColumnKind::Continuous
        }
    }

    /// Every column some table is keyed by.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.nominal
            .keys()
            .chain(self.ordinal.keys())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Continuous,
    Nominal,
    Ordinal,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnKind::Continuous => "continuous",
            ColumnKind::Nominal => "nominal",
            ColumnKind::Ordinal => "ordinal",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

/// Column order the scaler and classifier were fitted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    columns: Vec<ColumnSpec>,
}

impl FeatureSchema {
    /// Builds the schema from an ordered list of training columns.
    ///
    /// A column is nominal or ordinal if the tables carry an entry for it and
    /// continuous otherwise.
    pub fn from_columns<S: AsRef<str>>(
        columns: &[S],
        tables: &CategoryTables,
    ) -> Result<Self, TableError> {
        if columns.is_empty() {
            return Err(TableError::Empty);
        }
        let mut specs: Vec<ColumnSpec> = Vec::with_capacity(columns.len());
        for name in columns {
            let name = name.as_ref();
            if specs.iter().any(|c| c.name == name) {
                return Err(TableError::DuplicateColumn(name.to_string()));
            }
            specs.push(ColumnSpec {
                name: name.to_string(),
                kind: tables.kind_of(name),
            });
        }
        Ok(Self { columns: specs })
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// True if `names` is exactly this schema's column list, in order.
    pub fn matches<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.len() == self.columns.len()
            && self
                .columns
                .iter()
                .zip(names)
                .all(|(c, n)| c.name == n.as_ref())
    }
}
