//! Turns a [`RawInput`] into the ordered numeric row the model consumes.

use obesity_form::{FieldValue, RawInput};

use crate::error::EncodeError;
use crate::schema::{CategoryTables, ColumnKind, FeatureSchema};

/// One encoded row, with the column names it was assembled for.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Pairs column names with values; `None` if the lengths differ.
    pub fn new(columns: Vec<String>, values: Vec<f64>) -> Option<Self> {
        (columns.len() == values.len()).then_some(Self { columns, values })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i])
    }
}

/// Encodes submissions against one schema and its tables.
#[derive(Debug, Clone, Copy)]
pub struct FeatureEncoder<'a> {
    schema: &'a FeatureSchema,
    tables: &'a CategoryTables,
}

impl<'a> FeatureEncoder<'a> {
    pub fn new(schema: &'a FeatureSchema, tables: &'a CategoryTables) -> Self {
        Self { schema, tables }
    }

    /// Builds the row in schema order.
    ///
    /// Nominal columns become their table code, ordinal columns their rank,
    /// continuous columns are copied as-is. Any label outside its table is
    /// rejected.
    pub fn encode(&self, input: &RawInput) -> Result<FeatureVector, EncodeError> {
        let mut columns = Vec::with_capacity(self.schema.len());
        let mut values = Vec::with_capacity(self.schema.len());

        for col in self.schema.columns() {
            let name = col.name.as_str();
            let value = input
                .value(name)
                .ok_or_else(|| EncodeError::MissingField(name.to_string()))?;

            let x = match (col.kind, value) {
                (ColumnKind::Continuous, FieldValue::Number(x)) => {
                    if !x.is_finite() {
                        return Err(EncodeError::NonFinite(name.to_string()));
                    }
                    x
                }
                (ColumnKind::Nominal, FieldValue::Category(label)) => {
                    let table = self
                        .tables
                        .nominal
                        .get(name)
                        .ok_or_else(|| EncodeError::MissingTable(name.to_string()))?;
                    f64::from(table.encode(name, label)?)
                }
                (ColumnKind::Ordinal, FieldValue::Category(label)) => {
                    let map = self
                        .tables
                        .ordinal
                        .get(name)
                        .ok_or_else(|| EncodeError::MissingTable(name.to_string()))?;
                    map.rank(name, label)? as f64
                }
                (ColumnKind::Continuous, FieldValue::Category(_)) => {
                    return Err(EncodeError::TypeMismatch {
                        column: name.to_string(),
                        expected: "numeric",
                    })
                }
                (_, FieldValue::Number(_)) => {
                    return Err(EncodeError::TypeMismatch {
                        column: name.to_string(),
                        expected: "categorical",
                    })
                }
            };
            log::trace!("{name} ({}) = {value} -> {x}", col.kind);
            columns.push(col.name.clone());
            values.push(x);
        }

        log::debug!("encoded {} columns", values.len());
        Ok(FeatureVector { columns, values })
    }
}
