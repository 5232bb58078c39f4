use thiserror::Error;

use crate::field::{self, FieldKind, FORM_FIELDS};
use crate::input::RawInput;

/// A submitted record that must not reach the encoder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("Height and weight must not be zero or negative")]
    NonPositiveBody,
    #[error("Age must not be zero or negative")]
    NonPositiveAge,
    #[error("{field} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl ValidationError {
    /// Column the error is about, if it concerns a single field.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::NotFinite { field } | ValidationError::OutOfRange { field, .. } => {
                Some(*field)
            }
            ValidationError::NonPositiveBody => None,
            ValidationError::NonPositiveAge => Some(field::AGE),
        }
    }
}

/// Checks the numeric fields of a submission.
///
/// Body measurements are checked before age, then every continuous field
/// against its declared range. Categories are left to the encoder tables.
pub fn validate_input(input: &RawInput) -> Result<(), ValidationError> {
    for (column, value) in input.fields() {
        if let Some(x) = value.as_number() {
            if !x.is_finite() {
                return Err(ValidationError::NotFinite { field: column });
            }
        }
    }

    if input.height <= 0.0 || input.weight <= 0.0 {
        return Err(ValidationError::NonPositiveBody);
    }
    if input.age <= 0.0 {
        return Err(ValidationError::NonPositiveAge);
    }

    for spec in FORM_FIELDS {
        if let FieldKind::Continuous { min, max, .. } = spec.kind {
            let value = input
                .value(spec.column)
                .and_then(|v| v.as_number())
                .unwrap_or(f64::NAN);
            if !spec.contains(value) {
                log::debug!("{} = {value} rejected, range [{min}, {max}]", spec.column);
                return Err(ValidationError::OutOfRange {
                    field: spec.column,
                    value,
                    min,
                    max,
                });
            }
        }
    }
    Ok(())
}
