//! Input side of the obesity level predictor.
//!
//! Declares the questionnaire fields with their domains, the [`RawInput`]
//! record one submission produces, numeric validation, and a terminal-agnostic
//! [`FormSession`] that collects a record one answer at a time.

pub mod field;
pub mod input;
pub mod session;
pub mod validate;

pub use field::{FieldKind, FieldSpec, HeightUnit, FORM_FIELDS};
pub use input::{FieldValue, RawInput};
pub use session::{FormSession, FormStep};
pub use validate::{validate_input, ValidationError};
