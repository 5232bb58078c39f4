//! Feature encoding for the obesity level classifier.
//!
//! Category tables and ordinal maps come from the training run; the
//! [`FeatureSchema`] fixes the column order the scaler and model were fitted
//! on, and [`FeatureEncoder`] turns a [`obesity_form::RawInput`] into a
//! [`FeatureVector`] in exactly that order.

pub mod encoder;
pub mod error;
pub mod ordinal;
pub mod schema;
pub mod table;

pub use encoder::{FeatureEncoder, FeatureVector};
pub use error::{EncodeError, TableError};
pub use ordinal::OrdinalMap;
pub use schema::{CategoryTables, ColumnKind, ColumnSpec, FeatureSchema};
pub use table::EncodingTable;
