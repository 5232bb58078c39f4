//! The record produced by one form submission.

use serde::{Deserialize, Serialize};

use crate::field::{self, FieldKind, FORM_FIELDS};

/// A single field value looked up by column name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Number(f64),
    Category(&'a str),
}

impl<'a> FieldValue<'a> {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(x) => Some(*x),
            FieldValue::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&'a str> {
        match self {
            FieldValue::Category(s) => Some(*s),
            FieldValue::Number(_) => None,
        }
    }
}

impl std::fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Number(x) => write!(f, "{x}"),
            FieldValue::Category(s) => write!(f, "{s}"),
        }
    }
}

/// Lifestyle and body measurements of one person.
///
/// Serialized with the training column names as keys, so a JSON object
/// exported next to the training data deserializes directly. Height is
/// always in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "Height")]
    pub height: f64,
    #[serde(rename = "Weight")]
    pub weight: f64,
    #[serde(rename = "family_history_with_overweight")]
    pub family_history: String,
    #[serde(rename = "FAVC")]
    pub favc: String,
    #[serde(rename = "FCVC")]
    pub fcvc: f64,
    #[serde(rename = "NCP")]
    pub ncp: f64,
    #[serde(rename = "CAEC")]
    pub caec: String,
    #[serde(rename = "SMOKE")]
    pub smoke: String,
    #[serde(rename = "CH2O")]
    pub ch2o: f64,
    #[serde(rename = "SCC")]
    pub scc: String,
    #[serde(rename = "FAF")]
    pub faf: f64,
    #[serde(rename = "TUE")]
    pub tue: f64,
    #[serde(rename = "CALC")]
    pub calc: String,
    #[serde(rename = "MTRANS")]
    pub mtrans: String,
}

impl RawInput {
    /// Looks up a field by its training column name.
    pub fn value(&self, column: &str) -> Option<FieldValue<'_>> {
        use FieldValue::{Category, Number};
        let v = match column {
            field::GENDER => Category(&self.gender),
            field::AGE => Number(self.age),
            field::HEIGHT => Number(self.height),
            field::WEIGHT => Number(self.weight),
            field::FAMILY_HISTORY => Category(&self.family_history),
            field::FAVC => Category(&self.favc),
            field::FCVC => Number(self.fcvc),
            field::NCP => Number(self.ncp),
            field::CAEC => Category(&self.caec),
            field::SMOKE => Category(&self.smoke),
            field::CH2O => Number(self.ch2o),
            field::SCC => Category(&self.scc),
            field::FAF => Number(self.faf),
            field::TUE => Number(self.tue),
            field::CALC => Category(&self.calc),
            field::MTRANS => Category(&self.mtrans),
            _ => return None,
        };
        Some(v)
    }

    fn number_mut(&mut self, column: &str) -> Option<&mut f64> {
        match column {
            field::AGE => Some(&mut self.age),
            field::HEIGHT => Some(&mut self.height),
            field::WEIGHT => Some(&mut self.weight),
            field::FCVC => Some(&mut self.fcvc),
            field::NCP => Some(&mut self.ncp),
            field::CH2O => Some(&mut self.ch2o),
            field::FAF => Some(&mut self.faf),
            field::TUE => Some(&mut self.tue),
            _ => None,
        }
    }

    fn category_mut(&mut self, column: &str) -> Option<&mut String> {
        match column {
            field::GENDER => Some(&mut self.gender),
            field::FAMILY_HISTORY => Some(&mut self.family_history),
            field::FAVC => Some(&mut self.favc),
            field::CAEC => Some(&mut self.caec),
            field::SMOKE => Some(&mut self.smoke),
            field::SCC => Some(&mut self.scc),
            field::CALC => Some(&mut self.calc),
            field::MTRANS => Some(&mut self.mtrans),
            _ => None,
        }
    }

    /// Sets a numeric field. Returns `false` if `column` is not numeric.
    pub fn set_number(&mut self, column: &str, value: f64) -> bool {
        match self.number_mut(column) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Sets a categorical field. Returns `false` if `column` is not categorical.
    pub fn set_category(&mut self, column: &str, value: impl Into<String>) -> bool {
        match self.category_mut(column) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Iterates all fields in form order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, FieldValue<'_>)> + '_ {
        FORM_FIELDS
            .iter()
            .filter_map(move |f| self.value(f.column).map(|v| (f.column, v)))
    }
}

impl Default for RawInput {
    /// The values the form starts with.
    fn default() -> Self {
        let mut input = RawInput {
            gender: String::new(),
            age: 0.0,
            height: 0.0,
            weight: 0.0,
            family_history: String::new(),
            favc: String::new(),
            fcvc: 0.0,
            ncp: 0.0,
            caec: String::new(),
            smoke: String::new(),
            ch2o: 0.0,
            scc: String::new(),
            faf: 0.0,
            tue: 0.0,
            calc: String::new(),
            mtrans: String::new(),
        };
        for f in FORM_FIELDS {
            match f.kind {
                FieldKind::Continuous { default, .. } => {
                    input.set_number(f.column, default);
                }
                FieldKind::Nominal { choices } | FieldKind::Ordinal { choices } => {
                    input.set_category(f.column, choices[0]);
                }
            }
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_the_form() {
        let d = RawInput::default();
        assert_eq!(d.gender, "Male");
        assert_eq!(d.age, 25.0);
        assert_eq!(d.height, 1.70);
        assert_eq!(d.weight, 65.0);
        assert_eq!(d.caec, "no");
        assert_eq!(d.mtrans, "Automobile");
        assert_eq!(d.ncp, 3.0);
    }

    #[test]
    fn every_catalogue_column_is_addressable() {
        let d = RawInput::default();
        for f in FORM_FIELDS {
            let v = d.value(f.column).expect(f.column);
            assert_eq!(f.kind.is_categorical(), v.as_category().is_some());
        }
        assert!(d.value("BMI").is_none());
        assert_eq!(d.fields().count(), FORM_FIELDS.len());
    }

    #[test]
    fn setters_reject_wrong_kind() {
        let mut d = RawInput::default();
        assert!(!d.set_number(field::GENDER, 1.0));
        assert!(!d.set_category(field::AGE, "old"));
        assert!(d.set_number(field::WEIGHT, 80.5));
        assert_eq!(d.weight, 80.5);
    }

    #[test]
    fn json_uses_training_column_names() {
        let d = RawInput::default();
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["family_history_with_overweight"], "yes");
        assert_eq!(v["MTRANS"], "Automobile");
        let back: RawInput = serde_json::from_value(v).unwrap();
        assert_eq!(back, d);
    }
}
