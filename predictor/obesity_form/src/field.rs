//! Static catalogue of the questionnaire fields.
//!
//! Column names are the names the classifier was trained on; labels are what
//! the form shows to the person filling it in.

use serde::{Deserialize, Serialize};

pub const GENDER: &str = "Gender";
pub const AGE: &str = "Age";
pub const HEIGHT: &str = "Height";
pub const WEIGHT: &str = "Weight";
pub const FAMILY_HISTORY: &str = "family_history_with_overweight";
pub const FAVC: &str = "FAVC";
pub const FCVC: &str = "FCVC";
pub const NCP: &str = "NCP";
pub const CAEC: &str = "CAEC";
pub const SMOKE: &str = "SMOKE";
pub const CH2O: &str = "CH2O";
pub const SCC: &str = "SCC";
pub const FAF: &str = "FAF";
pub const TUE: &str = "TUE";
pub const CALC: &str = "CALC";
pub const MTRANS: &str = "MTRANS";

const YES_NO: &[&str] = &["yes", "no"];
const FREQUENCY: &[&str] = &["no", "Sometimes", "Frequently", "Always"];

/// What kind of value a field holds and which values it accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Real number within an inclusive range.
    Continuous { min: f64, max: f64, default: f64 },
    /// Unordered category; the first choice is the default.
    Nominal { choices: &'static [&'static str] },
    /// Ordered category, choices listed from lowest to highest.
    Ordinal { choices: &'static [&'static str] },
}

impl FieldKind {
    pub fn choices(&self) -> Option<&'static [&'static str]> {
        match self {
            FieldKind::Nominal { choices } | FieldKind::Ordinal { choices } => Some(choices),
            FieldKind::Continuous { .. } => None,
        }
    }

    pub fn is_categorical(&self) -> bool {
        self.choices().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub column: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Inclusive bounds of a continuous field.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self.kind {
            FieldKind::Continuous { min, max, .. } => Some((min, max)),
            _ => None,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.bounds()
            .map(|(min, max)| value >= min && value <= max)
            .unwrap_or(false)
    }
}

const fn continuous(
    column: &'static str,
    label: &'static str,
    min: f64,
    max: f64,
    default: f64,
) -> FieldSpec {
    FieldSpec {
        column,
        label,
        kind: FieldKind::Continuous { min, max, default },
    }
}

const fn nominal(
    column: &'static str,
    label: &'static str,
    choices: &'static [&'static str],
) -> FieldSpec {
    FieldSpec {
        column,
        label,
        kind: FieldKind::Nominal { choices },
    }
}

const fn ordinal(
    column: &'static str,
    label: &'static str,
    choices: &'static [&'static str],
) -> FieldSpec {
    FieldSpec {
        column,
        label,
        kind: FieldKind::Ordinal { choices },
    }
}

/// All form fields, in the order the form asks for them.
pub const FORM_FIELDS: &[FieldSpec] = &[
    nominal(GENDER, "Gender", &["Male", "Female"]),
    continuous(AGE, "Age (years)", 1.0, 100.0, 25.0),
    continuous(HEIGHT, "Height (m)", 1.0, 2.5, 1.70),
    continuous(WEIGHT, "Weight (kg)", 10.0, 200.0, 65.0),
    nominal(FAMILY_HISTORY, "Family history of overweight", YES_NO),
    nominal(FAVC, "Frequently eat high-calorie food?", YES_NO),
    continuous(FCVC, "Vegetable consumption frequency (0-3)", 0.0, 3.0, 2.0),
    continuous(NCP, "Main meals per day (0-3)", 0.0, 3.0, 3.0),
    ordinal(CAEC, "Snacking between meals?", FREQUENCY),
    nominal(SMOKE, "Do you smoke?", YES_NO),
    continuous(CH2O, "Daily water intake (0-3)", 0.0, 3.0, 2.0),
    nominal(SCC, "Monitor your calorie intake?", YES_NO),
    continuous(FAF, "Physical activity frequency (0-3)", 0.0, 3.0, 1.0),
    continuous(TUE, "Screen time with TV/devices (0-3)", 0.0, 3.0, 1.0),
    ordinal(CALC, "Alcohol consumption?", FREQUENCY),
    nominal(
        MTRANS,
        "Main mode of transportation",
        &[
            "Automobile",
            "Motorbike",
            "Bike",
            "Public_Transportation",
            "Walking",
        ],
    ),
];

pub fn field(column: &str) -> Option<&'static FieldSpec> {
    FORM_FIELDS.iter().find(|f| f.column == column)
}

/// Unit in which the form asks for height.
///
/// The record always stores meters; centimeters are converted when the
/// answer is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeightUnit {
    #[default]
    #[serde(rename = "m", alias = "meters")]
    Meters,
    #[serde(rename = "cm", alias = "centimeters")]
    Centimeters,
}

impl HeightUnit {
    /// Converts a height given in this unit to meters.
    pub fn to_meters(self, value: f64) -> f64 {
        match self {
            HeightUnit::Meters => value,
            HeightUnit::Centimeters => value / 100.0,
        }
    }

    pub fn from_meters(self, meters: f64) -> f64 {
        match self {
            HeightUnit::Meters => meters,
            // rounded so 1.70 m shows as 170 rather than 170.00000000000003
            HeightUnit::Centimeters => (meters * 100.0 * 1e6).round() / 1e6,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_has_sixteen_unique_columns() {
        assert_eq!(FORM_FIELDS.len(), 16);
        let mut cols: Vec<&str> = FORM_FIELDS.iter().map(|f| f.column).collect();
        cols.sort_unstable();
        cols.dedup();
        assert_eq!(cols.len(), 16);
    }

    #[test]
    fn continuous_defaults_are_inside_bounds() {
        for f in FORM_FIELDS {
            if let FieldKind::Continuous { default, .. } = f.kind {
                assert!(f.contains(default), "{} default out of range", f.column);
            }
        }
    }

    #[test]
    fn age_bounds_are_inclusive() {
        let age = field(AGE).unwrap();
        assert!(age.contains(1.0));
        assert!(age.contains(100.0));
        assert!(!age.contains(0.0));
        assert!(!age.contains(101.0));
    }

    #[test]
    fn centimeters_round_trip() {
        let cm = HeightUnit::Centimeters;
        assert!((cm.to_meters(170.0) - 1.70).abs() < 1e-12);
        assert_eq!(cm.from_meters(1.70), 170.0);
    }
}
