//! Line-oriented driver that walks a person through the form.
//!
//! The session is independent of any terminal library: the caller shows
//! [`FormSession::prompt`], reads a line and feeds it to
//! [`FormSession::handle_line`]. A record is only handed out once every field
//! has an accepted value.

use crate::field::{self, FieldKind, FieldSpec, HeightUnit, FORM_FIELDS};
use crate::input::RawInput;

/// Outcome of feeding one line to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum FormStep {
    /// Keep asking; the messages should be shown to the user.
    Continue(Vec<String>),
    /// Every field is filled in.
    Submitted(RawInput),
    Quit,
}

#[derive(Debug)]
pub struct FormSession {
    fields: &'static [FieldSpec],
    height_unit: HeightUnit,
    current: usize,
    draft: RawInput,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new(HeightUnit::default())
    }
}

impl FormSession {
    pub fn new(height_unit: HeightUnit) -> Self {
        Self {
            fields: FORM_FIELDS,
            height_unit,
            current: 0,
            draft: RawInput::default(),
        }
    }

    /// Field currently being asked for.
    pub fn current_field(&self) -> &'static FieldSpec {
        &self.fields[self.current]
    }

    /// Zero-based position of the current field.
    pub fn position(&self) -> usize {
        self.current
    }

    /// Bounds and default of a continuous field in the unit the form uses.
    fn display_range(&self, spec: &FieldSpec) -> Option<(f64, f64, f64)> {
        match spec.kind {
            FieldKind::Continuous { min, max, default } => {
                if spec.column == field::HEIGHT {
                    let u = self.height_unit;
                    Some((u.from_meters(min), u.from_meters(max), u.from_meters(default)))
                } else {
                    Some((min, max, default))
                }
            }
            _ => None,
        }
    }

    fn label(&self, spec: &FieldSpec) -> String {
        if spec.column == field::HEIGHT && self.height_unit == HeightUnit::Centimeters {
            "Height (cm)".to_string()
        } else {
            spec.label.to_string()
        }
    }

    pub fn prompt(&self) -> String {
        let spec = self.current_field();
        let n = self.current + 1;
        let total = self.fields.len();
        let label = self.label(spec);
        match spec.kind {
            FieldKind::Nominal { choices } | FieldKind::Ordinal { choices } => {
                let listed: Vec<String> = choices
                    .iter()
                    .enumerate()
                    .map(|(i, c)| format!("{}={c}", i + 1))
                    .collect();
                format!(
                    "[{n}/{total}] {label} ({}) [{}]: ",
                    listed.join(", "),
                    choices[0]
                )
            }
            FieldKind::Continuous { .. } => {
                let (min, max, default) = self.display_range(spec).unwrap_or_default();
                format!("[{n}/{total}] {label} {min}..={max} [{default}]: ")
            }
        }
    }

    /// Starts over with the form defaults.
    pub fn reset(&mut self) {
        self.current = 0;
        self.draft = RawInput::default();
    }

    fn handle_command(&mut self, cmd: &str) -> FormStep {
        match cmd {
            ":help" | ":h" => FormStep::Continue(vec![
                "commands: :help, :back, :reset, :quit".to_string(),
                "press enter to keep the value in brackets; pick choices by name or number"
                    .to_string(),
            ]),
            ":q" | ":quit" | ":exit" => FormStep::Quit,
            ":back" | ":b" => {
                if self.current > 0 {
                    self.current -= 1;
                    FormStep::Continue(Vec::new())
                } else {
                    FormStep::Continue(vec!["already at the first field".to_string()])
                }
            }
            ":reset" => {
                self.reset();
                FormStep::Continue(vec!["form reset".to_string()])
            }
            other => FormStep::Continue(vec![format!("error: unknown command '{other}'")]),
        }
    }

    pub fn handle_line(&mut self, line: &str) -> FormStep {
        let trimmed = line.trim();
        if trimmed.starts_with(':') {
            return self.handle_command(trimmed);
        }

        let spec = *self.current_field();
        let accepted = match spec.kind {
            FieldKind::Nominal { choices } | FieldKind::Ordinal { choices } => {
                self.accept_choice(&spec, choices, trimmed)
            }
            FieldKind::Continuous { .. } => self.accept_number(&spec, trimmed),
        };
        if let Err(msg) = accepted {
            return FormStep::Continue(vec![format!("error: {msg}")]);
        }

        self.current += 1;
        if self.current == self.fields.len() {
            let record = std::mem::take(&mut self.draft);
            self.current = 0;
            log::debug!("form submitted: {record:?}");
            return FormStep::Submitted(record);
        }
        FormStep::Continue(Vec::new())
    }

    fn accept_choice(
        &mut self,
        spec: &FieldSpec,
        choices: &'static [&'static str],
        answer: &str,
    ) -> Result<(), String> {
        let picked = if answer.is_empty() {
            // keep whatever the draft holds (defaults or an earlier answer)
            return Ok(());
        } else if let Ok(i) = answer.parse::<usize>() {
            choices
                .get(i.wrapping_sub(1))
                .copied()
                .ok_or_else(|| format!("pick a number between 1 and {}", choices.len()))?
        } else {
            choices
                .iter()
                .copied()
                .find(|c| c.eq_ignore_ascii_case(answer))
                .ok_or_else(|| format!("'{answer}' is not one of: {}", choices.join(", ")))?
        };
        self.draft.set_category(spec.column, picked);
        Ok(())
    }

    fn accept_number(&mut self, spec: &FieldSpec, answer: &str) -> Result<(), String> {
        if answer.is_empty() {
            return Ok(());
        }
        let value: f64 = answer
            .replace(',', ".")
            .parse()
            .map_err(|_| format!("'{answer}' is not a number"))?;
        let (min, max, _) = self.display_range(spec).unwrap_or_default();
        if !value.is_finite() || value < min || value > max {
            return Err(format!("{} must be between {min} and {max}", self.label(spec)));
        }
        let stored = if spec.column == field::HEIGHT {
            self.height_unit.to_meters(value)
        } else {
            value
        };
        self.draft.set_number(spec.column, stored);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn submit_all(session: &mut FormSession, answers: &[&str]) -> FormStep {
        let mut last = FormStep::Continue(Vec::new());
        for a in answers {
            last = session.handle_line(a);
        }
        last
    }

    #[test]
    fn enter_everywhere_submits_defaults() {
        let mut s = FormSession::default();
        let step = submit_all(&mut s, &[""; 16]);
        assert_eq!(step, FormStep::Submitted(RawInput::default()));
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn choices_by_number_and_name() {
        let mut s = FormSession::default();
        assert_eq!(s.handle_line("2"), FormStep::Continue(Vec::new()));
        let mut rest = vec![""; 14];
        rest.push("public_transportation");
        match submit_all(&mut s, &rest) {
            FormStep::Submitted(r) => {
                assert_eq!(r.gender, "Female");
                assert_eq!(r.mtrans, "Public_Transportation");
            }
            other => panic!("expected submission, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_number_is_asked_again() {
        let mut s = FormSession::default();
        s.handle_line("");
        match s.handle_line("101") {
            FormStep::Continue(msgs) => assert!(msgs[0].contains("between 1 and 100")),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(s.current_field().column, field::AGE);
        s.handle_line("40");
        assert_eq!(s.current_field().column, field::HEIGHT);
    }

    #[test]
    fn unknown_choice_is_rejected() {
        let mut s = FormSession::default();
        match s.handle_line("Other") {
            FormStep::Continue(msgs) => assert!(msgs[0].contains("not one of")),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(s.position(), 0);
        match s.handle_line("7") {
            FormStep::Continue(msgs) => assert!(msgs[0].contains("between 1 and 2")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn centimeter_height_is_stored_in_meters() {
        let mut s = FormSession::new(HeightUnit::Centimeters);
        s.handle_line("");
        s.handle_line("");
        assert!(s.prompt().contains("Height (cm) 100..=250"));
        s.handle_line("182");
        match submit_all(&mut s, &[""; 13]) {
            FormStep::Submitted(r) => assert!((r.height - 1.82).abs() < 1e-12),
            other => panic!("expected submission, got {other:?}"),
        }
    }

    #[test]
    fn back_reset_and_quit() {
        let mut s = FormSession::default();
        s.handle_line("");
        s.handle_line("30");
        s.handle_line(":back");
        assert_eq!(s.current_field().column, field::AGE);
        s.handle_line(":reset");
        assert_eq!(s.position(), 0);
        assert_eq!(s.handle_line(":q"), FormStep::Quit);
    }

    #[test]
    fn prompt_lists_choices_and_default() {
        let s = FormSession::default();
        assert_eq!(s.prompt(), "[1/16] Gender (1=Male, 2=Female) [Male]: ");
    }
}
