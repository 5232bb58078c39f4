use obesity_encode::EncodeError;
use obesity_form::{FieldKind, FieldValue, RawInput, FORM_FIELDS};
use obesity_model::{PredictError, Predictor};
use proptest::prelude::*;
use std::sync::OnceLock;
use tests::demo_predictor;

fn predictor() -> &'static Predictor {
    static PREDICTOR: OnceLock<Predictor> = OnceLock::new();
    PREDICTOR.get_or_init(demo_predictor)
}

/// Any record the form could produce.
fn form_input() -> impl Strategy<Value = RawInput> {
    let answers: Vec<BoxedStrategy<FieldValue<'static>>> = FORM_FIELDS
        .iter()
        .map(|spec| match spec.kind {
            FieldKind::Continuous { min, max, .. } => {
                (min..=max).prop_map(FieldValue::Number).boxed()
            }
            FieldKind::Nominal { choices } | FieldKind::Ordinal { choices } => {
                prop::sample::select(choices)
                    .prop_map(FieldValue::Category)
                    .boxed()
            }
        })
        .collect();
    answers.prop_map(|values| {
        let mut input = RawInput::default();
        for (spec, value) in FORM_FIELDS.iter().zip(values) {
            match value {
                FieldValue::Number(x) => input.set_number(spec.column, x),
                FieldValue::Category(c) => input.set_category(spec.column, c),
            };
        }
        input
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn every_form_record_gets_a_known_label(input in form_input()) {
        let p = predictor().predict(&input).unwrap();
        let target = predictor().bundle().target();
        prop_assert!(target.classes().contains(&p.label));
    }

    #[test]
    fn prediction_is_deterministic(input in form_input()) {
        let a = predictor().predict(&input).unwrap();
        let b = predictor().predict(&input.clone()).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn nominal_codes_decode_to_the_submitted_label(input in form_input()) {
        let bundle = predictor().bundle();
        let row = predictor().encode(&input).unwrap();
        for (column, table) in &bundle.tables().nominal {
            let code = row.get(column).unwrap() as u32;
            let submitted = input.value(column).and_then(|v| v.as_category()).unwrap();
            prop_assert_eq!(table.decode(code), Some(submitted));
        }
    }

    #[test]
    fn ordinal_ranks_follow_frequency(a in 0usize..4, b in 0usize..4) {
        const ORDER: [&str; 4] = ["no", "Sometimes", "Frequently", "Always"];
        for map in predictor().bundle().tables().ordinal.values() {
            prop_assert!(map.is_monotonic_over(&ORDER));
            let ra = map.rank("x", ORDER[a]).unwrap();
            let rb = map.rank("x", ORDER[b]).unwrap();
            prop_assert_eq!(a.cmp(&b), ra.cmp(&rb));
        }
    }

    #[test]
    fn labels_outside_the_tables_are_rejected(gender in "[A-Za-z]{1,8}") {
        prop_assume!(gender != "Male" && gender != "Female");
        let input = RawInput { gender: gender.clone(), ..RawInput::default() };
        let rejected = matches!(
            predictor().predict(&input),
            Err(PredictError::Encode(EncodeError::UnknownCategory { .. }))
        );
        prop_assert!(rejected);
    }
}
