use obesity_encode::EncodeError;
use obesity_form::{FormSession, FormStep, HeightUnit, RawInput, ValidationError};
use obesity_model::PredictError;
use pretty_assertions::assert_eq;
use tests::{demo_predictor, reference_input};

#[test]
fn reference_person_encodes_in_training_order() {
    let predictor = demo_predictor();
    let row = predictor.encode(&reference_input()).unwrap();
    let columns: Vec<&str> = predictor.bundle().schema().names().collect();
    assert_eq!(row.columns(), columns.as_slice());
    assert_eq!(
        row.values(),
        [0.0, 25.0, 1.70, 65.0, 0.0, 0.0, 2.0, 3.0, 1.0, 0.0, 2.0, 0.0, 1.0, 1.0, 0.0, 3.0]
    );
}

#[test]
fn reference_person_is_normal_weight() {
    let prediction = demo_predictor().predict(&reference_input()).unwrap();
    assert_eq!(prediction.label, "Normal_Weight");
    assert_eq!(prediction.class, 1);
    assert_eq!(prediction.probabilities.len(), 7);
    let total: f64 = prediction.probabilities.iter().map(|p| p.probability).sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn much_heavier_person_gets_a_different_level() {
    let predictor = demo_predictor();
    let base = predictor.predict(&reference_input()).unwrap();
    let heavy = predictor
        .predict(&RawInput {
            weight: 150.0,
            ..reference_input()
        })
        .unwrap();
    assert_ne!(heavy.class, base.class);
    assert_eq!(heavy.label, "Obesity_Type_III");
}

#[test]
fn repeated_requests_agree() {
    let predictor = demo_predictor();
    let first = predictor.predict(&reference_input()).unwrap();
    for _ in 0..10 {
        assert_eq!(predictor.predict(&reference_input()).unwrap(), first);
    }
    let reloaded = demo_predictor().predict(&reference_input()).unwrap();
    assert_eq!(reloaded, first);
}

#[test]
fn unknown_gender_is_rejected_not_defaulted() {
    let input = RawInput {
        gender: "Other".into(),
        ..reference_input()
    };
    assert_eq!(
        demo_predictor().predict(&input),
        Err(PredictError::Encode(EncodeError::UnknownCategory {
            column: "Gender".into(),
            value: "Other".into(),
        }))
    );
}

#[test]
fn category_lookup_is_exact() {
    let input = RawInput {
        mtrans: "walking".into(),
        ..reference_input()
    };
    assert!(matches!(
        demo_predictor().predict(&input),
        Err(PredictError::Encode(EncodeError::UnknownCategory { .. }))
    ));
}

#[test]
fn age_boundaries() {
    let predictor = demo_predictor();
    for age in [1.0, 100.0] {
        let input = RawInput {
            age,
            ..reference_input()
        };
        assert!(predictor.predict(&input).is_ok(), "age {age} should be accepted");
    }
    for age in [0.0, 101.0] {
        let input = RawInput {
            age,
            ..reference_input()
        };
        assert!(
            matches!(predictor.predict(&input), Err(PredictError::Validation(_))),
            "age {age} should be rejected"
        );
    }
}

#[test]
fn zero_height_or_weight_is_rejected_before_encoding() {
    let predictor = demo_predictor();
    let zero_height = RawInput {
        height: 0.0,
        gender: "Other".into(),
        ..reference_input()
    };
    assert_eq!(
        predictor.predict(&zero_height),
        Err(PredictError::Validation(ValidationError::NonPositiveBody))
    );
    let zero_weight = RawInput {
        weight: 0.0,
        ..reference_input()
    };
    assert_eq!(
        predictor.predict(&zero_weight),
        Err(PredictError::Validation(ValidationError::NonPositiveBody))
    );
}

/// Answers the form in centimeters and checks it lands on the same
/// prediction as the meter-based record.
#[test]
fn centimeter_form_matches_meter_record() {
    let answers = [
        "Female", "25", "170", "65", "no", "no", "2", "3", "Sometimes", "no", "2", "no", "1",
        "1", "no", "4",
    ];
    let mut session = FormSession::new(HeightUnit::Centimeters);
    let mut submitted = None;
    for answer in answers {
        match session.handle_line(answer) {
            FormStep::Continue(messages) => assert!(messages.is_empty(), "{messages:?}"),
            FormStep::Submitted(record) => submitted = Some(record),
            FormStep::Quit => panic!("form quit"),
        }
    }
    let record = submitted.expect("form submitted after the last answer");
    assert_eq!(record, reference_input());

    let predictor = demo_predictor();
    assert_eq!(
        predictor.predict(&record).unwrap(),
        predictor.predict(&reference_input()).unwrap()
    );
}

#[test]
fn json_record_uses_training_column_names() {
    let json = r#"{
        "Gender": "Female", "Age": 25, "Height": 1.70, "Weight": 65.0,
        "family_history_with_overweight": "no", "FAVC": "no", "FCVC": 2, "NCP": 3,
        "CAEC": "Sometimes", "SMOKE": "no", "CH2O": 2, "SCC": "no", "FAF": 1, "TUE": 1,
        "CALC": "no", "MTRANS": "Public_Transportation"
    }"#;
    let record: RawInput = serde_json::from_str(json).unwrap();
    assert_eq!(record, reference_input());
}
