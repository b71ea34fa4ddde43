use fieldmap_core::{MappingError, MappingErrorKind, Record, SemanticType, Strategy, map};
use fieldmap_models::{MappedInstance, Model, TargetTypeTag, map_record};

fn base_record() -> Record {
    Record::from_pairs([
        ("CustomIdentifier", "42"),
        ("Label", "Foo"),
        ("Value", "3.5"),
        ("IsDeleted", "false"),
    ])
}

#[test]
fn minimal_record_maps_on_every_strategy() {
    let expected = Model {
        custom_identifier: 42,
        label: "Foo".to_string(),
        value: "3.5".parse().unwrap(),
        is_deleted: false,
        ..Model::default()
    };
    for strategy in Strategy::ALL {
        let model: Model = map(strategy, &base_record()).unwrap();
        assert_eq!(model, expected, "{strategy}");
        assert_eq!(model.created_on, None, "{strategy}");
        assert_eq!(model.number, None, "{strategy}");
    }
}

#[test]
fn absent_required_field_is_reported() {
    let record = Record::from_pairs([("Label", "Foo"), ("Value", "3.5"), ("IsDeleted", "false")]);
    for strategy in Strategy::ALL {
        let err = map::<Model>(strategy, &record).unwrap_err();
        assert_eq!(err, MappingError::missing_required("Model", "CustomIdentifier"), "{strategy}");
    }
}

#[test]
fn malformed_decimal_is_a_conversion_failure() {
    let mut record = base_record();
    record.insert("Value", "not-a-number");
    for strategy in Strategy::ALL {
        let err = map::<Model>(strategy, &record).unwrap_err();
        assert_eq!(err.field, "Value", "{strategy}");
        assert_eq!(
            err.kind,
            MappingErrorKind::ConversionFailure {
                semantic_type: SemanticType::Decimal,
                raw: "not-a-number".to_string()
            },
            "{strategy}"
        );
    }
    insta::assert_snapshot!(
        map::<Model>(Strategy::CachedAccessor, &record).unwrap_err(),
        @r#"Model.Value: "not-a-number" is not a valid Decimal"#
    );
}

#[test]
fn unknown_field_is_rejected() {
    let mut record = base_record();
    record.insert("Unexpected", "x");
    for strategy in Strategy::ALL {
        let err = map::<Model>(strategy, &record).unwrap_err();
        assert_eq!(err, MappingError::unknown_field("Model", "Unexpected"), "{strategy}");
    }
}

#[test]
fn unannotated_field_is_skipped() {
    let mut record = base_record();
    record.insert("Id", "not even a number");
    for strategy in Strategy::ALL {
        let model: Model = map(strategy, &record).unwrap();
        assert_eq!(model.id, 0, "{strategy}");
    }
}

#[test]
fn blank_required_value_fails_at_its_entry() {
    let mut record = base_record();
    record.insert("Label", "   ");
    record.insert("Unexpected", "x");
    for strategy in Strategy::ALL {
        let err = map::<Model>(strategy, &record).unwrap_err();
        assert_eq!(err, MappingError::missing_required("Model", "Label"), "{strategy}");
    }
}

#[test]
fn blank_optional_values_stay_unset() {
    let mut record = base_record();
    record.insert("Foo", "");
    record.insert("Bar", " ");
    record.insert_absent("Number");
    record.insert_absent("CreatedOn");
    for strategy in Strategy::ALL {
        let model: Model = map(strategy, &record).unwrap();
        assert_eq!((model.foo, model.bar, model.number), (None, None, None), "{strategy}");
    }
}

#[test]
fn map_record_dispatches_on_the_tag() {
    for strategy in Strategy::ALL {
        let instance = map_record(TargetTypeTag::Model, strategy, &base_record()).unwrap();
        assert!(matches!(&instance, MappedInstance::Model(m) if m.custom_identifier == 42));
    }

    let err = map_record(TargetTypeTag::InferredModel, Strategy::CachedReflective, &base_record())
        .unwrap_err();
    assert_eq!(err, MappingError::missing_required("InferredModel", "CreatedOn"));
}

#[test]
fn json_records_map_like_built_ones() {
    let record: Record = serde_json::from_str(
        r#"{"CustomIdentifier": "42", "Label": "Foo", "Value": "3.5", "IsDeleted": "false", "AnotherDate": null}"#,
    )
    .unwrap();
    for strategy in Strategy::ALL {
        assert_eq!(
            map::<Model>(strategy, &record),
            map::<Model>(strategy, &base_record()),
            "{strategy}"
        );
    }
}
