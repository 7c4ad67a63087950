//! Record validation against the shipped measurement types.

use std::sync::Arc;

use pkdb_model::{MeasurementTypeCatalog, Record, RecordField, StatValue, Violation};
use pkdb_units::{Dimension, UnitRegistry};
use pkdb_validate::{ValidationOptions, Validator};
use serde_json::json;

fn catalog() -> MeasurementTypeCatalog {
    let registry = Arc::new(UnitRegistry::standard().expect("standard registry"));
    pkdb_standards::embedded_catalog(registry).expect("embedded catalog")
}

fn record(value: serde_json::Value) -> Record {
    serde_json::from_value(value).expect("record")
}

fn violations(catalog: &MeasurementTypeCatalog, name: &str, record: &Record) -> Vec<Violation> {
    let entry = catalog.get(name).unwrap();
    Validator::new(catalog)
        .validate_complete(entry, record)
        .expect_err("record should be rejected")
        .into_vec()
}

fn aggregated(catalog: &MeasurementTypeCatalog, name: &str, record: &Record) -> Vec<Violation> {
    let entry = catalog.get(name).unwrap();
    Validator::new(catalog)
        .with_options(ValidationOptions::aggregate())
        .validate_complete(entry, record)
        .expect_err("record should be rejected")
        .into_vec()
}

fn accepts(catalog: &MeasurementTypeCatalog, name: &str, record: &Record) {
    let entry = catalog.get(name).unwrap();
    if let Err(violations) = Validator::new(catalog).validate_complete(entry, record) {
        panic!("{name} rejected {record:?}: {violations}");
    }
}

#[test]
fn time_required_type_reports_both_missing_fields() {
    let catalog = catalog();
    let found = violations(
        &catalog,
        "auc_end",
        &record(json!({"value": 5.0, "unit": "mg*h/l"})),
    );
    assert_eq!(
        found,
        [
            Violation::MissingRequiredField {
                measurement_type: "auc_end".to_string(),
                field: RecordField::Time,
            },
            Violation::MissingRequiredField {
                measurement_type: "auc_end".to_string(),
                field: RecordField::TimeUnit,
            },
        ]
    );

    accepts(
        &catalog,
        "auc_end",
        &record(json!({"value": 5.0, "unit": "mg*h/l", "time": 24, "time_unit": "h"})),
    );
    let found = violations(
        &catalog,
        "auc_end",
        &record(json!({"value": 5.0, "unit": "mg*h/l", "time": 24})),
    );
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].field(), RecordField::TimeUnit);
}

#[test]
fn categorical_choices() {
    let catalog = catalog();
    accepts(&catalog, "sex", &record(json!({"choice": "male"})));

    let found = violations(&catalog, "sex", &record(json!({"choice": "unknown"})));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].code(), "choice_not_allowed");
    insta::assert_snapshot!(
        found[0],
        @r#"The choice `unknown` is not a valid choice for measurement type `sex`. Allowed choices are: `["male", "female"]`."#
    );

    let found = violations(&catalog, "sex", &Record::new());
    assert_eq!(
        found,
        [Violation::ChoiceRequired {
            measurement_type: "sex".to_string(),
            allowed_choices: vec!["male".to_string(), "female".to_string()],
        }]
    );
}

#[test]
fn percent_sign_is_rejected_for_any_type() {
    let catalog = catalog();
    for entry in catalog.iter() {
        let found = violations(
            &catalog,
            entry.name(),
            &record(json!({"value": 1.0, "unit": "%"})),
        );
        assert_eq!(
            found,
            [Violation::PercentNotAllowed {
                field: RecordField::Unit
            }],
            "{}",
            entry.name()
        );
        assert!(found[0].to_string().contains("'percent'"));
    }
}

#[test]
fn negative_weight_is_rejected() {
    let catalog = catalog();
    let found = violations(&catalog, "weight", &record(json!({"value": -5, "unit": "kg"})));
    assert_eq!(
        found,
        [Violation::NegativeValueNotAllowed {
            measurement_type: "weight".to_string(),
            field: RecordField::Value,
        }]
    );
}

#[test]
fn every_negative_field_is_named() {
    let catalog = catalog();
    let found = violations(
        &catalog,
        "concentration",
        &record(json!({"mean": 1.0, "sd": -0.1, "cv": [0.1, -0.2], "unit": "mg/l"})),
    );
    let fields: Vec<RecordField> = found.iter().map(Violation::field).collect();
    assert_eq!(fields, [RecordField::Sd, RecordField::Cv]);
}

#[test]
fn odd_value_shapes_pass_the_sign_check() {
    let catalog = catalog();
    let odd = record(json!({"value": "n/a", "mean": {"low": -1}, "unit": "kg"}));
    assert!(matches!(odd.value, Some(StatValue::Other(_))));
    accepts(&catalog, "weight", &odd);
}

#[test]
fn unit_given_where_none_is_permitted() {
    let catalog = catalog();
    let found = violations(
        &catalog,
        "sex",
        &record(json!({"choice": "male", "unit": "kg"})),
    );
    assert_eq!(
        found,
        [Violation::UnitNotAllowed {
            measurement_type: "sex".to_string(),
            unit: Some("kg".to_string()),
            dimension: Some(Dimension::base("mass")),
            allowed_dimensions: vec![],
            allowed_units: vec![],
        }]
    );
}

#[test]
fn unit_of_wrong_dimension_lists_alternatives() {
    let catalog = catalog();
    let found = violations(&catalog, "weight", &record(json!({"value": 1, "unit": "ml"})));
    insta::assert_json_snapshot!(found[0].payload(), @r#"
    {
      "field": "unit",
      "message": "For measurement type `weight` the unit [ml] with dimension [length] ** 3 is not allowed.",
      "allowed_dimensions": [
        "[mass]"
      ],
      "normalized_units": [
        "kg"
      ]
    }
    "#);
}

#[test]
fn missing_unit_is_rejected_unless_no_unit_is_listed() {
    let catalog = catalog();
    let found = violations(&catalog, "weight", &record(json!({"value": 70})));
    insta::assert_snapshot!(found[0], @"For measurement type `weight` a unit is required.");

    accepts(&catalog, "metabolic ratio", &record(json!({"value": 0.3})));
    accepts(
        &catalog,
        "metabolic ratio",
        &record(json!({"value": 0.3, "unit": "NO_UNIT"})),
    );
    // Blank strings count as absent.
    accepts(&catalog, "metabolic ratio", &record(json!({"value": 0.3, "unit": ""})));
}

#[test]
fn undefined_units_name_their_field() {
    let catalog = catalog();
    let found = violations(
        &catalog,
        "tmax",
        &record(json!({"value": 1, "unit": "furlong"})),
    );
    assert_eq!(
        found,
        [Violation::UnitUndefined {
            field: RecordField::Unit,
            unit: "furlong".to_string(),
        }]
    );

    let found = violations(
        &catalog,
        "tmax",
        &record(json!({"value": 1, "unit": "h", "time_unit": "fortnight"})),
    );
    assert_eq!(found[0].field(), RecordField::TimeUnit);
}

#[test]
fn malformed_unit_expressions_are_undefined() {
    let catalog = catalog();
    let nested = format!("{}kg{}", "(".repeat(200_000), ")".repeat(200_000));
    for unit in [nested.as_str(), "kg/0", "1e400*g", "0*kg"] {
        let found = violations(
            &catalog,
            "weight",
            &Record::new()
                .with_unit(unit)
                .with_stat(RecordField::Value, 70.0),
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code(), "unit_undefined");
        assert_eq!(found[0].field(), RecordField::Unit);
    }
}

#[test]
fn time_unit_must_be_a_time() {
    let catalog = catalog();
    let found = violations(
        &catalog,
        "cmax",
        &record(json!({"value": 1, "unit": "mg/l", "time": 2, "time_unit": "mg"})),
    );
    insta::assert_snapshot!(found[0], @"[mg] with dimension [mass] is not allowed for the time units.");
    accepts(
        &catalog,
        "cmax",
        &record(json!({"value": 1, "unit": "mg/l", "time": [0, 1, 2], "time_unit": "min"})),
    );
}

#[test]
fn numeric_categorical_types() {
    let catalog = catalog();
    accepts(&catalog, "medication", &record(json!({"choice": "Y"})));
    accepts(
        &catalog,
        "medication",
        &record(json!({"choice": "Y", "value": 200, "unit": "mg/day"})),
    );
    // Any type that lists choices needs one.
    let found = violations(
        &catalog,
        "caffeine consumption",
        &record(json!({"value": 2, "unit": "cups/day"})),
    );
    assert_eq!(found[0].code(), "choice_required");
}

#[test]
fn choice_on_numeric_type() {
    let catalog = catalog();
    let found = violations(
        &catalog,
        "weight",
        &record(json!({"value": 70, "unit": "kg", "choice": "heavy"})),
    );
    assert!(found[0].to_string().starts_with("The field `choice` is not allowed"));
}

#[test]
fn fail_fast_stops_at_first_failing_check() {
    let catalog = catalog();
    let messy = record(json!({"value": -1, "mean": [-2, 3], "unit": "ml", "choice": "x"}));
    let found = violations(&catalog, "weight", &messy);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].code(), "unit_not_allowed");

    let found = aggregated(&catalog, "weight", &messy);
    let fields: Vec<RecordField> = found.iter().map(Violation::field).collect();
    assert_eq!(
        fields,
        [
            RecordField::Unit,
            RecordField::Value,
            RecordField::Mean,
            RecordField::Choice
        ]
    );
}

#[test]
fn partial_validation_checks_units_only() {
    let catalog = catalog();
    let entry = catalog.get("auc_end").unwrap();
    let validator = Validator::new(&catalog);
    let partial = record(json!({"value": -5.0, "unit": "mg*h/l"}));
    assert!(validator.validate_units(entry, &partial).is_ok());
    assert!(validator.validate_complete(entry, &partial).is_err());

    let wrong = record(json!({"unit": "mg", "time_unit": "kg"}));
    let found = validator
        .with_options(ValidationOptions::aggregate())
        .validate_units(entry, &wrong)
        .unwrap_err();
    assert_eq!(found.fields(), [RecordField::Unit, RecordField::TimeUnit]);
}

#[test]
fn individual_checks() {
    let catalog = catalog();
    let validator = Validator::new(&catalog);
    let weight = catalog.get("weight").unwrap();
    let recovery = catalog.get("recovery").unwrap();

    assert!(validator.validate_unit(weight, &Record::new().with_unit("lb")).is_ok());
    let negative_max = Record::new().with_stat(RecordField::Max, -1.0);
    assert!(validator.validate_numeric(weight, &negative_max).is_err());
    assert!(validator.validate_choice(weight, &Record::new()).is_ok());
    assert!(validator.validate_time_unit(&Record::new().with_time_unit("week")).is_ok());
    let missing = validator
        .validate_time_required(recovery, &Record::new().with_time(24.0))
        .unwrap_err();
    assert_eq!(missing.fields(), [RecordField::TimeUnit]);
}

#[test]
fn lookup_by_synonym_before_validation() {
    let catalog = catalog();
    let validator = Validator::new(&catalog);
    assert!(validator
        .validate_named("body weight", &record(json!({"value": 70, "unit": "kg"})))
        .is_ok());
    let unknown = validator
        .validate_named("shoe size", &Record::new())
        .unwrap_err();
    assert_eq!(unknown.first().code(), "unknown_measurement_type");
    assert_eq!(unknown.first().field(), RecordField::MeasurementType);
}

#[test]
fn validators_run_concurrently() {
    let catalog = catalog();
    let validator = Validator::new(&catalog);
    std::thread::scope(|scope| {
        for value in [1.0, 2.0, 3.0, 4.0] {
            scope.spawn(move || {
                let entry = validator.catalog().get("weight").unwrap();
                let record = Record::new().with_unit("g").with_stat(RecordField::Value, value);
                assert!(validator.validate_complete(entry, &record).is_ok());
            });
        }
    });
}
