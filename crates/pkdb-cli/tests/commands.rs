//! Subcommand bodies against the built-in catalog.

use std::path::Path;
use std::sync::Arc;

use pkdb_cli::commands::{
    convert_value, describe_json, normalize_value, types_table, validate_file,
};
use pkdb_cli::submission::CheckSettings;
use pkdb_model::{MeasurementTypeCatalog, RecordField, Violation};
use pkdb_units::{UnitError, UnitRegistry};

fn catalog() -> MeasurementTypeCatalog {
    let registry = Arc::new(UnitRegistry::standard().expect("standard registry"));
    pkdb_standards::embedded_catalog(registry).expect("embedded catalog")
}

fn rendered_value(output: &str) -> (f64, &str) {
    let (value, unit) = output.split_once(' ').expect("value and unit");
    (value.parse().expect("number"), unit)
}

#[test]
fn normalize_prints_canonical_value() {
    let catalog = catalog();
    let output = normalize_value(&catalog, "body weight", 1000.0, "g").unwrap();
    let (value, unit) = rendered_value(&output);
    assert!((value - 1.0).abs() < 1e-9);
    assert_eq!(unit, "kg");
}

#[test]
fn normalize_rejects_unknown_types_and_percent() {
    let catalog = catalog();
    let error = normalize_value(&catalog, "shoe size", 42.0, "cm").unwrap_err();
    assert_eq!(
        error.downcast_ref::<Violation>(),
        Some(&Violation::UnknownMeasurementType {
            name: "shoe size".to_string()
        })
    );

    let error = normalize_value(&catalog, "recovery", 50.0, "%").unwrap_err();
    assert_eq!(
        error.downcast_ref::<Violation>(),
        Some(&Violation::PercentNotAllowed {
            field: RecordField::Unit
        })
    );

    let error = normalize_value(&catalog, "weight", 70.0, "ml").unwrap_err();
    assert_eq!(
        error.downcast_ref::<Violation>().map(Violation::code),
        Some("dimension_not_supported")
    );
}

#[test]
fn convert_between_units() {
    let catalog = catalog();
    let output = convert_value(&catalog, 2.0, "h", "min").unwrap();
    let (value, unit) = rendered_value(&output);
    assert!((value - 120.0).abs() < 1e-9);
    assert_eq!(unit, "min");
}

#[test]
fn convert_errors_keep_their_cause() {
    let catalog = catalog();
    let error = convert_value(&catalog, 1.0, "%", "count").unwrap_err();
    assert_eq!(
        error.downcast_ref::<UnitError>(),
        Some(&UnitError::PercentNotAllowed)
    );
    assert!(format!("{error:#}").starts_with("convert [%] to [count]: "));

    let error = convert_value(&catalog, 1.0, "kg", "l").unwrap_err();
    assert!(matches!(
        error.downcast_ref::<UnitError>(),
        Some(UnitError::IncompatibleDimensions { .. })
    ));
}

#[test]
fn show_describes_by_synonym() {
    let catalog = catalog();
    let json: serde_json::Value =
        serde_json::from_str(&describe_json(&catalog, "auc").unwrap()).unwrap();
    assert_eq!(json["name"], "auc_end");
    assert_eq!(json["requires_time"], true);
    assert!(describe_json(&catalog, "shoe size").is_err());
}

#[test]
fn types_lists_every_measurement_type() {
    let catalog = catalog();
    let table = types_table(&catalog);
    assert_eq!(table.row_iter().count(), catalog.len());
}

#[test]
fn validate_reports_unreadable_files() {
    let catalog = catalog();
    let error = validate_file(
        &catalog,
        Path::new("does/not/exist.json"),
        CheckSettings::default(),
    )
    .unwrap_err();
    assert!(error.to_string().starts_with("read does/not/exist.json"));
}
