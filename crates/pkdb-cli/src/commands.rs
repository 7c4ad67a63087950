//! Subcommand bodies. Each returns what the binary prints.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tracing::{info_span, trace};

use pkdb_model::MeasurementTypeCatalog;
use pkdb_normalize::Normalizer;
use pkdb_standards::load_default_catalog;

use crate::submission::{CheckSettings, ValidationReport, check_submissions, parse_submissions};
use crate::summary::{apply_table_style, dim_cell, header_cell};

pub fn load_catalog(explicit: Option<&Path>) -> Result<MeasurementTypeCatalog> {
    load_default_catalog(explicit).context("load measurement-type catalog")
}

pub fn types_table(catalog: &MeasurementTypeCatalog) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Measurement type"),
        header_cell("Kind"),
        header_cell("Units"),
        header_cell("Choices"),
        header_cell("Time"),
    ]);
    apply_table_style(&mut table);
    for entry in catalog.iter() {
        table.add_row(vec![
            Cell::new(entry.name()),
            Cell::new(entry.data_kind()),
            list_cell(&entry.unit_names()),
            list_cell(entry.choices()),
            if entry.requires_time() {
                Cell::new("required")
            } else {
                dim_cell("-")
            },
        ]);
    }
    table
}

/// Pretty JSON description of the type `name` (name, synonym or slug).
pub fn describe_json(catalog: &MeasurementTypeCatalog, name: &str) -> Result<String> {
    let entry = catalog.lookup(name)?;
    serde_json::to_string_pretty(&entry.describe())
        .with_context(|| format!("serialize measurement type {}", entry.name()))
}

pub fn validate_file(
    catalog: &MeasurementTypeCatalog,
    path: &Path,
    settings: CheckSettings,
) -> Result<ValidationReport> {
    let span = info_span!("validate", file = %path.display());
    let _guard = span.enter();
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let submissions = parse_submissions(&contents)
        .with_context(|| format!("parse submissions in {}", path.display()))?;
    Ok(check_submissions(catalog, &submissions, settings))
}

pub fn report_json(report: &ValidationReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("serialize validation report")
}

/// `magnitude unit` converted to the canonical unit of `name`, rendered as
/// `value unit`.
pub fn normalize_value(
    catalog: &MeasurementTypeCatalog,
    name: &str,
    magnitude: f64,
    unit: &str,
) -> Result<String> {
    let entry = catalog.lookup(name)?;
    let (value, canonical) = Normalizer::new(catalog).normalize(entry, magnitude, unit)?;
    trace!(measurement_type = entry.name(), unit = %canonical, value, "normalized");
    Ok(format!("{value} {canonical}"))
}

pub fn convert_value(
    catalog: &MeasurementTypeCatalog,
    magnitude: f64,
    from: &str,
    to: &str,
) -> Result<String> {
    let value = catalog
        .registry()
        .convert(magnitude, from, to)
        .with_context(|| format!("convert [{from}] to [{to}]"))?;
    Ok(format!("{value} {to}"))
}

fn list_cell<S: AsRef<str>>(values: &[S]) -> Cell {
    if values.is_empty() {
        return dim_cell("-");
    }
    let joined: Vec<&str> = values.iter().map(AsRef::<str>::as_ref).collect();
    Cell::new(joined.join(", "))
}
