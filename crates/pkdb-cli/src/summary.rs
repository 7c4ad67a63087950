//! Styled terminal tables.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use crate::submission::{RecordOutcome, Status, ValidationReport};

pub fn print_report(report: &ValidationReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Measurement type"),
        header_cell("Status"),
        header_cell("Field"),
        header_cell("Code"),
        header_cell("Message"),
    ]);
    apply_report_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for outcome in &report.records {
        add_outcome_rows(&mut table, outcome);
    }
    println!("{table}");
    println!("{} accepted, {} rejected", report.accepted, report.rejected);
}

fn add_outcome_rows(table: &mut Table, outcome: &RecordOutcome) {
    if outcome.violations.is_empty() {
        table.add_row(vec![
            Cell::new(outcome.index),
            Cell::new(&outcome.measurement_type),
            status_cell(outcome.status),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ]);
        return;
    }
    for (position, violation) in outcome.violations.iter().enumerate() {
        let (index, measurement_type, status) = if position == 0 {
            (
                Cell::new(outcome.index),
                Cell::new(&outcome.measurement_type),
                status_cell(outcome.status),
            )
        } else {
            (dim_cell(""), dim_cell(""), dim_cell(""))
        };
        table.add_row(vec![
            index,
            measurement_type,
            status,
            Cell::new(&violation.payload.field),
            Cell::new(violation.code).fg(Color::Yellow),
            Cell::new(&violation.payload.message),
        ]);
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_report_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(4)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Fixed(12)),
            ColumnConstraint::UpperBoundary(Width::Fixed(26)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
        ]);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: Status) -> Cell {
    match status {
        Status::Accepted => Cell::new("ok")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Status::Rejected => Cell::new("REJECTED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}
