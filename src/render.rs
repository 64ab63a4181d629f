use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{profile::ProfileSeries, quantity::KilowattHours, series::RegularSeries};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

#[must_use]
pub fn build_profile_table(profile: &ProfileSeries) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Time", "Expected"]);
    for (timestamp, value) in &profile.points {
        table.add_row(vec![
            Cell::new(timestamp.format("%H:%M")),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// The quarter-hour day view, optionally with the synthesized profile next
/// to the measurements. The profile must be labeled by interval start so
/// its slots line up with the reconstructed ones.
#[must_use]
pub fn build_day_table(series: &RegularSeries, profile: Option<&ProfileSeries>) -> Table {
    let expected: HashMap<NaiveDateTime, KilowattHours> =
        profile.map(|profile| profile.points.iter().copied().collect()).unwrap_or_default();

    let mut table = new_table();
    let mut header = vec!["Time", "Reading", "Consumption"];
    if profile.is_some() {
        header.push("Expected");
    }
    table.set_header(header);

    for sample in series.iter() {
        let mut reading_cell =
            Cell::new(sample.cumulative).set_alignment(CellAlignment::Right);
        if sample.interpolated {
            reading_cell = reading_cell.add_attribute(Attribute::Dim).fg(Color::DarkYellow);
        }
        let mut row = vec![
            Cell::new(sample.timestamp.format("%H:%M")),
            reading_cell,
            Cell::new(sample.delta).set_alignment(CellAlignment::Right),
        ];
        if profile.is_some() {
            let cell = expected
                .get(&sample.timestamp)
                .map_or_else(|| Cell::new(""), Cell::new)
                .set_alignment(CellAlignment::Right);
            row.push(cell);
        }
        table.add_row(row);
    }
    table
}

#[must_use]
pub fn build_overview_table(
    series: &RegularSeries,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Reading", "Consumption"]);
    for sample in series.iter() {
        let date = sample.timestamp.date();
        if start.is_some_and(|start| date < start) || end.is_some_and(|end| date > end) {
            continue;
        }
        table.add_row(vec![
            Cell::new(date),
            Cell::new(sample.cumulative).set_alignment(CellAlignment::Right),
            Cell::new(sample.delta).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_statistics_table(
    series: &RegularSeries,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Table {
    let none = KilowattHours::ZERO;
    let mut table = new_table();
    table.set_header(vec!["Minimum", "Maximum", "Mean", "Total"]);
    table.add_row(vec![
        Cell::new(series.min(start, end).unwrap_or(none)).set_alignment(CellAlignment::Right),
        Cell::new(series.max(start, end).unwrap_or(none)).set_alignment(CellAlignment::Right),
        Cell::new(series.mean(start, end).unwrap_or(none)).set_alignment(CellAlignment::Right),
        Cell::new(series.sum(start, end)).set_alignment(CellAlignment::Right),
    ]);
    table
}
