use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::{prelude::*, quantity::KilowattHours};

/// A raw meter reading as sourced from the external store: a timestamp and
/// the cumulative register value, possibly duplicated, possibly gapped.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct RawReading {
    pub timestamp: NaiveDateTime,

    /// The cumulative meter register, monotonically non-decreasing.
    pub value: KilowattHours,
}

/// Read an ordered reading list from a JSON file.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load(path: &Path) -> anyhow::Result<Vec<RawReading>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read `{}`", path.display()))?;
    let readings: Vec<RawReading> =
        serde_json::from_str(&text).context("failed to parse the readings file")?;
    info!(n_readings = readings.len(), "loaded");
    Ok(readings)
}

/// The readings of one day, including the next day's midnight reading so
/// the last quarter hour still gets a forward difference.
#[must_use]
pub fn day(readings: &[RawReading], date: NaiveDate) -> Vec<RawReading> {
    let start = date.and_hms_opt(0, 0, 0).unwrap();
    let end = start + TimeDelta::days(1) + TimeDelta::minutes(1);
    readings
        .iter()
        .filter(|reading| (start..=end).contains(&reading.timestamp))
        .copied()
        .collect()
}

/// The overview readings: only those taken exactly at midnight, one per day.
#[must_use]
pub fn overview(readings: &[RawReading]) -> Vec<RawReading> {
    readings
        .iter()
        .filter(|reading| reading.timestamp.time() == chrono::NaiveTime::MIN)
        .copied()
        .collect()
}
