pub mod aggregate;
pub mod stats;

use std::collections::HashMap;

use chrono::{NaiveDateTime, TimeDelta};
use itertools::Itertools;

use crate::{prelude::*, quantity::KilowattHours, reading::RawReading};

/// Cadence of the day view.
pub const QUARTER_HOUR: TimeDelta = TimeDelta::minutes(15);

/// Cadence of the overview.
pub const ONE_DAY: TimeDelta = TimeDelta::days(1);

/// One slot of a reconstructed series. The delta is the forward difference
/// towards the next slot, so it covers the cadence interval that starts at
/// this timestamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub cumulative: KilowattHours,
    pub interpolated: bool,
    pub delta: KilowattHours,
}

/// An evenly spaced consumption series reconstructed from raw readings.
/// Immutable once built; timestamps are strictly increasing with uniform
/// spacing equal to the cadence.
pub struct RegularSeries {
    cadence: TimeDelta,
    samples: Vec<Sample>,
}

impl RegularSeries {
    /// Regularize raw cumulative readings onto a fixed-cadence grid:
    /// deduplicate by timestamp (first reading wins), mark grid slots
    /// without an exact raw match as interpolated, fill them by
    /// time-weighted linear interpolation, and difference adjacent slots.
    /// The final grid slot has no successor to difference against and is
    /// dropped.
    #[instrument(skip_all, fields(n_readings = readings.len()))]
    pub fn reconstruct(readings: &[RawReading], cadence: TimeDelta) -> Result<Self> {
        if readings.len() < 2 {
            return Err(Error::InsufficientData { n_readings: readings.len() });
        }

        let mut known = HashMap::new();
        for reading in readings {
            known.entry(reading.timestamp).or_insert(reading.value);
        }
        let start = readings.iter().map(|reading| reading.timestamp).min().unwrap();
        let end = readings.iter().map(|reading| reading.timestamp).max().unwrap();

        let mut grid = Vec::new();
        let mut timestamp = start;
        while timestamp <= end {
            grid.push((timestamp, known.get(&timestamp).copied()));
            timestamp += cadence;
        }

        let filled = fill_gaps(&grid);
        let samples = grid
            .iter()
            .zip(filled)
            .map(|((timestamp, known), cumulative)| (*timestamp, known.is_none(), cumulative))
            .tuple_windows()
            .map(|((timestamp, interpolated, cumulative), (_, _, next))| Sample {
                timestamp,
                cumulative,
                interpolated,
                delta: next - cumulative,
            })
            .collect_vec();
        debug!(n_samples = samples.len(), "reconstructed");
        Ok(Self { cadence, samples })
    }

    #[must_use]
    pub const fn cadence(&self) -> TimeDelta {
        self.cadence
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}

/// Interpolate the unknown grid slots between their nearest known
/// neighbors. Interpolation is time-weighted rather than index-weighted,
/// and slots past the last known reading carry its value forward.
fn fill_gaps(grid: &[(NaiveDateTime, Option<KilowattHours>)]) -> Vec<KilowattHours> {
    let mut values = Vec::with_capacity(grid.len());
    // The grid starts at the earliest raw reading, so the first slot is known.
    let mut last_known = (grid[0].0, grid[0].1.unwrap_or_default());
    for (index, (timestamp, value)) in grid.iter().enumerate() {
        match value {
            Some(value) => {
                last_known = (*timestamp, *value);
                values.push(*value);
            }
            None => {
                let next_known = grid[index + 1..]
                    .iter()
                    .find_map(|(timestamp, value)| value.map(|value| (*timestamp, value)));
                values.push(match next_known {
                    Some((next_timestamp, next_value)) => {
                        #[allow(clippy::cast_precision_loss)]
                        let elapsed = (*timestamp - last_known.0).num_seconds() as f64;
                        #[allow(clippy::cast_precision_loss)]
                        let span = (next_timestamp - last_known.0).num_seconds() as f64;
                        KilowattHours(last_known.1.0 + (next_value.0 - last_known.1.0) * elapsed / span)
                    }
                    None => last_known.1,
                });
            }
        }
    }
    values
}
