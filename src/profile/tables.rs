use std::collections::HashMap;

use serde::Deserialize;

use crate::{
    calendar::{DayType, SeasonType},
    prelude::*,
};

/// Quarter-hour slots of one canonical day.
pub const SLOTS_PER_DAY: usize = 96;

/// The last ordinal day the dynamization table carries a factor for.
/// Day 366 of a leap year reuses it.
const LAST_TABLE_DAY: u32 = 365;

/// The canonical, season/day-type-specific normalized consumption curves,
/// referenced to an annual energy of 1000 kWh. Loaded once at startup and
/// never mutated afterward.
#[derive(Deserialize)]
#[serde(transparent)]
pub struct ShapeTable(HashMap<SeasonType, HashMap<DayType, Vec<f64>>>);

impl ShapeTable {
    /// Parse and validate a shape table from its TOML artifact.
    pub fn from_toml(text: &str) -> Result<Self> {
        let this: Self =
            toml::from_str(text).map_err(|error| Error::MalformedTable(error.to_string()))?;
        for (season, rows) in &this.0 {
            for (day, row) in rows {
                if row.len() != SLOTS_PER_DAY {
                    return Err(Error::MalformedTable(format!(
                        "shape row {season}/{day} has {} values, expected {SLOTS_PER_DAY}",
                        row.len(),
                    )));
                }
            }
        }
        Ok(this)
    }

    /// The table shipped with the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_toml(include_str!("../../data/profile.toml"))
    }

    pub fn row(&self, season: SeasonType, day: DayType) -> Result<&[f64]> {
        self.0
            .get(&season)
            .and_then(|rows| rows.get(&day))
            .map(Vec::as_slice)
            .ok_or(Error::MissingShape { season, day })
    }
}

/// Per-day-of-year scalar factors correcting the canonical shape for
/// intra-season drift. Same loading discipline as [`ShapeTable`].
#[derive(Deserialize)]
pub struct DynamizationTable {
    factors: Vec<f64>,
}

impl DynamizationTable {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|error| Error::MalformedTable(error.to_string()))
    }

    pub fn bundled() -> Result<Self> {
        Self::from_toml(include_str!("../../data/dynamization.toml"))
    }

    /// Look up the factor for an ordinal day (1-based).
    pub fn factor(&self, day_of_year: u32) -> Result<f64> {
        let clamped = day_of_year.min(LAST_TABLE_DAY);
        clamped
            .checked_sub(1)
            .and_then(|index| self.factors.get(index as usize))
            .copied()
            .ok_or(Error::MissingDynamizationFactor { day_of_year })
    }
}
