use crate::calendar::{DayType, SeasonType};

/// Failures of the core are local, non-retriable contract violations:
/// there is no network and no external service behind any of them.
/// Every public operation surfaces its specific kind instead of returning
/// a partial or silently-zeroed result.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The date string could not be parsed.
    #[error("invalid date: {0}")]
    InvalidDate(#[from] chrono::ParseError),

    /// The static shape table has no row for the classified day.
    /// A configuration defect, not a transient fault.
    #[error("no static shape for {season}/{day}")]
    MissingShape { season: SeasonType, day: DayType },

    /// The dynamization table has no factor for the given ordinal day.
    #[error("no dynamization factor for day of year {day_of_year}")]
    MissingDynamizationFactor { day_of_year: u32 },

    /// Interpolation and differencing are undefined below two readings.
    #[error("{n_readings} raw reading(s) are not enough to reconstruct a series")]
    InsufficientData { n_readings: usize },

    /// A lookup table artifact failed to parse or validate.
    #[error("malformed lookup table: {0}")]
    MalformedTable(String),
}
