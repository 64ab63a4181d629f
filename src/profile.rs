pub mod tables;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Weekday};

use crate::{
    calendar::{HolidayCalendar, classify_day, classify_season},
    prelude::*,
    profile::tables::{DynamizationTable, ShapeTable},
    quantity::KilowattHours,
};

/// The annual energy the static shapes are normalized to.
const REFERENCE_YEARLY_KWH: f64 = 1000.0;

/// How the 96 quarter-hour slots are labeled. The slot values are identical
/// in both modes, only the timestamps differ.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SlotLabeling {
    /// Slot `k` is labeled by the end of its interval: `00:15` through the
    /// next day's `00:00`.
    #[default]
    IntervalEnd,

    /// Slot `k` is labeled by the start of its interval: `00:00` through
    /// `23:45` of the same day.
    IntervalStart,
}

/// The scaled quarter-hour consumption curve for one date.
/// Produced fresh on every call, never persisted.
#[derive(Debug)]
pub struct ProfileSeries {
    pub labeling: SlotLabeling,
    pub points: Vec<(NaiveDateTime, KilowattHours)>,
}

impl ProfileSeries {
    #[must_use]
    pub fn total(&self) -> KilowattHours {
        self.points.iter().map(|(_, value)| *value).sum()
    }
}

/// Turns a date and a yearly energy value into the expected consumption
/// curve of an average household.
pub struct Synthesizer<H> {
    shapes: ShapeTable,
    dynamization: DynamizationTable,
    holidays: H,
}

impl<H: HolidayCalendar> Synthesizer<H> {
    pub const fn new(shapes: ShapeTable, dynamization: DynamizationTable, holidays: H) -> Self {
        Self { shapes, dynamization, holidays }
    }

    /// Parse an ISO 8601 date string and synthesize its profile.
    pub fn synthesize_iso(
        &self,
        date: &str,
        yearly_energy: KilowattHours,
        labeling: SlotLabeling,
    ) -> Result<ProfileSeries> {
        self.synthesize(date.parse()?, yearly_energy, labeling)
    }

    /// Synthesize the scaled quarter-hour curve for one date: classify the
    /// day, look up its normalized shape, scale it by the yearly energy and
    /// the day-of-year dynamization factor, and round each slot to one
    /// decimal place. On the last Sunday of March the slots of the lost
    /// spring-forward hour are zeroed — they physically never occurred.
    #[instrument(skip(self))]
    pub fn synthesize(
        &self,
        date: NaiveDate,
        yearly_energy: KilowattHours,
        labeling: SlotLabeling,
    ) -> Result<ProfileSeries> {
        let season = classify_season(date);
        let day = classify_day(date, &self.holidays);
        debug!(%season, %day, "classified");

        let row = self.shapes.row(season, day)?;
        let factor = self.dynamization.factor(date.ordinal())?;
        let scale = yearly_energy.0 / REFERENCE_YEARLY_KWH * factor;
        let mut values: Vec<KilowattHours> =
            row.iter().map(|value| KilowattHours(value * scale).round_to(1)).collect();

        if is_last_sunday_of_march(date) {
            // Wall clock 02:15 through 03:00 inclusive.
            for value in &mut values[8..=11] {
                *value = KilowattHours::ZERO;
            }
        }

        let midnight = date.and_hms_opt(0, 0, 0).unwrap();
        let first_slot = match labeling {
            SlotLabeling::IntervalEnd => 1,
            SlotLabeling::IntervalStart => 0,
        };
        let points = values
            .into_iter()
            .zip(first_slot..)
            .map(|(value, slot)| (midnight + TimeDelta::minutes(15 * slot), value))
            .collect();
        Ok(ProfileSeries { labeling, points })
    }
}

fn is_last_sunday_of_march(date: NaiveDate) -> bool {
    date.month() == 3 && date.day() >= 25 && date.weekday() == Weekday::Sun
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{calendar::holidays::GermanHolidays, profile::tables::SLOTS_PER_DAY};

    fn synthesizer() -> Synthesizer<GermanHolidays> {
        Synthesizer::new(
            ShapeTable::bundled().unwrap(),
            DynamizationTable::bundled().unwrap(),
            GermanHolidays,
        )
    }

    /// The reference fixture: Whit Monday 2020 classifies as a summer
    /// Sunday, and the whole day totals 534.3 kWh at 13200 kWh/year.
    #[test]
    fn test_golden_profile() {
        let profile = synthesizer()
            .synthesize_iso("2020-06-01", KilowattHours(13200.0), SlotLabeling::default())
            .unwrap();
        assert_eq!(profile.points.len(), SLOTS_PER_DAY);
        assert_abs_diff_eq!(profile.total().0, 534.3, epsilon = 1e-9);
        assert_abs_diff_eq!(profile.points[0].1.0, 1.7);
        assert_abs_diff_eq!(profile.points[32].1.0, 4.6);
        assert_abs_diff_eq!(profile.points[79].1.0, 9.4);
    }

    #[test]
    fn test_interval_end_labeling() {
        let profile = synthesizer()
            .synthesize_iso("2020-06-01", KilowattHours(13200.0), SlotLabeling::IntervalEnd)
            .unwrap();
        let midnight = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(profile.points[0].0, midnight + TimeDelta::minutes(15));
        assert_eq!(profile.points[95].0, midnight + TimeDelta::days(1));
    }

    #[test]
    fn test_interval_start_labeling_keeps_the_values() {
        let synthesizer = synthesizer();
        let date = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        let end = synthesizer
            .synthesize(date, KilowattHours(13200.0), SlotLabeling::IntervalEnd)
            .unwrap();
        let start = synthesizer
            .synthesize(date, KilowattHours(13200.0), SlotLabeling::IntervalStart)
            .unwrap();
        assert_eq!(start.points[0].0, date.and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(start.points[95].0, date.and_hms_opt(23, 45, 0).unwrap());
        for (lhs, rhs) in start.points.iter().zip(&end.points) {
            assert_eq!(lhs.1, rhs.1);
        }
    }

    #[test]
    fn test_spring_forward_slots_are_zeroed() {
        // 2025-03-30 is the last Sunday of March.
        let profile = synthesizer()
            .synthesize_iso("2025-03-30", KilowattHours(4000.0), SlotLabeling::default())
            .unwrap();
        for slot in 8..=11 {
            assert_eq!(profile.points[slot].1, KilowattHours::ZERO);
        }
        assert_ne!(profile.points[7].1, KilowattHours::ZERO);
        assert_ne!(profile.points[12].1, KilowattHours::ZERO);
    }

    #[test]
    fn test_unparseable_date() {
        let result = synthesizer().synthesize_iso(
            "not-a-date",
            KilowattHours(1000.0),
            SlotLabeling::default(),
        );
        assert!(matches!(result, Err(Error::InvalidDate(_))));
    }
}
