pub mod holidays;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Supplies the public holidays of whatever country the meter lives in.
///
/// The classifier performs no holiday computation itself, so it stays
/// country-agnostic and testable with a fake calendar.
pub trait HolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// A plain date set works as a holiday calendar, too.
impl HolidayCalendar for std::collections::BTreeSet<NaiveDate> {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.contains(&date)
    }
}

/// Day classification of the standard load profile conventions.
/// Derived from the date on every call, never stored.
#[derive(
    Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    #[display("weekday")]
    Weekday,
    #[display("saturday")]
    Saturday,
    #[display("sunday")]
    Sunday,
}

#[derive(
    Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum SeasonType {
    #[display("winter")]
    Winter,
    #[display("transition")]
    Transition,
    #[display("summer")]
    Summer,
}

/// Classify the day type, in priority order: holidays count as Sundays,
/// Christmas Eve and New Year's Eve behave like Saturdays unless they
/// already fall on one.
pub fn classify_day(date: NaiveDate, holidays: &impl HolidayCalendar) -> DayType {
    let weekday = date.weekday();
    if holidays.is_holiday(date) || weekday == Weekday::Sun {
        DayType::Sunday
    } else if date.month() == 12 && date.day() == 24 && weekday != Weekday::Sat {
        DayType::Saturday
    } else if date.month() == 12 && date.day() == 31 && weekday != Weekday::Sat {
        DayType::Saturday
    } else if weekday == Weekday::Sat {
        DayType::Saturday
    } else {
        DayType::Weekday
    }
}

/// Classify the season. The four fixed boundaries partition the year into
/// Winter–Transition–Summer–Transition–Winter, with Winter wrapping the
/// year end. Each boundary date belongs to the later season.
pub fn classify_season(date: NaiveDate) -> SeasonType {
    let boundary = |month, day| {
        NaiveDate::from_ymd_opt(date.year(), month, day).unwrap()
    };
    if date < boundary(3, 21) {
        SeasonType::Winter
    } else if date < boundary(5, 15) {
        SeasonType::Transition
    } else if date < boundary(9, 15) {
        SeasonType::Summer
    } else if date < boundary(11, 1) {
        SeasonType::Transition
    } else {
        SeasonType::Winter
    }
}
