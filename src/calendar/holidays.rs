use chrono::{Datelike, NaiveDate};

use crate::calendar::HolidayCalendar;

/// The nine nationwide German public holidays: five fixed dates and four
/// movable feasts derived from Easter Sunday.
pub struct GermanHolidays;

impl HolidayCalendar for GermanHolidays {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        match (date.month(), date.day()) {
            // New Year, Labour Day, German Unity Day, Christmas.
            (1, 1) | (5, 1) | (10, 3) | (12, 25) | (12, 26) => return true,
            _ => {}
        }
        let offset = date.signed_duration_since(easter_sunday(date.year())).num_days();
        // Good Friday, Easter Monday, Ascension, Whit Monday.
        matches!(offset, -2 | 1 | 39 | 50)
    }
}

/// Easter Sunday by the anonymous Gregorian computus (Meeus/Jones/Butcher).
fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    #[allow(clippy::cast_sign_loss)]
    NaiveDate::from_ymd_opt(year, month as u32, day as u32).unwrap()
}
