use chrono::NaiveDate;
use ordered_float::OrderedFloat;

use crate::{prelude::*, quantity::KilowattHours, series::RegularSeries};

impl RegularSeries {
    /// Minimum period delta within the date range, rounded to two decimals.
    /// `None` bounds default to the series' full span.
    #[must_use]
    pub fn min(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<KilowattHours> {
        self.deltas_within(start, end)
            .map(|delta| OrderedFloat(delta.0))
            .min()
            .map(|min| KilowattHours(min.0).round_to(2))
    }

    /// Maximum period delta within the date range, rounded to two decimals.
    #[must_use]
    pub fn max(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<KilowattHours> {
        self.deltas_within(start, end)
            .map(|delta| OrderedFloat(delta.0))
            .max()
            .map(|max| KilowattHours(max.0).round_to(2))
    }

    /// Mean period delta within the date range, rounded to two decimals.
    #[must_use]
    pub fn mean(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<KilowattHours> {
        let (count, total) = self
            .deltas_within(start, end)
            .fold((0_u32, KilowattHours::ZERO), |(count, total), delta| {
                (count + 1, total + delta)
            });
        (count != 0).then(|| KilowattHours(total.0 / f64::from(count)).round_to(2))
    }

    /// Total consumption within the date range, rounded to two decimals.
    #[must_use]
    pub fn sum(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> KilowattHours {
        self.deltas_within(start, end).sum::<KilowattHours>().round_to(2)
    }

    /// Estimate the annual energy from a daily series, expressed in
    /// multiples of the 1000 kWh reference the profile shapes are
    /// normalized to. Spans shorter than a year are linearly extrapolated;
    /// longer spans sum the 365 most recent full days, excluding the
    /// partial terminal one.
    pub fn annualized_energy(&self) -> Result<f64> {
        let n_days = self.samples.len();
        if n_days == 0 {
            return Err(Error::InsufficientData { n_readings: 0 });
        }
        #[allow(clippy::cast_precision_loss)]
        let yearly = if n_days < 366 {
            self.samples.iter().map(|sample| sample.delta.0).sum::<f64>() / n_days as f64 * 365.0
        } else {
            self.samples[n_days - 366..n_days - 1]
                .iter()
                .map(|sample| sample.delta.0)
                .sum::<f64>()
        };
        Ok(yearly / 1000.0)
    }

    fn deltas_within(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> impl Iterator<Item = KilowattHours> + '_ {
        self.samples
            .iter()
            .filter(move |sample| {
                let date = sample.timestamp.date();
                start.is_none_or(|start| date >= start) && end.is_none_or(|end| date <= end)
            })
            .map(|sample| sample.delta)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{NaiveDateTime, TimeDelta};

    use super::*;
    use crate::{reading::RawReading, series::ONE_DAY};

    const DAILY_USAGE: [f64; 22] = [
        3.38, 7.1, 5.2, 17.99, 8.4, 6.6, 5.05, 9.9, 4.44, 6.2, 7.7, 8.08, 5.55, 6.1, 7.25, 4.9,
        6.35, 8.2, 5.6, 7.45, 6.8, 3.5,
    ];

    fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    /// Daily midnight readings for 2018-10-11 through 2018-11-02.
    fn overview_series() -> RegularSeries {
        let mut cumulative = 1000.0;
        let mut readings = vec![RawReading {
            timestamp: midnight(2018, 10, 11),
            value: KilowattHours(cumulative),
        }];
        for (offset, usage) in DAILY_USAGE.iter().enumerate() {
            cumulative += usage;
            readings.push(RawReading {
                timestamp: midnight(2018, 10, 11) + ONE_DAY * (offset as i32 + 1),
                value: KilowattHours(cumulative),
            });
        }
        RegularSeries::reconstruct(&readings, ONE_DAY).unwrap()
    }

    #[test]
    fn test_full_span_statistics() {
        let series = overview_series();
        assert_eq!(series.min(None, None), Some(KilowattHours(3.38)));
        assert_eq!(series.max(None, None), Some(KilowattHours(17.99)));
        assert_eq!(series.mean(None, None), Some(KilowattHours(6.9)));
        assert_eq!(series.sum(None, None), KilowattHours(151.74));
    }

    #[test]
    fn test_range_statistics() {
        let series = overview_series();
        let start = Some(NaiveDate::from_ymd_opt(2018, 10, 13).unwrap());
        let end = Some(NaiveDate::from_ymd_opt(2018, 10, 15).unwrap());
        assert_eq!(series.min(start, end), Some(KilowattHours(5.2)));
        assert_eq!(series.max(start, end), Some(KilowattHours(17.99)));
        assert_eq!(series.mean(start, end), Some(KilowattHours(10.53)));
        assert_eq!(series.sum(start, end), KilowattHours(31.59));
    }

    #[test]
    fn test_empty_range() {
        let series = overview_series();
        let start = Some(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(series.min(start, None), None);
        assert_eq!(series.mean(start, None), None);
        assert_eq!(series.sum(start, None), KilowattHours::ZERO);
    }

    #[test]
    fn test_annualized_energy_extrapolates_short_spans() {
        let series = overview_series();
        // 22 daily deltas: sum / 22 × 365 / 1000.
        assert_abs_diff_eq!(
            series.annualized_energy().unwrap(),
            151.74 / 22.0 * 365.0 / 1000.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_annualized_energy_sums_full_years() {
        // 400 days of exactly 2 kWh each.
        let start = midnight(2018, 1, 1);
        let readings: Vec<_> = (0..=400)
            .map(|day| RawReading {
                timestamp: start + ONE_DAY * day,
                value: KilowattHours(f64::from(day) * 2.0),
            })
            .collect();
        let series = RegularSeries::reconstruct(&readings, ONE_DAY).unwrap();
        assert_eq!(series.len(), 400);
        // 365 full days à 2 kWh, the partial terminal day excluded.
        assert_abs_diff_eq!(series.annualized_energy().unwrap(), 0.73, epsilon = 1e-9);
    }

    #[test]
    fn test_daily_aggregation_matches_the_sum() {
        // A quarter-hour series over three days.
        let start = midnight(2023, 5, 8);
        let readings: Vec<_> = (0..=(3 * 96))
            .map(|slot| RawReading {
                timestamp: start + TimeDelta::minutes(15 * i64::from(slot)),
                value: KilowattHours(f64::from(slot) * 0.11),
            })
            .collect();
        let series = RegularSeries::reconstruct(&readings, TimeDelta::minutes(15)).unwrap();
        let daily = series.aggregate(ONE_DAY);
        assert_eq!(daily.len(), 3);
        assert_abs_diff_eq!(daily.sum(None, None).0, series.sum(None, None).0, epsilon = 0.01);
    }
}
