use chrono::{DurationRound, TimeDelta};
use itertools::Itertools;

use crate::{
    quantity::KilowattHours,
    series::{RegularSeries, Sample},
};

impl RegularSeries {
    /// Resample into coarser buckets: deltas by summation, cumulative value
    /// and interpolation flag by first-in-bucket. Bucket boundaries align
    /// to multiples of the bucket size.
    #[must_use]
    pub fn aggregate(&self, bucket: TimeDelta) -> Self {
        let chunks = self
            .samples
            .iter()
            .chunk_by(|sample| sample.timestamp.duration_trunc(bucket).unwrap());
        let samples = chunks
            .into_iter()
            .map(|(timestamp, mut chunk)| {
                let first = *chunk.next().unwrap(); // chunks are never empty
                Sample {
                    timestamp,
                    cumulative: first.cumulative,
                    interpolated: first.interpolated,
                    delta: first.delta
                        + chunk.map(|sample| sample.delta).sum::<KilowattHours>(),
                }
            })
            .collect();
        Self { cadence: bucket, samples }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::series::{QUARTER_HOUR, tests::{at, reading}};

    #[test]
    fn test_hourly_aggregation() {
        let readings = [
            reading(at(0, 0), 100.0),
            reading(at(0, 30), 104.0),
            reading(at(1, 0), 110.0),
            reading(at(1, 30), 111.0),
            reading(at(2, 0), 115.0),
        ];
        let series = RegularSeries::reconstruct(&readings, QUARTER_HOUR).unwrap();
        let hourly = series.aggregate(TimeDelta::hours(1));

        assert_eq!(hourly.len(), 2);
        assert_eq!(hourly.cadence(), TimeDelta::hours(1));

        let [first, second] = hourly.samples() else { unreachable!() };
        assert_eq!(first.timestamp, at(0, 0));
        assert_abs_diff_eq!(first.cumulative.0, 100.0);
        assert_abs_diff_eq!(first.delta.0, 10.0);
        assert!(!first.interpolated);

        assert_eq!(second.timestamp, at(1, 0));
        assert_abs_diff_eq!(second.cumulative.0, 110.0);
        assert_abs_diff_eq!(second.delta.0, 5.0);
    }

    #[test]
    fn test_aggregation_preserves_the_total() {
        let readings = [
            reading(at(0, 0), 100.0),
            reading(at(0, 45), 107.0),
            reading(at(2, 15), 120.0),
            reading(at(3, 0), 131.0),
        ];
        let series = RegularSeries::reconstruct(&readings, QUARTER_HOUR).unwrap();
        let hourly = series.aggregate(TimeDelta::hours(1));
        assert_abs_diff_eq!(
            hourly.iter().map(|sample| sample.delta.0).sum::<f64>(),
            series.iter().map(|sample| sample.delta.0).sum::<f64>(),
            epsilon = 1e-9
        );
    }
}
