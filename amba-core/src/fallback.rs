//! Synthetic observations served when the upstream cannot be reached.

use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::model::ClimateObservation;

/// Length of a synthetic series: `today` and the 30 days before it.
pub const FALLBACK_DAYS: i64 = 31;

/// Build a plausible 31-day series ending at `today`, oldest first.
///
/// The requested date range is ignored on purpose; the series always ends at
/// `today`. Pass a seeded RNG for reproducible output.
pub fn synthetic_series<R: Rng>(
    rng: &mut R,
    latitude: f64,
    longitude: f64,
    today: NaiveDate,
) -> Vec<ClimateObservation> {
    (0..FALLBACK_DAYS)
        .rev()
        .map(|offset| ClimateObservation {
            date: today - Duration::days(offset),
            temperature: rng.gen_range(20.0..35.0),
            precipitation: rng.gen_range(0.0..10.0),
            solar_radiation: rng.gen_range(15.0..25.0),
            humidity: rng.gen_range(40.0..80.0),
            wind_speed: rng.gen_range(2.0..10.0),
            latitude,
            longitude,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn spans_31_consecutive_days_ending_today() {
        let series = synthetic_series(&mut rand::thread_rng(), 1.0, 2.0, today());

        assert_eq!(series.len(), 31);
        assert_eq!(series.first().unwrap().date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(series.last().unwrap().date, today());
        for pair in series.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }

    #[test]
    fn values_stay_within_realistic_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            for o in synthetic_series(&mut rng, -1.2921, 36.8219, today()) {
                assert!((20.0..35.0).contains(&o.temperature));
                assert!((0.0..10.0).contains(&o.precipitation));
                assert!((15.0..25.0).contains(&o.solar_radiation));
                assert!((40.0..80.0).contains(&o.humidity));
                assert!((2.0..10.0).contains(&o.wind_speed));
                assert_eq!((o.latitude, o.longitude), (-1.2921, 36.8219));
            }
        }
    }

    #[test]
    fn same_seed_same_series() {
        let a = synthetic_series(&mut StdRng::seed_from_u64(42), 0.0, 0.0, today());
        let b = synthetic_series(&mut StdRng::seed_from_u64(42), 0.0, 0.0, today());
        assert_eq!(a, b);
    }
}
