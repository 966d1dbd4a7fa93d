use serde::Serialize;

use crate::{
    drought::{DroughtRisk, compute_drought_index},
    model::{ClimateObservation, ClimateSeries, Location, SeriesOrigin},
};

/// Per-location digest of a batch fetch, as shown on the regional overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSummary {
    pub location: Location,
    pub origin: SeriesOrigin,
    pub days: usize,
    pub mean_temperature: f64,
    pub total_precipitation: f64,
    pub mean_humidity: f64,
    pub drought_index: f64,
    pub risk: DroughtRisk,
}

impl RegionSummary {
    /// An empty series summarizes to zeros.
    pub fn from_series(location: Location, series: &ClimateSeries) -> Self {
        let obs = &series.observations;
        let days = obs.len();

        let mean = |f: fn(&ClimateObservation) -> f64| {
            if days == 0 { 0.0 } else { obs.iter().map(f).sum::<f64>() / days as f64 }
        };

        let mean_temperature = mean(|o| o.temperature);
        let mean_humidity = mean(|o| o.humidity);
        let total_precipitation: f64 = obs.iter().map(|o| o.precipitation).sum();

        let drought_index = compute_drought_index(total_precipitation, mean_temperature);

        Self {
            location,
            origin: series.origin,
            days,
            mean_temperature,
            total_precipitation,
            mean_humidity,
            drought_index,
            risk: DroughtRisk::classify(drought_index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locations::NAMED_LOCATIONS;
    use chrono::NaiveDate;

    fn obs(day: u32, temperature: f64, precipitation: f64, humidity: f64) -> ClimateObservation {
        ClimateObservation {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            temperature,
            precipitation,
            solar_radiation: 20.0,
            humidity,
            wind_speed: 3.0,
            latitude: 30.0444,
            longitude: 31.2357,
        }
    }

    #[test]
    fn hot_dry_region_is_at_risk() {
        let cairo = NAMED_LOCATIONS[2];
        let series = ClimateSeries::observed(vec![
            obs(1, 35.0, 0.0, 20.0),
            obs(2, 37.0, 0.0, 30.0),
            obs(3, 36.0, 0.0, 25.0),
        ]);
        let summary = RegionSummary::from_series(cairo, &series);

        assert_eq!(summary.days, 3);
        assert_eq!(summary.mean_temperature, 36.0);
        assert_eq!(summary.total_precipitation, 0.0);
        assert_eq!(summary.mean_humidity, 25.0);
        assert_eq!(summary.risk, DroughtRisk::AtRisk);
        assert_eq!(summary.origin, SeriesOrigin::Observed);
    }

    #[test]
    fn empty_series_summarizes_to_zeros() {
        let summary =
            RegionSummary::from_series(NAMED_LOCATIONS[0], &ClimateSeries::observed(Vec::new()));
        assert_eq!(summary.days, 0);
        assert_eq!(summary.mean_temperature, 0.0);
        assert_eq!(summary.drought_index, 0.5);
        assert_eq!(summary.risk, DroughtRisk::Normal);
    }
}
