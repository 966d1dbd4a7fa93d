use chrono::{NaiveDate, Utc};
use futures::future::join_all;
use rand::{SeedableRng, rngs::StdRng};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{debug, error, warn};

use crate::{
    config::Config,
    fallback::synthetic_series,
    locations::{BATCH_WINDOW_DAYS, NAMED_LOCATIONS},
    model::{ClimateObservation, ClimateQuery, ClimateSeries, Location, QueryError},
    provider::{ClimateProvider, NasaPowerProvider, UpstreamError},
    summary::RegionSummary,
};

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Invalid query for location '{name}'")]
    Query {
        name: &'static str,
        #[source]
        source: QueryError,
    },

    #[error("Location fetch task did not complete")]
    Join(#[from] JoinError),
}

/// Fail-open front door to the upstream climate provider.
///
/// Every public fetch returns data: upstream failures are logged and replaced
/// with a synthetic series. Use [`ClimateDataClient::try_fetch`] to see the error.
#[derive(Debug, Clone)]
pub struct ClimateDataClient {
    provider: Arc<dyn ClimateProvider>,
    fallback_seed: Option<u64>,
}

impl ClimateDataClient {
    pub fn new(provider: Arc<dyn ClimateProvider>) -> Self {
        Self { provider, fallback_seed: None }
    }

    /// NASA POWER client built from `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider = NasaPowerProvider::from_config(config)?;
        let client = Self::new(Arc::new(provider));

        Ok(match config.fallback_seed {
            Some(seed) => client.with_fallback_seed(seed),
            None => client,
        })
    }

    /// Make every synthetic series reproducible.
    pub fn with_fallback_seed(mut self, seed: u64) -> Self {
        self.fallback_seed = Some(seed);
        self
    }

    pub async fn try_fetch(&self, query: &ClimateQuery) -> Result<ClimateSeries, UpstreamError> {
        self.provider.fetch_daily(query).await.map(ClimateSeries::observed)
    }

    pub async fn fetch(&self, query: &ClimateQuery) -> ClimateSeries {
        match self.try_fetch(query).await {
            Ok(series) => series,
            Err(err) => {
                warn!(
                    error = %err,
                    latitude = query.latitude(),
                    longitude = query.longitude(),
                    "upstream fetch failed, serving synthetic data"
                );
                self.fallback(query)
            }
        }
    }

    pub async fn fetch_observations(&self, query: &ClimateQuery) -> Vec<ClimateObservation> {
        self.fetch(query).await.into_observations()
    }

    /// Last week of data for every named location, concatenated in list order.
    pub async fn fetch_named_locations_batch(&self) -> Vec<ClimateObservation> {
        match self.fetch_locations(&NAMED_LOCATIONS, Utc::now().date_naive()).await {
            Ok(results) => {
                results.into_iter().flat_map(|(_, series)| series.into_observations()).collect()
            }
            Err(err) => {
                error!(error = %err, "named locations batch failed");
                Vec::new()
            }
        }
    }

    pub async fn fetch_named_locations_summary(&self) -> Vec<RegionSummary> {
        match self.fetch_locations(&NAMED_LOCATIONS, Utc::now().date_naive()).await {
            Ok(results) => results
                .iter()
                .map(|(location, series)| RegionSummary::from_series(*location, series))
                .collect(),
            Err(err) => {
                error!(error = %err, "named locations summary failed");
                Vec::new()
            }
        }
    }

    async fn fetch_locations(
        &self,
        locations: &[Location],
        today: NaiveDate,
    ) -> Result<Vec<(Location, ClimateSeries)>, BatchError> {
        let mut handles = Vec::with_capacity(locations.len());
        for location in locations {
            let query = ClimateQuery::trailing(
                location.latitude,
                location.longitude,
                today,
                BATCH_WINDOW_DAYS,
            )
            .map_err(|source| BatchError::Query { name: location.name, source })?;

            let client = self.clone();
            handles.push(tokio::spawn(async move { client.fetch(&query).await }));
        }

        debug!(count = handles.len(), "waiting on location fetches");

        let mut results = Vec::with_capacity(locations.len());
        for (location, joined) in locations.iter().copied().zip(join_all(handles).await) {
            results.push((location, joined?));
        }

        Ok(results)
    }

    fn fallback(&self, query: &ClimateQuery) -> ClimateSeries {
        let today = Utc::now().date_naive();
        let (lat, lon) = (query.latitude(), query.longitude());

        let observations = match self.fallback_seed {
            Some(seed) => synthetic_series(&mut StdRng::seed_from_u64(seed), lat, lon, today),
            None => synthetic_series(&mut rand::thread_rng(), lat, lon, today),
        };

        ClimateSeries::synthetic(observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Parameter, SeriesOrigin};
    use async_trait::async_trait;
    use chrono::Duration;
    use reqwest::StatusCode;

    /// Returns one observation per requested day, temperature = latitude.
    #[derive(Debug)]
    struct EchoProvider;

    #[async_trait]
    impl ClimateProvider for EchoProvider {
        async fn fetch_daily(
            &self,
            query: &ClimateQuery,
        ) -> Result<Vec<ClimateObservation>, UpstreamError> {
            Ok(query
                .start_date()
                .iter_days()
                .take_while(|d| *d <= query.end_date())
                .map(|date| ClimateObservation {
                    date,
                    temperature: query.latitude(),
                    precipitation: 1.0,
                    solar_radiation: 18.0,
                    humidity: 55.0,
                    wind_speed: 4.0,
                    latitude: query.latitude(),
                    longitude: query.longitude(),
                })
                .collect())
        }
    }

    #[derive(Debug)]
    struct FailingProvider;

    #[async_trait]
    impl ClimateProvider for FailingProvider {
        async fn fetch_daily(
            &self,
            _query: &ClimateQuery,
        ) -> Result<Vec<ClimateObservation>, UpstreamError> {
            Err(UpstreamError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "boom".into(),
            })
        }
    }

    #[derive(Debug)]
    struct PanickingProvider;

    #[async_trait]
    impl ClimateProvider for PanickingProvider {
        async fn fetch_daily(
            &self,
            _query: &ClimateQuery,
        ) -> Result<Vec<ClimateObservation>, UpstreamError> {
            panic!("provider bug");
        }
    }

    fn lagos_query() -> ClimateQuery {
        let end = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        ClimateQuery::new(6.5244, 3.3792, end - Duration::days(2), end, Parameter::all()).unwrap()
    }

    #[tokio::test]
    async fn observed_series_passes_through() {
        let client = ClimateDataClient::new(Arc::new(EchoProvider));
        let series = client.fetch(&lagos_query()).await;

        assert_eq!(series.origin, SeriesOrigin::Observed);
        assert_eq!(series.observations.len(), 3);
    }

    #[tokio::test]
    async fn failure_falls_back_to_31_synthetic_days() {
        let client = ClimateDataClient::new(Arc::new(FailingProvider));
        let query = lagos_query();

        assert!(client.try_fetch(&query).await.is_err());

        let series = client.fetch(&query).await;
        assert!(series.is_synthetic());
        assert_eq!(series.observations.len(), 31);
        assert_eq!(series.observations.last().unwrap().date, Utc::now().date_naive());
        assert!(series.observations.iter().all(|o| o.latitude == 6.5244));
    }

    #[tokio::test]
    async fn seeded_fallback_is_reproducible() {
        let client = ClimateDataClient::new(Arc::new(FailingProvider)).with_fallback_seed(9);
        let a = client.fetch_observations(&lagos_query()).await;
        let b = client.fetch_observations(&lagos_query()).await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn batch_concatenates_in_location_order() {
        let client = ClimateDataClient::new(Arc::new(EchoProvider));
        let obs = client.fetch_named_locations_batch().await;

        let per_location = BATCH_WINDOW_DAYS as usize + 1;
        assert_eq!(obs.len(), NAMED_LOCATIONS.len() * per_location);
        for (chunk, location) in obs.chunks(per_location).zip(NAMED_LOCATIONS.iter()) {
            assert!(chunk.iter().all(|o| o.latitude == location.latitude));
            assert_eq!(chunk.last().unwrap().date, Utc::now().date_naive());
        }
    }

    #[tokio::test]
    async fn batch_survives_every_location_failing() {
        let client = ClimateDataClient::new(Arc::new(FailingProvider));
        let obs = client.fetch_named_locations_batch().await;
        assert_eq!(obs.len(), NAMED_LOCATIONS.len() * 31);
    }

    #[tokio::test]
    async fn batch_join_failure_yields_empty() {
        let client = ClimateDataClient::new(Arc::new(PanickingProvider));
        assert!(client.fetch_named_locations_batch().await.is_empty());
        assert!(client.fetch_named_locations_summary().await.is_empty());
    }

    #[tokio::test]
    async fn summary_has_one_entry_per_location() {
        let client = ClimateDataClient::new(Arc::new(EchoProvider));
        let summaries = client.fetch_named_locations_summary().await;

        assert_eq!(summaries.len(), NAMED_LOCATIONS.len());
        assert_eq!(summaries[0].location.name, "Lagos");
        assert_eq!(summaries[7].location.name, "Tunis");
        assert!(summaries.iter().all(|s| s.days == BATCH_WINDOW_DAYS as usize + 1));
    }

    #[test]
    fn from_config_applies_seed() {
        let cfg = Config { fallback_seed: Some(3), ..Config::default() };
        let client = ClimateDataClient::from_config(&cfg).unwrap();
        assert_eq!(client.fallback_seed, Some(3));
    }
}
