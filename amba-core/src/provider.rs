use crate::model::{ClimateObservation, ClimateQuery};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

pub mod nasa_power;

pub use nasa_power::{NasaPowerProvider, format_date_for_query};

/// Why an upstream fetch produced no usable observations.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Failed to send request to climate data provider")]
    Request(#[source] reqwest::Error),

    #[error("Failed to read climate data provider response body")]
    Body(#[source] reqwest::Error),

    #[error("Climate data provider request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse climate data provider JSON")]
    Parse(#[from] serde_json::Error),

    #[error("Unrecognized date key '{0}', expected YYYYMMDD")]
    DateKey(String),
}

#[async_trait]
pub trait ClimateProvider: Send + Sync + Debug {
    /// Fetch and normalize daily observations for `query`.
    async fn fetch_daily(
        &self,
        query: &ClimateQuery,
    ) -> Result<Vec<ClimateObservation>, UpstreamError>;
}
