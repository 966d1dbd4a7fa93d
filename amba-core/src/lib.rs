//! Core library for Amba Net climate data.
//!
//! This crate defines:
//! - Configuration of the upstream client
//! - The NASA POWER daily point provider and its response normalization
//! - A fail-open client that substitutes synthetic data when the upstream fails
//! - Batch fetches over the named African cities and the drought index
//!
//! It is used by `amba-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod drought;
pub mod fallback;
pub mod locations;
pub mod model;
pub mod provider;
pub mod summary;

pub use client::{BatchError, ClimateDataClient};
pub use config::Config;
pub use drought::{DroughtRisk, compute_drought_index};
pub use locations::NAMED_LOCATIONS;
pub use model::{
    ClimateObservation, ClimateQuery, ClimateSeries, Location, Parameter, QueryError,
    SeriesOrigin,
};
pub use provider::{ClimateProvider, NasaPowerProvider, UpstreamError, format_date_for_query};
pub use summary::RegionSummary;
