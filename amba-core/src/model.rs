use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Daily parameter codes understood by the upstream provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Temperature,
    Precipitation,
    SolarRadiation,
    Humidity,
    WindSpeed,
}

impl Parameter {
    pub fn code(&self) -> &'static str {
        match self {
            Parameter::Temperature => "T2M",
            Parameter::Precipitation => "PRECTOTCORR",
            Parameter::SolarRadiation => "ALLSKY_SFC_SW_DWN",
            Parameter::Humidity => "RH2M",
            Parameter::WindSpeed => "WS2M",
        }
    }

    /// The five tracked parameters, in request order.
    pub const fn all() -> &'static [Parameter] {
        &[
            Parameter::Temperature,
            Parameter::Precipitation,
            Parameter::SolarRadiation,
            Parameter::Humidity,
            Parameter::WindSpeed,
        ]
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Parameter {
    type Error = QueryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let upper = value.trim().to_uppercase();

        Parameter::all()
            .iter()
            .copied()
            .find(|p| p.code() == upper)
            .ok_or_else(|| QueryError::UnknownParameter(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("Latitude {0} is outside the range [-90, 90]")]
    Latitude(f64),

    #[error("Longitude {0} is outside the range [-180, 180]")]
    Longitude(f64),

    #[error("A window of {days} days before {end} starts outside the supported calendar")]
    DateOutOfRange { end: NaiveDate, days: u32 },

    #[error("Start date {start} is after end date {end}")]
    DateRange { start: NaiveDate, end: NaiveDate },

    #[error("At least one parameter code is required")]
    NoParameters,

    #[error(
        "Unknown parameter code '{0}'. Supported codes: T2M, PRECTOTCORR, ALLSKY_SFC_SW_DWN, RH2M, WS2M."
    )]
    UnknownParameter(String),
}

/// A validated request for daily observations at one point.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateQuery {
    latitude: f64,
    longitude: f64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    parameters: Vec<Parameter>,
}

impl ClimateQuery {
    pub fn new(
        latitude: f64,
        longitude: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        parameters: &[Parameter],
    ) -> Result<Self, QueryError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(QueryError::Latitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(QueryError::Longitude(longitude));
        }
        if start_date > end_date {
            return Err(QueryError::DateRange { start: start_date, end: end_date });
        }

        let mut unique = Vec::with_capacity(parameters.len());
        for p in parameters {
            if !unique.contains(p) {
                unique.push(*p);
            }
        }
        if unique.is_empty() {
            return Err(QueryError::NoParameters);
        }

        Ok(Self { latitude, longitude, start_date, end_date, parameters: unique })
    }

    /// Window from `end - days` through `end` with every tracked parameter.
    pub fn trailing(
        latitude: f64,
        longitude: f64,
        end_date: NaiveDate,
        days: u32,
    ) -> Result<Self, QueryError> {
        let start_date = Self::window_start(end_date, days)?;
        Self::new(latitude, longitude, start_date, end_date, Parameter::all())
    }

    /// `end - days`, or an error when that falls off the calendar.
    pub fn window_start(end_date: NaiveDate, days: u32) -> Result<NaiveDate, QueryError> {
        end_date
            .checked_sub_days(Days::new(u64::from(days)))
            .ok_or(QueryError::DateOutOfRange { end: end_date, days })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}

/// One day of measurements at one point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateObservation {
    pub date: NaiveDate,
    pub temperature: f64,
    pub precipitation: f64,
    pub solar_radiation: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub latitude: f64,
    pub longitude: f64,
}

/// A named point used by the batch operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesOrigin {
    /// Normalized from an upstream response.
    Observed,
    /// Generated because the upstream call failed.
    Synthetic,
}

/// Observations tagged with where they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateSeries {
    pub origin: SeriesOrigin,
    pub observations: Vec<ClimateObservation>,
}

impl ClimateSeries {
    pub fn observed(observations: Vec<ClimateObservation>) -> Self {
        Self { origin: SeriesOrigin::Observed, observations }
    }

    pub fn synthetic(observations: Vec<ClimateObservation>) -> Self {
        Self { origin: SeriesOrigin::Synthetic, observations }
    }

    pub fn is_synthetic(&self) -> bool {
        self.origin == SeriesOrigin::Synthetic
    }

    pub fn into_observations(self) -> Vec<ClimateObservation> {
        self.observations
    }
}
