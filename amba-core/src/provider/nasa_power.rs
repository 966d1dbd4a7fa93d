use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::{
    collections::{BTreeMap, HashMap},
    time::Duration,
};
use tracing::debug;

use crate::{
    config::Config,
    model::{ClimateObservation, ClimateQuery, Parameter},
};

use super::{ClimateProvider, UpstreamError};

/// Client for the NASA POWER daily point endpoint.
#[derive(Debug, Clone)]
pub struct NasaPowerProvider {
    base_url: Url,
    community: String,
    http: Client,
}

impl NasaPowerProvider {
    pub fn new(
        base_url: Url,
        community: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let http = Client::builder().timeout(timeout).build().map_err(UpstreamError::Client)?;

        Ok(Self { base_url, community: community.into(), http })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid base_url '{}'", config.base_url))?;

        Ok(Self::new(base_url, config.community.clone(), config.timeout())?)
    }

    /// Full request URL for `query`.
    pub fn request_url(&self, query: &ClimateQuery) -> Url {
        let codes: Vec<&str> = query.parameters().iter().map(Parameter::code).collect();

        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("parameters", &codes.join(","))
            .append_pair("community", &self.community)
            .append_pair("longitude", &query.longitude().to_string())
            .append_pair("latitude", &query.latitude().to_string())
            .append_pair("start", &format_date_for_query(query.start_date()))
            .append_pair("end", &format_date_for_query(query.end_date()))
            .append_pair("format", "JSON");
        url
    }
}

#[async_trait]
impl ClimateProvider for NasaPowerProvider {
    async fn fetch_daily(
        &self,
        query: &ClimateQuery,
    ) -> Result<Vec<ClimateObservation>, UpstreamError> {
        let url = self.request_url(query);
        debug!(%url, "requesting daily point data");

        let res = self.http.get(url).send().await.map_err(UpstreamError::Request)?;

        let status = res.status();
        let body = res.text().await.map_err(UpstreamError::Body)?;

        if !status.is_success() {
            return Err(UpstreamError::Status { status, body: truncate_body(&body) });
        }

        let observations = normalize(&body, query.latitude(), query.longitude())?;
        debug!(count = observations.len(), "normalized upstream response");

        Ok(observations)
    }
}

/// Format a date the way the upstream expects it in `start`/`end`.
pub fn format_date_for_query(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

type DailyValues = BTreeMap<String, Option<f64>>;

#[derive(Debug, Deserialize)]
struct PowerResponse {
    #[serde(default)]
    properties: Option<PowerProperties>,
}

#[derive(Debug, Deserialize)]
struct PowerProperties {
    #[serde(default)]
    parameter: Option<HashMap<String, serde_json::Value>>,
}

/// Turn a raw response body into one observation per `T2M` date key.
///
/// Dates come only from `T2M`: without it the result is empty even if other
/// parameters carry data. Any other missing code, date or `null` reads as 0.
/// Only the five tracked codes are type-checked; a malformed value under one
/// of them fails the whole response, anything else is ignored.
fn normalize(
    body: &str,
    latitude: f64,
    longitude: f64,
) -> Result<Vec<ClimateObservation>, UpstreamError> {
    let parsed: PowerResponse = serde_json::from_str(body)?;

    let Some(raw) = parsed.properties.and_then(|p| p.parameter) else {
        return Ok(Vec::new());
    };
    let table = tracked_values(raw)?;
    let Some(temperatures) = table.get(&Parameter::Temperature) else {
        return Ok(Vec::new());
    };

    temperatures
        .iter()
        .map(|(key, temperature)| -> Result<ClimateObservation, UpstreamError> {
            Ok(ClimateObservation {
                date: parse_date_key(key)?,
                temperature: temperature.unwrap_or(0.0),
                precipitation: value_at(&table, Parameter::Precipitation, key),
                solar_radiation: value_at(&table, Parameter::SolarRadiation, key),
                humidity: value_at(&table, Parameter::Humidity, key),
                wind_speed: value_at(&table, Parameter::WindSpeed, key),
                latitude,
                longitude,
            })
        })
        .collect()
}

fn tracked_values(
    mut raw: HashMap<String, serde_json::Value>,
) -> Result<HashMap<Parameter, DailyValues>, UpstreamError> {
    let mut table = HashMap::new();
    for parameter in Parameter::all() {
        if let Some(values) = raw.remove(parameter.code()) {
            table.insert(*parameter, serde_json::from_value(values)?);
        }
    }
    Ok(table)
}

fn value_at(table: &HashMap<Parameter, DailyValues>, parameter: Parameter, key: &str) -> f64 {
    match table.get(&parameter).and_then(|values| values.get(key)) {
        Some(Some(value)) => *value,
        Some(None) | None => 0.0,
    }
}

fn parse_date_key(key: &str) -> Result<NaiveDate, UpstreamError> {
    let invalid = || UpstreamError::DateKey(key.to_string());

    if key.len() != 8 || !key.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let year = key[0..4].parse().map_err(|_| invalid())?;
    let month = key[4..6].parse().map_err(|_| invalid())?;
    let day = key[6..8].parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
