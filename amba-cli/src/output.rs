use amba_core::{ClimateObservation, ClimateSeries, RegionSummary, SeriesOrigin};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{text}");
    Ok(())
}

pub fn print_series(series: &ClimateSeries) {
    if series.is_synthetic() {
        println!("Upstream unavailable; showing synthetic data.");
    }
    print_observations(&series.observations);
}

pub fn print_observations(observations: &[ClimateObservation]) {
    if observations.is_empty() {
        println!("No observations.");
        return;
    }

    println!(
        "{:<10}  {:>9}  {:>8}  {:>8}  {:>7}  {:>8}  {:>9}  {:>9}",
        "date", "temp °C", "rain mm", "sun MJ", "rh %", "wind m/s", "lat", "lon"
    );
    for o in observations {
        println!(
            "{:<10}  {:>9.2}  {:>8.2}  {:>8.2}  {:>7.1}  {:>8.2}  {:>9.4}  {:>9.4}",
            o.date.to_string(),
            o.temperature,
            o.precipitation,
            o.solar_radiation,
            o.humidity,
            o.wind_speed,
            o.latitude,
            o.longitude,
        );
    }
}

pub fn print_summaries(rows: &[RegionSummary]) {
    if rows.is_empty() {
        println!("No regions.");
        return;
    }

    println!(
        "{:<12}  {:>4}  {:>8}  {:>8}  {:>6}  {:>7}  {:<12}  source",
        "city", "days", "avg °C", "rain mm", "rh %", "drought", "risk"
    );
    for r in rows {
        println!(
            "{:<12}  {:>4}  {:>8.2}  {:>8.2}  {:>6.1}  {:>7.3}  {:<12}  {}",
            r.location.name,
            r.days,
            r.mean_temperature,
            r.total_precipitation,
            r.mean_humidity,
            r.drought_index,
            r.risk.to_string(),
            if r.origin == SeriesOrigin::Synthetic { "synthetic" } else { "observed" },
        );
    }
}
