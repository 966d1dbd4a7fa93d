use amba_core::{
    ClimateDataClient, ClimateQuery, Config, DroughtRisk, Parameter, compute_drought_index,
};
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "amba", version, about = "Amba Net climate data CLI")]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively edit the client configuration.
    Configure,

    /// Fetch daily observations for a point.
    Fetch {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Days of history before the end date.
        #[arg(long, default_value_t = 30)]
        days: u32,

        /// Last day of the window (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Comma-separated parameter codes, e.g. "T2M,RH2M".
        #[arg(long, value_delimiter = ',')]
        params: Vec<String>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Fetch the last week for every named city.
    Batch {
        /// Print one summary row per city instead of every observation.
        #[arg(long)]
        summary: bool,

        #[arg(long)]
        json: bool,
    },

    /// Compute the drought index for a precipitation/temperature pair.
    Drought {
        /// Precipitation in mm.
        #[arg(allow_hyphen_values = true)]
        precipitation: f64,

        /// Temperature in °C.
        #[arg(allow_hyphen_values = true)]
        temperature: f64,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Fetch { lat, lon, days, end, params, json } => {
                let end = end.unwrap_or_else(|| Utc::now().date_naive());
                let query = build_query(lat, lon, days, end, &params)?;

                let client = ClimateDataClient::from_config(&Config::load()?)?;
                let series = client.fetch(&query).await;

                if json {
                    output::print_json(&series)
                } else {
                    output::print_series(&series);
                    Ok(())
                }
            }
            Command::Batch { summary, json } => {
                let client = ClimateDataClient::from_config(&Config::load()?)?;

                if summary {
                    let rows = client.fetch_named_locations_summary().await;
                    if json {
                        return output::print_json(&rows);
                    }
                    output::print_summaries(&rows);
                } else {
                    let obs = client.fetch_named_locations_batch().await;
                    if json {
                        return output::print_json(&obs);
                    }
                    output::print_observations(&obs);
                }
                Ok(())
            }
            Command::Drought { precipitation, temperature } => {
                let index = compute_drought_index(precipitation, temperature);
                println!("Drought index: {index:.3} ({})", DroughtRisk::classify(index));
                Ok(())
            }
        }
    }
}

fn build_query(
    lat: f64,
    lon: f64,
    days: u32,
    end: NaiveDate,
    params: &[String],
) -> Result<ClimateQuery> {
    if params.is_empty() {
        return Ok(ClimateQuery::trailing(lat, lon, end, days)?);
    }

    let parameters = params
        .iter()
        .map(|p| Parameter::try_from(p.as_str()))
        .collect::<Result<Vec<_>, _>>()?;
    let start = ClimateQuery::window_start(end, days)?;

    Ok(ClimateQuery::new(lat, lon, start, end, &parameters)?)
}

fn configure() -> Result<()> {
    let mut cfg = Config::load()?;

    cfg.base_url = Text::new("Upstream base URL:")
        .with_default(&cfg.base_url)
        .prompt()
        .context("Failed to read base URL")?;

    cfg.community = Text::new("Community classifier:")
        .with_default(&cfg.community)
        .prompt()
        .context("Failed to read community")?;

    cfg.timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(cfg.timeout_secs)
        .prompt()
        .context("Failed to read timeout")?;

    let seed = Text::new("Fallback seed (empty for random):")
        .with_default(&cfg.fallback_seed.map(|s| s.to_string()).unwrap_or_default())
        .prompt()
        .context("Failed to read fallback seed")?;
    cfg.fallback_seed = match seed.trim() {
        "" => None,
        s => Some(s.parse().with_context(|| format!("Fallback seed '{s}' is not a number"))?),
    };

    // Reject an unusable base URL before writing it.
    ClimateDataClient::from_config(&cfg)?;

    cfg.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
