use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

pub const DEFAULT_BASE_URL: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";
pub const DEFAULT_COMMUNITY: &str = "AG";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// base_url = "https://power.larc.nasa.gov/api/temporal/daily/point"
/// community = "AG"
/// timeout_secs = 30
/// fallback_seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Daily point endpoint of the upstream provider.
    pub base_url: String,

    /// Community classifier sent with every request.
    pub community: String,

    /// Upper bound on a single upstream request, in seconds.
    pub timeout_secs: u64,

    /// Seed for synthetic fallback data. Unset means a fresh random series every time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            community: DEFAULT_COMMUNITY.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            fallback_seed: None,
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::from_toml(
            &fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?,
        )
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("net", "amba", "amba")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
