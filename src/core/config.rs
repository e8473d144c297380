use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_SOURCE_URL: &str = "https://www.cbr-xml-daily.ru/daily_json.js";
pub const DEFAULT_TTL_SECONDS: u64 = 60 * 60;
const DEFAULT_CACHE_FILE: &str = "daily_json.js";

/// Settings for a single [`RateResolver`](crate::resolver::RateResolver).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ResolverConfig {
    pub source_url: String,
    pub cache_path: PathBuf,
    pub ttl_seconds: u64,
    pub timeout_seconds: u64,
    /// Extra attempts after a transport failure. HTTP status errors are not retried.
    pub retries: usize,
    pub retry_delay_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            cache_path: std::env::temp_dir().join(DEFAULT_CACHE_FILE),
            ttl_seconds: DEFAULT_TTL_SECONDS,
            timeout_seconds: 10,
            retries: 0,
            retry_delay_ms: 500,
        }
    }
}

impl ResolverConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_precision() -> usize {
    4
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Decimal places used when printing amounts and rates.
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            resolver: ResolverConfig::default(),
            precision: default_precision(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no file has been created there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "currency-exchange")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
