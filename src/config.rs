use crate::constants::*;
use crate::error::{FilterError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub exoplanet_archive: ExoplanetArchiveConfig,
    pub mast: MastConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExoplanetArchiveConfig {
    pub url: String,
    pub query: String,
    pub maxrec: u64,
    pub timeout_seconds: u64,
}

impl Default for ExoplanetArchiveConfig {
    fn default() -> Self {
        Self {
            url: EXOPLANET_ARCHIVE_URL.to_string(),
            query: EXOPLANET_ARCHIVE_QUERY.to_string(),
            maxrec: EXOPLANET_ARCHIVE_MAXREC,
            timeout_seconds: HTTP_TIMEOUT_SECONDS,
        }
    }
}

impl ExoplanetArchiveConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MastConfig {
    pub url: String,
    pub pagesize: u64,
    pub timeout_seconds: u64,
    /// How many times an unfinished ("EXECUTING") search is resubmitted
    pub max_polls: u32,
}

impl Default for MastConfig {
    fn default() -> Self {
        Self {
            url: MAST_URL.to_string(),
            pagesize: MAST_PAGESIZE,
            timeout_seconds: HTTP_TIMEOUT_SECONDS,
            max_polls: MAST_MAX_POLLS,
        }
    }
}

impl MastConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    /// Loads the TOML file at `path` if it exists, then applies environment
    /// overrides. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// `load` with an explicit override lookup.
    pub fn load_with<F>(path: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                FilterError::Config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            info!("Loaded configuration from {}", path.display());
            Self::from_toml(&content)?
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Config::default()
        };

        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        if self.exoplanet_archive.timeout_seconds == 0 {
            return Err(FilterError::Config(
                "exoplanet_archive.timeout_seconds must be greater than zero".into(),
            ));
        }
        if self.mast.timeout_seconds == 0 {
            return Err(FilterError::Config(
                "mast.timeout_seconds must be greater than zero".into(),
            ));
        }
        if self.mast.pagesize == 0 {
            return Err(FilterError::Config(
                "mast.pagesize must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Applies overrides from a key lookup (the process environment in
    /// production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_ARCHIVE_URL).filter(|v| !v.trim().is_empty()) {
            self.exoplanet_archive.url = url.trim().to_string();
        }
        if let Some(url) = lookup(ENV_MAST_URL).filter(|v| !v.trim().is_empty()) {
            self.mast.url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_HTTP_TIMEOUT) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    FilterError::Config(format!(
                        "{ENV_HTTP_TIMEOUT} must be a positive whole number of seconds, got '{raw}'"
                    ))
                })?;
            self.exoplanet_archive.timeout_seconds = secs;
            self.mast.timeout_seconds = secs;
        }
        Ok(())
    }
}
