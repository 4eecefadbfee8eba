//! Runtime configuration.
//!
//! Values come from the process environment (optionally seeded from a
//! `.env` file by the binary) and are read exactly once, in
//! [`Config::from_env`]. Everything else receives a `&Config`.

use crate::error::ConfigError;
use std::time::Duration;

pub const DEFAULT_ANKI_URL: &str = "http://localhost:8765";
pub const DEFAULT_DECK_NAME: &str = "WB_Anki";
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub anki_url: String,
    pub default_deck_name: String,
    pub timeout: Duration,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            anki_url: DEFAULT_ANKI_URL.into(),
            default_deck_name: DEFAULT_DECK_NAME.into(),
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
            debug: false,
        }
    }
}

/// Seed the process environment from a `.env` file, if one exists.
///
/// `WB_ANKI_ENV_PATH` points at an explicit file; otherwise `.env` is
/// looked up from the working directory. Load errors are ignored.
pub fn load_env() {
    if let Ok(path) = std::env::var("WB_ANKI_ENV_PATH") {
        dotenvy::from_path(path).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

impl Config {
    /// Build the configuration from `ANKI_URL`, `DEFAULT_DECK_NAME`,
    /// `ANKI_TIMEOUT` and `DEBUG`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Missing keys
    /// fall back to the documented defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let anki_url = lookup("ANKI_URL").unwrap_or_else(|| DEFAULT_ANKI_URL.into());
        let default_deck_name =
            lookup("DEFAULT_DECK_NAME").unwrap_or_else(|| DEFAULT_DECK_NAME.into());
        let timeout = match lookup("ANKI_TIMEOUT") {
            Some(raw) => parse_timeout(&raw)?,
            None => Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
        };
        let debug = lookup("DEBUG")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        Ok(Config {
            anki_url,
            default_deck_name,
            timeout,
            debug,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.anki_url.is_empty() {
            return Err(ConfigError::Missing("ANKI_URL"));
        }
        if self.default_deck_name.is_empty() {
            return Err(ConfigError::Missing("DEFAULT_DECK_NAME"));
        }
        Ok(())
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidTimeout(raw.to_string()))?;
    if secs <= 0.0 {
        return Err(ConfigError::InvalidTimeout(raw.to_string()));
    }
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidTimeout(raw.to_string()))
}
