//! Process configuration.
//!
//! Everything is read from environment variables at startup; a `.env` file in
//! the working directory is honoured outside of tests.

use std::path::PathBuf;
use url::Url;

pub const API_URL_VAR: &str = "AIPPT_API_URL";
pub const API_KEY_VAR: &str = "AIPPT_API_KEY";
pub const LOG_PATH_VAR: &str = "AIPPT_LOG_PATH";
pub const THEME_VAR: &str = "AIPPT_THEME";

/// Path of the generation endpoint, relative to the base URL.
pub const GENERATE_PATH: &str = "/generate-ppt";

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not defined in the environment")]
    MissingVar(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Where the generation service lives and how to authenticate against it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: Url,
    pub api_key: String,
}

impl ServiceConfig {
    /// Full URL of the generation endpoint. Joins like a path concatenation,
    /// so a base URL that carries a path prefix keeps it.
    pub fn endpoint(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/{}", GENERATE_PATH.trim_start_matches('/'))
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    /// `None` when either variable is missing or invalid; the reason is kept
    /// in `service_error` so the transport layer can refuse to start with it.
    pub service: Option<ServiceConfig>,
    pub service_error: Option<ConfigError>,
    pub log_path: PathBuf,
    pub dark_theme: bool,
}

impl Config {
    pub fn from_env() -> Self {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let (service, service_error) = match ServiceConfig::from_lookup(&lookup) {
            Ok(service) => (Some(service), None),
            Err(err) => (None, Some(err)),
        };

        let log_path = lookup(LOG_PATH_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("aippt.log"));

        let dark_theme = lookup(THEME_VAR)
            .map(|v| v.trim().eq_ignore_ascii_case("dark"))
            .unwrap_or(false);

        Self {
            service,
            service_error,
            log_path,
            dark_theme,
        }
    }

    /// The service settings, or the reason they are unusable.
    pub fn require_service(&self) -> Result<&ServiceConfig, ConfigError> {
        match (&self.service, &self.service_error) {
            (Some(service), _) => Ok(service),
            (None, Some(err)) => Err(err.clone()),
            (None, None) => Err(ConfigError::MissingVar(API_URL_VAR.to_string())),
        }
    }
}

impl ServiceConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingVar(API_URL_VAR.to_string()))?;
        let base_url = Url::parse(raw_url.trim())
            .map_err(|e| ConfigError::InvalidValue(API_URL_VAR.to_string(), e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue(
                API_URL_VAR.to_string(),
                format!("unsupported scheme '{}'", base_url.scheme()),
            ));
        }

        let api_key = lookup(API_KEY_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingVar(API_KEY_VAR.to_string()))?;

        Ok(Self { base_url, api_key })
    }
}
