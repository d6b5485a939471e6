use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::path::Path;

use tracing::debug;

use crate::http_client::HttpClientConfig;
use crate::ConfigError;

pub const API_KEY_VAR: &str = "ALPHAVANTAGE_API_KEY";
pub const BASE_URL_VAR: &str = "STOCKDASH_BASE_URL";
pub const TIMEOUT_VAR: &str = "STOCKDASH_TIMEOUT_MS";
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";

/// Provider credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into().trim().to_owned();
        if value.is_empty() {
            return Err(ConfigError::MissingApiKey { name: API_KEY_VAR });
        }
        Ok(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Settings read once at startup.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub api_key: ApiKey,
    pub base_url: String,
    pub http: HttpClientConfig,
}

impl DashboardConfig {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: String::from(DEFAULT_BASE_URL),
            http: HttpClientConfig::default(),
        }
    }

    /// Load `.env` if present, then read the process environment.
    ///
    /// Values from `.env` replace variables already set in the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv_override() {
            Ok(path) => debug!(path = %path.display(), "loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(ConfigError::EnvFile {
                    message: e.to_string(),
                })
            }
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load `path` into the process environment, overriding existing
    /// variables, then read the environment.
    pub fn from_env_overridden_by(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::from_path_override(path.as_ref()).map_err(|e| ConfigError::EnvFile {
            message: e.to_string(),
        })?;
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings from a dotenv-format file without touching the process environment.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let entries = dotenvy::from_path_iter(path.as_ref()).map_err(|e| ConfigError::EnvFile {
            message: e.to_string(),
        })?;

        let mut values = HashMap::new();
        for entry in entries {
            let (name, value) = entry.map_err(|e| ConfigError::EnvFile {
                message: e.to_string(),
            })?;
            values.insert(name, value);
        }

        Self::from_lookup(|name| values.get(name).cloned())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .ok_or(ConfigError::MissingApiKey { name: API_KEY_VAR })
            .and_then(ApiKey::new)?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|value| !value.trim().is_empty()) {
            config = config.with_base_url(base_url)?;
        }

        if let Some(raw) = lookup(TIMEOUT_VAR).filter(|value| !value.trim().is_empty()) {
            config = config.with_timeout_ms(parse_timeout(&raw)?)?;
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_owned();
        let is_http = base_url.starts_with("https://") || base_url.starts_with("http://");
        if !is_http {
            return Err(ConfigError::InvalidValue {
                name: BASE_URL_VAR,
                value: base_url,
            });
        }
        if base_url.starts_with("http://") {
            self.http = self.http.with_https_only(false);
        }
        self.base_url = base_url;
        Ok(self)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Result<Self, ConfigError> {
        if timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                name: TIMEOUT_VAR,
                value: timeout_ms.to_string(),
            });
        }
        self.http = self.http.with_timeout_ms(timeout_ms);
        Ok(self)
    }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
        name: TIMEOUT_VAR,
        value: raw.to_owned(),
    })
}
