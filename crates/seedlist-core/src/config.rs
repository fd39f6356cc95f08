use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use super::platform;
use crate::recommend::Targets;

const DEVELOPMENT_JSON: &str = include_str!("../config/config.json");
const PRODUCTION_JSON: &str = include_str!("../config/config.prod.json");

/// Endpoint configuration bundled at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "apiURL")]
    pub api_url: String,
    #[serde(rename = "appURL")]
    pub app_url: String,
    #[serde(rename = "redirectURI")]
    pub redirect_uri: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("bundled {profile} config is invalid: {source}")]
    Bundled {
        profile: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl Config {
    /// Pick one of the two bundled payloads.
    pub fn resolve(production: bool) -> Result<Self, ConfigError> {
        let (profile, raw) = if production {
            ("production", PRODUCTION_JSON)
        } else {
            ("development", DEVELOPMENT_JSON)
        };
        serde_json::from_str(raw).map_err(|source| ConfigError::Bundled { profile, source })
    }

    /// Config selected by the `production` cargo feature.
    pub fn for_build() -> Result<Self, ConfigError> {
        Self::resolve(cfg!(feature = "production"))
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn login_url(&self) -> String {
        format!("{}/auth/login", self.api_url)
    }

    pub fn logout_url(&self) -> String {
        format!("{}/auth/logout", self.api_url)
    }
}

/// Runtime settings read from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub targets: Targets,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Raw `Cookie` header value from a logged-in browser session,
    /// e.g. `access_token=...; refresh_token=...; token_expiry=...`.
    #[serde(default)]
    pub cookie: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Replaces the bundled `apiURL` (local testing against another backend).
    #[serde(default)]
    pub url_override: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            url_override: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let settings = Self::default();
            settings.save()?;
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let settings: Self = toml::from_str(&content)?;
        Ok(settings)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }

    /// Bundled config with `api.url_override` applied.
    pub fn apply(&self, config: Config) -> Config {
        match &self.api.url_override {
            Some(url) if !url.trim().is_empty() => {
                config.with_api_url(url.trim().trim_end_matches('/'))
            }
            _ => config,
        }
    }
}
