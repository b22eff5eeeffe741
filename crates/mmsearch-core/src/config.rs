use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base the backend paths are appended to. A single trailing slash is dropped.
    pub backend_url: String,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { backend_url: DEFAULT_BACKEND_URL.to_string(), log_level: "warn".to_string() }
    }
}

impl ClientConfig {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::from_figment(Self::figment_for_env(&env_name))
    }

    pub fn figment_for_env(env_name: &str) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default())).merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment.merge(Env::prefixed("APP_"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let mut config: Self = figment.extract().map_err(|e| Error::Config(e.to_string()))?;
        config.backend_url = normalize_base_url(&config.backend_url);
        config.validate()?;
        Ok(config)
    }

    /// Apply a `--backend` style override on top of whatever was loaded.
    pub fn with_backend_url(mut self, url: &str) -> Result<Self> {
        self.backend_url = normalize_base_url(url);
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        let url = self.backend_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!("backend_url must be an absolute http(s) URL, got '{url}'")));
        }
        Ok(())
    }
}

pub fn normalize_base_url(url: &str) -> String {
    let url = url.trim();
    url.strip_suffix('/').unwrap_or(url).to_string()
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
