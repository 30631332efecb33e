//! Client configuration, loadable from the environment or any serde source.

use std::env;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;

/// Production API root. Resource paths (`/financial-accounts`, ...) are appended to it.
pub const DEFAULT_BASE_URL: &str = "https://api.monime.io/v1";

pub const ENV_BASE_URL: &str = "MONIME_BASE_URL";
pub const ENV_ACCESS_TOKEN: &str = "MONIME_ACCESS_TOKEN";
pub const ENV_SPACE_ID: &str = "MONIME_SPACE_ID";
pub const ENV_VERSION: &str = "MONIME_VERSION";
pub const ENV_TIMEOUT_SECS: &str = "MONIME_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required configuration: {0}")]
    MissingRequired(&'static str),

    #[error("invalid timeout seconds: {0}")]
    InvalidTimeout(String),
}

#[derive(Clone, Deserialize)]
/// Settings for [`MonimeClient::from_config`](crate::MonimeClient::from_config).
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub access_token: String,
    pub space_id: String,
    #[serde(default)]
    pub api_version: Option<String>,
    /// Whole-request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("access_token", &"[REDACTED]")
            .field("space_id", &self.space_id)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Config {
    pub fn new(access_token: impl Into<String>, space_id: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            access_token: access_token.into(),
            space_id: space_id.into(),
            api_version: None,
            timeout_secs: None,
        }
    }

    /// Read `MONIME_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`Config::from_env`], reading through `lookup` instead of the environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let access_token =
            read(ENV_ACCESS_TOKEN).ok_or(ConfigError::MissingRequired(ENV_ACCESS_TOKEN))?;
        let space_id = read(ENV_SPACE_ID).ok_or(ConfigError::MissingRequired(ENV_SPACE_ID))?;
        let base_url = read(ENV_BASE_URL).unwrap_or_else(default_base_url);
        let api_version = read(ENV_VERSION);
        let timeout_secs = read(ENV_TIMEOUT_SECS)
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout(raw))
            })
            .transpose()?;

        Ok(Self {
            base_url,
            access_token,
            space_id,
            api_version,
            timeout_secs,
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn from_lookup_reads_required_and_defaults() {
        let config = Config::from_lookup(lookup(&[
            (ENV_ACCESS_TOKEN, "mon_token"),
            (ENV_SPACE_ID, "spc-1"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.access_token, "mon_token");
        assert_eq!(config.space_id, "spc-1");
        assert_eq!(config.api_version, None);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn from_lookup_reads_optional_values() {
        let config = Config::from_lookup(lookup(&[
            (ENV_ACCESS_TOKEN, "mon_token"),
            (ENV_SPACE_ID, "spc-1"),
            (ENV_BASE_URL, "https://sandbox.example/v1"),
            (ENV_VERSION, "caph.2025-06-20"),
            (ENV_TIMEOUT_SECS, " 30 "),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://sandbox.example/v1");
        assert_eq!(config.api_version.as_deref(), Some("caph.2025-06-20"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn from_lookup_rejects_missing_or_blank_required_values() {
        assert_eq!(
            Config::from_lookup(lookup(&[(ENV_SPACE_ID, "spc-1")])).unwrap_err(),
            ConfigError::MissingRequired(ENV_ACCESS_TOKEN)
        );
        assert_eq!(
            Config::from_lookup(lookup(&[(ENV_ACCESS_TOKEN, "t"), (ENV_SPACE_ID, "  ")]))
                .unwrap_err(),
            ConfigError::MissingRequired(ENV_SPACE_ID)
        );
    }

    #[test]
    fn from_lookup_rejects_bad_timeout() {
        let err = Config::from_lookup(lookup(&[
            (ENV_ACCESS_TOKEN, "t"),
            (ENV_SPACE_ID, "s"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidTimeout("soon".to_owned()));
    }

    #[test]
    fn deserializes_with_defaults_and_redacts_debug() {
        let config: Config =
            serde_json::from_str(r#"{ "access_token": "mon_secret", "space_id": "spc-1" }"#)
                .unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(!format!("{config:?}").contains("mon_secret"));
    }

    #[test]
    fn deserializes_optional_keys() {
        let config: Config = serde_json::from_str(
            r#"{
                "base_url": "https://sandbox.example/v1",
                "access_token": "mon_secret",
                "space_id": "spc-1",
                "api_version": "caph.2025-06-20",
                "timeout_secs": 15
            }"#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://sandbox.example/v1");
        assert_eq!(config.api_version.as_deref(), Some("caph.2025-06-20"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    }
}
