//! Runtime configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use spjt_auth::{CapabilityTable, PolicyError};
use spjt_observability::LogFormat;

pub const API_URL: &str = "SPJT_API_URL";
pub const REQUEST_TIMEOUT_SECS: &str = "SPJT_REQUEST_TIMEOUT_SECS";
pub const AUTH_TOKEN: &str = "SPJT_AUTH_TOKEN";
pub const CAPABILITY_TABLE: &str = "SPJT_CAPABILITY_TABLE";
pub const LOG_FORMAT: &str = "SPJT_LOG_FORMAT";

const DEFAULT_API_URL: &str = "http://localhost:3000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to read capability table {path}: {source}")]
    ReadTable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid capability table: {0}")]
    Policy(#[from] PolicyError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub request_timeout: Duration,
    pub auth_token: Option<String>,
    pub capability_table: Option<PathBuf>,
    pub log_format: LogFormat,
    /// Settings that fell back to their default.
    pub defaulted: Vec<&'static str>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut defaulted = Vec::new();

        let api_url = match get(API_URL) {
            Some(url) => {
                let url = url.trim().to_string();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::InvalidValue {
                        key: API_URL,
                        value: url,
                        reason: "expected an http(s) URL".into(),
                    });
                }
                url
            }
            None => {
                defaulted.push(API_URL);
                DEFAULT_API_URL.to_string()
            }
        };

        let request_timeout = match get(REQUEST_TIMEOUT_SECS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: REQUEST_TIMEOUT_SECS,
                        value: raw,
                        reason: "expected a positive number of seconds".into(),
                    });
                }
            },
            None => {
                defaulted.push(REQUEST_TIMEOUT_SECS);
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        };

        let log_format = match get(LOG_FORMAT) {
            Some(raw) => raw.parse().map_err(|e: spjt_observability::ParseLogFormatError| {
                ConfigError::InvalidValue {
                    key: LOG_FORMAT,
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => {
                defaulted.push(LOG_FORMAT);
                LogFormat::default()
            }
        };

        Ok(Self {
            api_url,
            request_timeout,
            auth_token: get(AUTH_TOKEN).map(|t| t.trim().to_string()),
            capability_table: get(CAPABILITY_TABLE).map(PathBuf::from),
            log_format,
            defaulted,
        })
    }

    /// The configured table file, or the built-in table.
    pub fn load_capability_table(&self) -> Result<CapabilityTable, ConfigError> {
        let Some(path) = &self.capability_table else {
            return Ok(CapabilityTable::builtin());
        };
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadTable {
            path: path.clone(),
            source,
        })?;
        Ok(CapabilityTable::from_json(&json)?)
    }

    /// Call once logging is up.
    pub fn log_defaults(&self) {
        for key in &self.defaulted {
            tracing::warn!(key, "not set; using default");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use spjt_auth::{Capability, Role};

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, "http://localhost:3000/api");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.auth_token, None);
        assert_eq!(config.defaulted, vec![API_URL, REQUEST_TIMEOUT_SECS, LOG_FORMAT]);
    }

    #[test]
    fn reads_every_variable() {
        let config = AppConfig::from_lookup(lookup(&[
            (API_URL, "https://spjt.example.org/api"),
            (REQUEST_TIMEOUT_SECS, "5"),
            (AUTH_TOKEN, " tok "),
            (LOG_FORMAT, "pretty"),
            (CAPABILITY_TABLE, "/etc/spjt/caps.json"),
        ]))
        .unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.auth_token.as_deref(), Some("tok"));
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.capability_table, Some(PathBuf::from("/etc/spjt/caps.json")));
        assert!(config.defaulted.is_empty());
    }

    #[test]
    fn invalid_values_are_errors() {
        for (key, value) in [
            (API_URL, "spjt.local"),
            (REQUEST_TIMEOUT_SECS, "0"),
            (REQUEST_TIMEOUT_SECS, "soon"),
            (LOG_FORMAT, "xml"),
        ] {
            let err = AppConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { key: k, .. } if k == key));
        }
    }

    #[test]
    fn capability_table_file_overrides_builtin() {
        let path = std::env::temp_dir().join(format!("spjt-caps-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"operador": ["expedientes.write"]}"#).unwrap();
        let config =
            AppConfig::from_lookup(lookup(&[(CAPABILITY_TABLE, path.to_str().unwrap())])).unwrap();

        let table = config.load_capability_table().unwrap();
        std::fs::remove_file(&path).ok();

        assert!(table.allows(&Role::Operador, &Capability::EXPEDIENTES_WRITE));
        assert!(!table.allows(&Role::Admin, &Capability::EXPEDIENTES_WRITE));
    }

    #[test]
    fn missing_table_file_is_reported() {
        let config =
            AppConfig::from_lookup(lookup(&[(CAPABILITY_TABLE, "/nonexistent/caps.json")]))
                .unwrap();
        assert!(matches!(
            config.load_capability_table(),
            Err(ConfigError::ReadTable { .. })
        ));
    }
}
