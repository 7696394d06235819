//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_SESSION_FILE_NAME: &str = ".calcboard_session.json";

pub const API_URL_VAR: &str = "CALCBOARD_API_URL";
pub const TIMEOUT_MS_VAR: &str = "CALCBOARD_TIMEOUT_MS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} ({reason})")]
    Invalid { var: &'static str, value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root URL prefix, without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
    /// Where the session token is persisted between runs.
    pub session_file: PathBuf,
}

impl ClientConfig {
    /// Build config from raw values, as read from `CALCBOARD_API_URL`,
    /// `CALCBOARD_TIMEOUT_MS` and `CALCBOARD_SESSION_FILE`. `None` or blank
    /// selects the default.
    pub fn from_values(
        base_url: Option<&str>,
        timeout_ms: Option<&str>,
        session_file: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(base_url)?;
        let timeout = Duration::from_millis(parse_timeout_ms(timeout_ms)?);
        let session_file = non_blank(session_file).map_or_else(default_session_file, PathBuf::from);
        Ok(Self { base_url, timeout, session_file })
    }

    /// Replace the base URL, normalising it the same way as the env value.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(Some(base_url))?;
        Ok(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            session_file: default_session_file(),
        }
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_base_url(raw: Option<&str>) -> Result<String, ConfigError> {
    let Some(value) = non_blank(raw) else {
        return Ok(DEFAULT_API_URL.to_owned());
    };
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::Invalid {
            var: API_URL_VAR,
            value: value.to_owned(),
            reason: "expected an http:// or https:// URL".to_owned(),
        });
    }
    Ok(value.trim_end_matches('/').to_owned())
}

fn parse_timeout_ms(raw: Option<&str>) -> Result<u64, ConfigError> {
    let Some(value) = non_blank(raw) else {
        return Ok(DEFAULT_TIMEOUT_MS);
    };
    match value.parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            var: TIMEOUT_MS_VAR,
            value: value.to_owned(),
            reason: "timeout must be positive".to_owned(),
        }),
        Ok(ms) => Ok(ms),
        Err(e) => Err(ConfigError::Invalid { var: TIMEOUT_MS_VAR, value: value.to_owned(), reason: e.to_string() }),
    }
}

fn default_session_file() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(DEFAULT_SESSION_FILE_NAME)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
