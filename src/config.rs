//! Client configuration.
//!
//! DESIGN
//! ======
//! Environment variables (after `.env` is loaded by the binary), overridable
//! by command-line flags:
//! - `CLINIC_API_BASE_URL`: API origin, default `http://localhost:5078`
//! - `CLINIC_SESSION_FILE`: persisted session, default
//!   `$HOME/.clinic/session.json`

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::VarError;
use std::path::PathBuf;

pub const BASE_URL_VAR: &str = "CLINIC_API_BASE_URL";
pub const SESSION_FILE_VAR: &str = "CLINIC_SESSION_FILE";
pub const DEFAULT_BASE_URL: &str = "http://localhost:5078";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid API base URL `{0}`: expected http:// or https://")]
    InvalidBaseUrl(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClinicConfig {
    pub api_base_url: String,
    pub session_file: PathBuf,
}

impl ClinicConfig {
    /// Build from `CLINIC_API_BASE_URL`, `CLINIC_SESSION_FILE`, and `HOME`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for a non-HTTP base URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(env_value(BASE_URL_VAR), env_value(SESSION_FILE_VAR).map(PathBuf::from), home_dir())
    }

    /// Build from explicit values; `None` selects the default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for a non-HTTP base URL.
    pub fn from_values(
        base_url: Option<String>,
        session_file: Option<PathBuf>,
        home: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let api_base_url = normalize_base_url(base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let session_file = session_file.unwrap_or_else(|| default_session_file(home));
        Ok(Self { api_base_url, session_file })
    }
}

/// Trim whitespace and trailing slashes; require an HTTP(S) scheme.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBaseUrl`] when the scheme is missing or the
/// host part is empty.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed.strip_prefix("https://").or_else(|| trimmed.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() => Ok(trimmed.to_owned()),
        _ => Err(ConfigError::InvalidBaseUrl(raw.to_owned())),
    }
}

fn default_session_file(home: Option<PathBuf>) -> PathBuf {
    home.unwrap_or_default().join(".clinic").join("session.json")
}

pub fn home_dir() -> Option<PathBuf> {
    env_value("HOME").map(PathBuf::from)
}

fn env_value(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        Ok(_) | Err(VarError::NotPresent) => None,
        Err(error) => {
            tracing::warn!(%error, name, "ignoring environment variable");
            None
        }
    }
}
