//! Shared-secret check for the programmatic creation endpoint.

use std::fmt;
use std::fs;

use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::config::ApiConfig;
use crate::errors::{LinkvaultError, Result};

/// Environment variable holding the API key. Wins over `api.key_file`.
pub const API_KEY_ENV: &str = "LINKVAULT_API_KEY";

#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new<T: Into<String>>(key: T) -> Self {
        Self(key.into())
    }

    /// Load the key from `LINKVAULT_API_KEY` or `config.key_file`.
    ///
    /// `Ok(None)` means no credential is configured and the endpoint stays
    /// disabled. An unreadable key file is a startup error.
    pub fn load(config: &ApiConfig) -> Result<Option<Self>> {
        Self::from_sources(std::env::var(API_KEY_ENV).ok(), config.key_file.as_deref())
    }

    /// Resolve the key from an already-read environment value and an
    /// optional key file path.
    pub fn from_sources(env_value: Option<String>, key_file: Option<&str>) -> Result<Option<Self>> {
        if let Some(value) = env_value.map(|v| v.trim().to_string())
            && !value.is_empty()
        {
            info!("API key loaded from {}", API_KEY_ENV);
            return Ok(Some(Self(value)));
        }

        let Some(path) = key_file.filter(|p| !p.is_empty()) else {
            return Ok(None);
        };

        let content = fs::read_to_string(path).map_err(|e| {
            LinkvaultError::file_operation(format!("Failed to read API key file {}: {}", path, e))
        })?;
        let key = content.trim();
        if key.is_empty() {
            warn!("API key file {} is empty, API disabled", path);
            return Ok(None);
        }

        info!("API key loaded from {}", path);
        Ok(Some(Self(key.to_string())))
    }

    /// 常量时间比较
    pub fn verify(&self, candidate: &str) -> bool {
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
