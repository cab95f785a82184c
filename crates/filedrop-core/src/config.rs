//! Configuration module
//!
//! The client needs a single setting, the base URL of the storage endpoint.
//! It is resolved once at startup and passed explicitly to the upload client.

use std::env;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Upload client configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL)
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }

    /// Read FILEDROP_API_URL (or API_BASE_URL), loading `.env` first.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("FILEDROP_API_URL")
            .or_else(|| lookup("API_BASE_URL"))
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let config = Self::with_base_url(base_url.trim());
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(anyhow::anyhow!(
                "FILEDROP_API_URL must be an http:// or https:// URL, got '{}'",
                self.api_base_url
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("Request timeout must be greater than zero"));
        }

        Ok(())
    }
}
