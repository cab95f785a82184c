//! HTTP client for the filedrop storage endpoint.
//!
//! Provides a minimal client that posts one file as `multipart/form-data`,
//! publishes upload progress on an ordered channel, and a `submit` driver that
//! moves an `UploadSession` through its transitions. The CLI uses this client
//! directly.

pub mod progress;
pub mod submit;
mod upload;

use anyhow::{Context, Result};
use filedrop_core::ClientConfig;
use reqwest::Client;
use std::time::Duration;

pub use progress::{progress_channel, ProgressReceiver, ProgressReporter, ProgressSender};
pub use submit::submit;

/// Path of the upload endpoint, relative to the base URL.
pub const UPLOAD_PATH: &str = "/upload";

/// Multipart field carrying the file.
pub const FILE_FIELD: &str = "file";

/// HTTP client for the storage endpoint.
#[derive(Clone, Debug)]
pub struct UploadClient {
    client: Client,
    base_url: String,
}

impl UploadClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Raw client for custom requests.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_trims_trailing_slash() {
        let client = UploadClient::new(&ClientConfig::with_base_url("http://localhost:8000/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.build_url(UPLOAD_PATH), "http://localhost:8000/upload");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(UploadClient::new(&ClientConfig::with_base_url("localhost:8000")).is_err());
    }
}
