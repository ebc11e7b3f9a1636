//! HTTP transport seam.
//!
//! The fetcher only needs "GET this URL and give me JSON"; keeping that behind a
//! trait lets the pipeline run against canned responses in tests.

use reqwest::blocking::Client;
use serde_json::Value;
use thiserror::Error;

use crate::data::endpoints::ApiConfig;
use crate::error::AppError;

/// Per-horizon failure. Either variant aborts the whole run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The call did not complete: connection failure, timeout, non-2xx status or
    /// a body that is not JSON.
    #[error("request to {url} failed: {detail}")]
    Transport { url: String, detail: String },
    /// The JSON did not match any recognised envelope.
    #[error("could not locate a list of records in the response from {url}: {detail}")]
    Shape { url: String, detail: String },
}

impl FetchError {
    pub fn transport(url: &str, detail: impl Into<String>) -> Self {
        FetchError::Transport {
            url: url.to_string(),
            detail: detail.into(),
        }
    }

    pub fn shape(url: &str, detail: impl Into<String>) -> Self {
        FetchError::Shape {
            url: url.to_string(),
            detail: detail.into(),
        }
    }
}

/// Capability to perform one blocking GET and decode the body as JSON.
pub trait Transport {
    fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// `reqwest` blocking transport used by the binary.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::transport(url, e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FetchError::transport(url, format!("status {}", resp.status())));
        }

        resp.json::<Value>()
            .map_err(|e| FetchError::transport(url, format!("invalid JSON body: {e}")))
    }
}
