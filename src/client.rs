//! Remote data client - enables mocking for tests
//!
//! The dashboard makes exactly one kind of network call: a GET returning
//! JSON, bounded by a timeout. [`JsonFetcher`] is the seam; [`HttpClient`]
//! is the real implementation.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;

use crate::consts::{CLIENT_HEADER, CLIENT_ID, DEFAULT_TIMEOUT_MS};
use crate::errors::{Error, Result};

/// Per-request options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Abort the request if it has not completed after this many milliseconds
    pub timeout_ms: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl FetchOptions {
    pub fn with_timeout_ms(timeout_ms: u64) -> Self {
        Self { timeout_ms }
    }
}

/// JSON GET operation - can be mocked for testing
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// Fetch `url` and parse the body as JSON
    async fn fetch_json(&self, url: &str, options: FetchOptions) -> Result<Value>;
}

/// reqwest-backed [`JsonFetcher`]
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .header(CLIENT_HEADER, CLIENT_ID)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl JsonFetcher for HttpClient {
    async fn fetch_json(&self, url: &str, options: FetchOptions) -> Result<Value> {
        debug!("GET {} (timeout {} ms)", url, options.timeout_ms);

        // Dropping the request future on timeout aborts the connection
        match tokio::time::timeout(Duration::from_millis(options.timeout_ms), self.get(url)).await
        {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                ms: options.timeout_ms,
            }),
        }
    }
}
