use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

use crate::config::CheckConfig;
use crate::error::{Error, Result};

/// Capability for fetching the raw certs document.
///
/// The orchestrator only sees this trait, so transport can be swapped out
/// in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CertsFetcher: Send + Sync {
    /// Issue one GET for the certs document and classify the outcome
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Production fetcher backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    /// HTTP client with timeout and default headers applied
    client: reqwest::Client,

    /// Timeout applied to the whole request, echoed in timeout errors
    timeout_secs: u64,
}

impl HttpFetcher {
    /// Create a fetcher from the check configuration
    pub fn new(config: &CheckConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::Config(format!("Invalid header name `{}`: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::Config(format!("Invalid header value for `{}`: {}", name, e)))?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout_secs: config.timeout_seconds,
        })
    }
}

#[async_trait]
impl CertsFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching certificate inventory from {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    url: url.to_string(),
                    timeout_secs: self.timeout_secs,
                }
            } else {
                Error::Connection {
                    url: url.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::BadStatus {
                url: url.to_string(),
                code: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| Error::Connection {
            url: url.to_string(),
            detail: e.to_string(),
        })
    }
}
