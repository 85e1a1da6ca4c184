use std::io;
use thiserror::Error;

/// Generic error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request to the certs endpoint timed out
    #[error("Envoy endpoint `{url}` timed out after {timeout_secs} seconds")]
    Timeout { url: String, timeout_secs: u64 },

    /// Transport-level failure (DNS, refusal, reset)
    #[error("Error accessing Envoy endpoint `{url}`: {detail}")]
    Connection { url: String, detail: String },

    /// Endpoint answered with a non-200 status
    #[error("Envoy endpoint `{url}` responded with HTTP status code {code}")]
    BadStatus { url: String, code: u16 },

    /// Response parsed but did not match the expected shape
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Project-wide Result type
pub type Result<T> = std::result::Result<T, Error>;
