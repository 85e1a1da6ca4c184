use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::Result;

/// Default request timeout in seconds, matching the agent HTTP wrapper default
fn default_timeout_seconds() -> u64 {
    20
}

/// Configuration for one check instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Envoy admin certs endpoint, e.g. "http://localhost:15000/certs".
    /// Absence is reported through the connectivity service check at run
    /// time, not treated as a load failure.
    pub certs_url: Option<String>,

    /// Custom tags appended to every submission, order preserved
    #[serde(default)]
    pub tags: Vec<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Extra headers sent with the certs request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            certs_url: None,
            tags: Vec::new(),
            timeout_seconds: default_timeout_seconds(),
            headers: HashMap::new(),
        }
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<CheckConfig> {
    // 1. Determine config path from environment or use default
    let config_path =
        env::var("ENVOY_CERTS_CONFIG").unwrap_or_else(|_| "config/envoy_certs.yaml".to_string());

    // 2. Read and parse YAML configuration; a missing file means an empty
    //    instance, so the missing certs_url surfaces as a service check
    let mut config = if Path::new(&config_path).exists() {
        debug!("Loading configuration from {}", config_path);
        let config_str = fs::read_to_string(&config_path)?;
        serde_yaml::from_str(&config_str)?
    } else {
        debug!("No configuration file at {}, using defaults", config_path);
        CheckConfig::default()
    };

    // 3. Override with environment variables if present
    apply_env_overrides(&mut config);

    info!("Configuration loaded successfully");
    Ok(config)
}

/// Apply environment variable overrides to configuration
fn apply_env_overrides(config: &mut CheckConfig) {
    if let Ok(url) = env::var("ENVOY_CERTS_URL") {
        config.certs_url = Some(url);
    }

    if let Ok(tags) = env::var("ENVOY_CERTS_TAGS") {
        config.tags = tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
    }

    if let Ok(timeout) = env::var("ENVOY_CERTS_TIMEOUT_SECONDS") {
        if let Ok(seconds) = timeout.parse() {
            config.timeout_seconds = seconds;
        }
    }
}
