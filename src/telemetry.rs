use std::env;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

use crate::error::{Error, Result};

/// Initialize the logging system.
///
/// Log verbosity follows `RUST_LOG`; `ENVOY_CERTS_LOG_JSON=1` switches the
/// output format to JSON lines.
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = env::var("ENVOY_CERTS_LOG_JSON").map(|v| v == "1").unwrap_or(false);

    let result = if use_json {
        let fmt_layer = fmt::Layer::default().with_target(true).json();
        Registry::default().with(filter).with(fmt_layer).try_init()
    } else {
        let fmt_layer = fmt::Layer::default().with_target(true);
        Registry::default().with(filter).with(fmt_layer).try_init()
    };

    result.map_err(|e| Error::Config(format!("Failed to set global default subscriber: {}", e)))
}
