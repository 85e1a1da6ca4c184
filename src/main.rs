use anyhow::Result;
use envoy_certs_check::{
    check::EnvoyCertsCheck, config::load_config, fetch::HttpFetcher, metrics::LogSink, telemetry,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize telemetry first
    telemetry::init()?;

    // 2. Load configuration
    let config = load_config()?;

    // 3. Wire up collaborators
    let fetcher = Arc::new(HttpFetcher::new(&config)?);
    let sink = Arc::new(LogSink);

    // 4. Run one probe cycle; recurring execution belongs to the scheduler
    //    that invokes this binary
    let check = EnvoyCertsCheck::new(config, fetcher, sink);
    check.run().await?;

    info!("Probe cycle complete");
    Ok(())
}
