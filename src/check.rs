use std::sync::Arc;
use tracing::{error, warn};

use crate::config::CheckConfig;
use crate::emit::emit_cycle;
use crate::error::{Error, Result};
use crate::fetch::CertsFetcher;
use crate::inventory;
use crate::metrics::{MetricsSink, ServiceCheckStatus};
use crate::naming::{self, NamedCertificate};

/// Connectivity service check submitted once per cycle
pub const SERVICE_CHECK_NAME: &str = "envoy_certs.can_connect";

/// Time-to-expiration gauge, one sample per deduplicated certificate
pub const TTL_METRIC_NAME: &str = "envoy_certs.days_until_expiration";

/// One probe of an Envoy certs endpoint.
///
/// Collaborators are injected: the fetcher hides the HTTP transport and the
/// sink hides the metrics pipeline. No state survives a cycle.
pub struct EnvoyCertsCheck {
    config: CheckConfig,
    fetcher: Arc<dyn CertsFetcher>,
    sink: Arc<dyn MetricsSink>,
}

impl EnvoyCertsCheck {
    /// Create a check instance from its configuration and collaborators
    pub fn new(
        config: CheckConfig,
        fetcher: Arc<dyn CertsFetcher>,
        sink: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            config,
            fetcher,
            sink,
        }
    }

    /// Run one probe cycle.
    ///
    /// Missing configuration and fetch failures are handled in place: they
    /// emit one CRITICAL service check and end the cycle with `Ok(())`.
    /// A body that parses but violates the expected schema is returned as
    /// an error; there is no recovery path for it and no service check is
    /// emitted in that case.
    pub async fn run(&self) -> Result<()> {
        let custom_tags = &self.config.tags;

        let Some(certs_url) = self.config.certs_url.as_deref() else {
            let msg = "Envoy configuration setting `certs_url` is required";
            self.report_critical(msg, custom_tags);
            error!("{}", msg);
            return Ok(());
        };

        let body = match self.fetcher.fetch(certs_url).await {
            Ok(body) => body,
            Err(err @ (Error::Timeout { .. } | Error::Connection { .. })) => {
                let msg = err.to_string();
                self.report_critical(&msg, custom_tags);
                error!("{}", msg);
                return Ok(());
            }
            Err(err @ Error::BadStatus { .. }) => {
                let msg = err.to_string();
                self.report_critical(&msg, custom_tags);
                warn!("{}", msg);
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        let inventory = inventory::parse_inventory(&body)?;
        let certs = inventory::deduplicate(inventory.certificates);

        let named = certs
            .values()
            .map(|cert| naming::resolve(cert, custom_tags))
            .collect::<Result<Vec<NamedCertificate>>>()?;

        emit_cycle(self.sink.as_ref(), &named, custom_tags);
        Ok(())
    }

    fn report_critical(&self, message: &str, tags: &[String]) {
        self.sink.service_check(
            SERVICE_CHECK_NAME,
            ServiceCheckStatus::Critical,
            Some(message),
            tags,
        );
    }
}
