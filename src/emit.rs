//! Turns the named certificate set into metric submissions.

use crate::check::{SERVICE_CHECK_NAME, TTL_METRIC_NAME};
use crate::metrics::{MetricsSink, ServiceCheckStatus};
use crate::naming::NamedCertificate;

/// Emit one gauge per certificate, in input order, then exactly one OK
/// connectivity service check. An empty set still gets the service check.
pub fn emit_cycle(sink: &dyn MetricsSink, named: &[NamedCertificate], custom_tags: &[String]) {
    for cert in named {
        sink.gauge(TTL_METRIC_NAME, cert.days_until_expiration, &cert.tags);
    }

    sink.service_check(SERVICE_CHECK_NAME, ServiceCheckStatus::Ok, None, custom_tags);
}
