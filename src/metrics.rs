use std::fmt;
use std::sync::Mutex;
use tracing::info;

/// Status of a connectivity service check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCheckStatus {
    /// Endpoint reachable and inventory processed
    Ok,
    /// Cycle aborted before metric emission
    Critical,
}

impl fmt::Display for ServiceCheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceCheckStatus::Ok => write!(f, "ok"),
            ServiceCheckStatus::Critical => write!(f, "critical"),
        }
    }
}

/// Sink for metric submissions.
///
/// The check only produces submissions; delivery to an actual metrics
/// pipeline is the sink's concern.
pub trait MetricsSink: Send + Sync {
    /// Submit one gauge sample
    fn gauge(&self, name: &str, value: f64, tags: &[String]);

    /// Submit one service check
    fn service_check(
        &self,
        name: &str,
        status: ServiceCheckStatus,
        message: Option<&str>,
        tags: &[String],
    );
}

/// Sink that emits every submission as a structured log event
#[derive(Debug, Default)]
pub struct LogSink;

impl MetricsSink for LogSink {
    fn gauge(&self, name: &str, value: f64, tags: &[String]) {
        info!(metric = name, value, tags = ?tags, "gauge");
    }

    fn service_check(
        &self,
        name: &str,
        status: ServiceCheckStatus,
        message: Option<&str>,
        tags: &[String],
    ) {
        info!(
            check = name,
            status = %status,
            message = message.unwrap_or(""),
            tags = ?tags,
            "service check"
        );
    }
}

/// One captured gauge submission
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeSample {
    pub name: String,
    pub value: f64,
    pub tags: Vec<String>,
}

/// One captured service check submission
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCheckSample {
    pub name: String,
    pub status: ServiceCheckStatus,
    pub message: Option<String>,
    pub tags: Vec<String>,
}

/// Sink that records submissions in memory, for assertions in tests
#[derive(Debug, Default)]
pub struct RecordingSink {
    gauges: Mutex<Vec<GaugeSample>>,
    service_checks: Mutex<Vec<ServiceCheckSample>>,
}

impl RecordingSink {
    /// Create an empty recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// All gauges submitted so far, in submission order
    pub fn gauges(&self) -> Vec<GaugeSample> {
        self.gauges.lock().unwrap().clone()
    }

    /// All service checks submitted so far, in submission order
    pub fn service_checks(&self) -> Vec<ServiceCheckSample> {
        self.service_checks.lock().unwrap().clone()
    }
}

impl MetricsSink for RecordingSink {
    fn gauge(&self, name: &str, value: f64, tags: &[String]) {
        self.gauges.lock().unwrap().push(GaugeSample {
            name: name.to_string(),
            value,
            tags: tags.to_vec(),
        });
    }

    fn service_check(
        &self,
        name: &str,
        status: ServiceCheckStatus,
        message: Option<&str>,
        tags: &[String],
    ) {
        self.service_checks.lock().unwrap().push(ServiceCheckSample {
            name: name.to_string(),
            status,
            message: message.map(str::to_string),
            tags: tags.to_vec(),
        });
    }
}
