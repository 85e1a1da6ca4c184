//! envoy-certs-check - Certificate expiration probe for Envoy
//!
//! Queries an Envoy admin `/certs` endpoint, deduplicates the reported
//! certificates by serial number, derives a display name per certificate
//! via ordered heuristics, and emits one time-to-expiration gauge per
//! certificate plus a single connectivity service check per cycle.

// Foundational layer
pub mod config;
pub mod error;
pub mod telemetry;

// Core layer
pub mod inventory;
pub mod naming;

// Collaborator capabilities
pub mod fetch;
pub mod metrics;

// Check layer
pub mod check;
pub mod emit;

// Public key types
pub use crate::check::{EnvoyCertsCheck, SERVICE_CHECK_NAME, TTL_METRIC_NAME};
pub use crate::config::{load_config, CheckConfig};
pub use crate::error::{Error, Result};
pub use crate::fetch::{CertsFetcher, HttpFetcher};
pub use crate::metrics::{LogSink, MetricsSink, RecordingSink, ServiceCheckStatus};
pub use crate::naming::NamedCertificate;
