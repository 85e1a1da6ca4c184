//! Wire types for the Envoy admin `/certs` document.

pub mod dedup;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;

pub use dedup::deduplicate;

/// Top-level document returned by the certs endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateInventory {
    /// Certificate groups, one per listener/cluster context
    pub certificates: Vec<CertificateGroup>,
}

/// One group of certificates as reported by Envoy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateGroup {
    /// Authority certificates
    #[serde(default)]
    pub ca_cert: Vec<CertificateRecord>,

    /// Chain certificates
    #[serde(default)]
    pub cert_chain: Vec<CertificateRecord>,
}

/// One certificate as reported by Envoy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateRecord {
    /// Serial number, the identity key used for deduplication
    pub serial_number: String,

    /// Source path; contains "inline" when the material came from SDS
    /// instead of the filesystem
    pub path: String,

    /// Subject alternative names, each a single kind-to-value mapping
    #[serde(default)]
    pub subject_alt_names: Vec<HashMap<String, String>>,

    /// Days until the certificate expires; negative means already expired
    pub days_until_expiration: f64,
}

/// Parse a raw response body into the inventory document.
///
/// A body that is not valid JSON of the expected schema is a fatal cycle
/// failure; no recovery path exists for it.
pub fn parse_inventory(body: &str) -> Result<CertificateInventory> {
    Ok(serde_json::from_str(body)?)
}
