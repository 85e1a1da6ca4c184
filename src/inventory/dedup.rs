//! Re-keys certificate records by serial number to drop duplicates.

use indexmap::IndexMap;

use super::{CertificateGroup, CertificateRecord};

/// Flatten all groups into one mapping keyed by serial number.
///
/// Groups are walked in document order, `ca_cert` fully before `cert_chain`
/// within each group. A record whose serial number was already seen replaces
/// the earlier record entirely. Silent last-write-wins is the intended
/// behavior: Envoy reports the same certificate under several contexts and
/// only one gauge per serial should be emitted. The map preserves insertion
/// order so emission order is deterministic.
pub fn deduplicate(groups: Vec<CertificateGroup>) -> IndexMap<String, CertificateRecord> {
    let mut certs = IndexMap::new();

    for group in groups {
        for cert in group.ca_cert {
            certs.insert(cert.serial_number.clone(), cert);
        }

        for cert in group.cert_chain {
            certs.insert(cert.serial_number.clone(), cert);
        }
    }

    certs
}
