//! Heuristic display names for certificates.
//!
//! Envoy does not report a usable name per certificate, so one is derived
//! from the source path when the material came from disk, falling back to
//! the first subject alternative name, falling back to no name at all.

use crate::error::{Error, Result};
use crate::inventory::CertificateRecord;

/// Marker found in `path` when the certificate was delivered through SDS
/// rather than loaded from the filesystem
pub const INLINE_PATH_MARKER: &str = "inline";

/// A certificate record with its resolved display name and tag set
#[derive(Debug, Clone, PartialEq)]
pub struct NamedCertificate {
    /// Serial number of the underlying record
    pub serial_number: String,

    /// Resolved display name; absence is a valid terminal state
    pub display_name: Option<String>,

    /// Days until expiration, carried through for the gauge value
    pub days_until_expiration: f64,

    /// Assembled tags, same cardinality of meaning as `display_name`
    pub tags: Vec<String>,
}

/// Intermediate state threaded through the naming rules
#[derive(Debug, Default)]
struct Resolution {
    display_name: Option<String>,
    tags: Vec<String>,
}

type NamingRule = fn(&CertificateRecord, &mut Resolution) -> Result<()>;

/// Rules run in this exact order. The first rule to assign a name wins;
/// tag emission is per-rule and independent of earlier assignments.
const RULES: [NamingRule; 3] = [path_rule, san_rule, name_tag_rule];

/// Resolve a display name and tag set for one certificate record.
///
/// Total over well-formed records; the only error is a subject alternative
/// name entry that does not carry exactly one kind-to-value pair.
pub fn resolve(record: &CertificateRecord, custom_tags: &[String]) -> Result<NamedCertificate> {
    let mut resolution = Resolution::default();

    for rule in RULES {
        rule(record, &mut resolution)?;
    }

    // Custom tags always come last, order preserved
    resolution.tags.extend(custom_tags.iter().cloned());

    Ok(NamedCertificate {
        serial_number: record.serial_number.clone(),
        display_name: resolution.display_name,
        days_until_expiration: record.days_until_expiration,
        tags: resolution.tags,
    })
}

/// A real filesystem path names the certificate directly
fn path_rule(record: &CertificateRecord, resolution: &mut Resolution) -> Result<()> {
    if !record.path.contains(INLINE_PATH_MARKER) {
        resolution.display_name = Some(record.path.clone());
        resolution.tags.push(format!("path:{}", record.path));
    }
    Ok(())
}

/// The first subject alternative name is the fallback; whether it is a DNS
/// or URI SAN is not distinguished
fn san_rule(record: &CertificateRecord, resolution: &mut Resolution) -> Result<()> {
    let Some(entry) = record.subject_alt_names.first() else {
        return Ok(());
    };

    if entry.len() != 1 {
        return Err(Error::UnexpectedShape(format!(
            "subject_alt_names entry for serial `{}` carries {} keys, expected exactly 1",
            record.serial_number,
            entry.len()
        )));
    }

    let san = entry.values().next().cloned().unwrap_or_default();
    if resolution.display_name.is_none() {
        resolution.display_name = Some(san.clone());
    }
    resolution.tags.push(format!("san:{}", san));
    Ok(())
}

/// Every certificate gets a name tag, rendering the nameless case as the
/// literal `None`
fn name_tag_rule(_record: &CertificateRecord, resolution: &mut Resolution) -> Result<()> {
    let name = resolution.display_name.as_deref().unwrap_or("None");
    resolution.tags.push(format!("name:{}", name));
    Ok(())
}
