//! Hardware UUID normalization.
//!
//! Every UUID entering the node manager is reduced to one canonical value
//! before it is used as a key: parsed into a [`Uuid`] and rendered as
//! lowercase hyphenated text. Parsing accepts any case, the simple
//! (dashless) form, braces and the `urn:uuid:` prefix.
//!
//! Cluster nodes report their system UUID straight from the firmware, where
//! the first three groups are stored little-endian. The inventory reports the
//! same UUID big-endian. [`UuidLayout::MixedEndian`] swaps those groups back
//! so both sides join on the same key.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Textual layout of system UUIDs reported by cluster nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UuidLayout {
    /// First three groups byte-swapped relative to the inventory.
    #[default]
    MixedEndian,
    /// Same byte order as the inventory.
    Canonical,
}

/// Parse a UUID in any accepted spelling into its canonical value.
///
/// # Errors
///
/// Returns `InvalidUuid` if `raw` is not a UUID.
pub fn normalize(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw.trim()).map_err(|_| DomainError::InvalidUuid {
        value: raw.to_owned(),
    })
}

/// Canonical text form of a UUID: lowercase, hyphenated.
///
/// # Errors
///
/// Returns `InvalidUuid` if `raw` is not a UUID.
pub fn canonical_string(raw: &str) -> Result<String, DomainError> {
    normalize(raw).map(|u| u.hyphenated().to_string())
}

/// Normalize a system UUID reported by a cluster node.
///
/// # Errors
///
/// Returns `InvalidUuid` if `raw` is not a UUID.
pub fn normalize_cluster_uuid(raw: &str, layout: UuidLayout) -> Result<Uuid, DomainError> {
    let parsed = normalize(raw)?;
    Ok(match layout {
        UuidLayout::MixedEndian => Uuid::from_bytes_le(*parsed.as_bytes()),
        UuidLayout::Canonical => parsed,
    })
}
