// Rust guideline compliant 2026-10-19

//! Hash-based ID generation and partial ID resolution.

use crate::{Error, Result};
use chrono::NaiveDateTime;
use sha2::{Digest, Sha256};

/// Prefix of appointment IDs.
pub const APPOINTMENT_PREFIX: &str = "apt";

/// Prefix of service IDs.
pub const SERVICE_PREFIX: &str = "svc";

/// Number of hex characters after the prefix.
const HASH_LEN: usize = 6;

/// Minimum length of a partial ID (without prefix) accepted for resolution.
const MIN_PARTIAL_LEN: usize = 3;

/// Generates a `<prefix>-xxxxxx` ID from content, time, and a nonce.
///
/// # Arguments
///
/// * `prefix` - ID prefix, e.g. [`APPOINTMENT_PREFIX`]
/// * `parts` - Content fields hashed into the ID
/// * `timestamp` - Creation time
/// * `nonce` - Disambiguator for identical content at the same instant
pub fn generate_id(prefix: &str, parts: &[&str], timestamp: NaiveDateTime, nonce: u32) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    hasher.update(timestamp.to_string().as_bytes());
    hasher.update(nonce.to_le_bytes());

    let hash = hasher.finalize();
    let hex = format!("{:x}", hash);
    format!("{}-{}", prefix, &hex[..HASH_LEN])
}

/// Validates that `id` has the form `<prefix>-xxxxxx`.
///
/// # Errors
///
/// Returns a validation error if the prefix, length, or hex digits are wrong.
pub fn validate_id_format(id: &str, prefix: &str) -> Result<()> {
    let Some(hash) = id
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
    else {
        return Err(Error::Validation(format!(
            "ID '{}' must start with '{}-'",
            id, prefix
        )));
    };

    if hash.len() != HASH_LEN || !hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()) {
        return Err(Error::Validation(format!(
            "ID '{}' must end with {} lowercase hex characters",
            id, HASH_LEN
        )));
    }

    Ok(())
}

/// Resolves a partial ID against a set of known IDs.
///
/// The partial may omit the prefix. An exact match always wins.
///
/// # Errors
///
/// Returns an error if:
/// - The partial is shorter than three characters
/// - No ID matches
/// - More than one ID matches
pub fn resolve_partial_id<'a, I>(partial: &str, prefix: &str, ids: I) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let partial = partial.trim();
    let needle = if partial.starts_with(&format!("{prefix}-")) {
        partial.to_string()
    } else {
        if partial.len() < MIN_PARTIAL_LEN {
            return Err(Error::Validation(format!(
                "Partial ID '{}' must have at least {} characters",
                partial, MIN_PARTIAL_LEN
            )));
        }
        format!("{prefix}-{partial}")
    };

    let mut matches = Vec::new();
    for id in ids {
        if id == needle {
            return Ok(id.to_string());
        }
        if id.starts_with(&needle) {
            matches.push(id.to_string());
        }
    }

    match matches.len() {
        0 => Err(Error::NotFound(partial.to_string())),
        1 => Ok(matches.remove(0)),
        _ => Err(Error::AmbiguousId(partial.to_string(), matches)),
    }
}
