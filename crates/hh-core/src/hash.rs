//! SHA-256 helpers used for artefact and input fingerprints.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::HhError;
use crate::serde::to_canonical_json_bytes;

/// Hex encoded SHA-256 digest of raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Computes a stable hexadecimal hash for the provided serialisable payload.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, HhError> {
    let bytes = to_canonical_json_bytes(value)?;
    Ok(sha256_hex(&bytes))
}
