//! Content hashing for reproducibility checks.
//!
//! Produces a SHA-256 digest of a render plan's canonical JSON so two runs
//! with the same inputs and seed can be compared byte for byte.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::KinegramResult;

/// A content hash digest (SHA-256, 32 bytes).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash {
    bytes: [u8; 32],
}

impl ContentHash {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Get the hash as a hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// First 12 hex digits, for log lines.
    pub fn short(&self) -> String {
        self.to_hex()[..12].to_string()
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

pub fn hash_bytes(data: &[u8]) -> ContentHash {
    let result = Sha256::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&result);
    ContentHash::from_bytes(bytes)
}

/// Hash the compact JSON encoding of a value.
///
/// Field order follows struct declaration order, so the encoding is stable
/// for a given build.
pub fn hash_json<T: Serialize>(value: &T) -> KinegramResult<ContentHash> {
    let encoded = serde_json::to_vec(value)?;
    Ok(hash_bytes(&encoded))
}
