//! SHA-256 checksum utility for drift detection.

use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest.
const SHA256_HEX_LEN: usize = 64;

/// Compute SHA256 checksum of a string
pub fn compute_checksum(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}

/// Whether `checksum` has the shape produced by [`compute_checksum`].
///
/// Ledger rows written by older tooling may carry a different hash format
/// (or none at all); those are reported as legacy rather than as edits.
pub fn is_current_checksum(checksum: &str) -> bool {
    checksum.len() == SHA256_HEX_LEN && checksum.bytes().all(|b| b.is_ascii_hexdigit())
}
