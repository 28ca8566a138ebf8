//! Fixed-size binary hashing primitives and big-endian integer encodings.
//!
//! Grounded in the teacher's `hashers.rs`/`merkle.rs` pattern of small,
//! `#[inline]`, `#[must_use]` helpers around a single digest type.

use sha2::{Digest, Sha256};

/// The canonical empty-subtree sibling: 32 zero bytes.
pub const ZERO_NODE: [u8; 32] = [0u8; 32];

/// `SHA256(data)`.
#[inline]
#[must_use]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// `SHA256(a || b)` without allocating an intermediate concatenation buffer.
#[inline]
#[must_use]
pub fn sha256_concat(a: &[u8], b: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(a);
    hasher.update(b);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Big-endian 32-bit encoding (revisions, epoch IDs, `minEpochID`).
#[inline]
#[must_use]
pub const fn be32(x: u32) -> [u8; 4] {
    x.to_be_bytes()
}
