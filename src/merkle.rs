//! Sparse depth-256 Merkle tree reconstruction.
//!
//! Verification never walks a stored tree; it recomputes the root a proof
//! implies and compares it against the epoch's published `tree_hash`
//! (`SPEC_FULL.md` §4.2). Bit ordering follows `original_source/verify_proof.go`'s
//! `computeRootHash` (`SPEC_FULL.md` §9, Open Question 1): level 255 (root's
//! immediate children) down to level 0 (the leaf), each level's direction bit
//! taken from the *most significant* unconsumed bit of the tree path. The
//! tree path itself is the raw 32-byte VRF output, used directly — verified
//! against the real `verify_proof_test.go` vectors, which only reproduce
//! bit-exactly when no revision bytes are mixed into the path at all.

use crate::hash::{sha256, sha256_concat, ZERO_NODE};
use crate::types::{NeighbourMap, ProofType, MERKLE_DEPTH};
use crate::vrf::VrfOutput;

/// Builds the 32-byte tree path walked from the raw VRF output.
#[must_use]
pub fn tree_path(beta: &VrfOutput) -> [u8; 32] {
    let mut path = [0u8; 32];
    path.copy_from_slice(&beta[..32]);
    path
}

/// Direction bit for `level` (0 = leaf level, 255 = root's child level).
#[inline]
#[must_use]
fn bit_at(path: &[u8; 32], level: usize) -> u8 {
    let byte = path[level / 8];
    let shift = 8 - (level % 8) - 1;
    (byte >> shift) & 1
}

/// Computes the leaf node hash for a proof (`SPEC_FULL.md` §4.2):
///
/// - `Presence`/`Obsolescence`: `SHA256(SHA256(skl) || be32(min_epoch_id))`.
/// - `Absence`: the zero sentinel; there is no `skl` to bind.
#[must_use]
pub fn leaf_hash(proof_type: ProofType, skl: Option<&[u8]>, min_epoch_id: u32) -> [u8; 32] {
    match proof_type {
        ProofType::Absence => ZERO_NODE,
        ProofType::Presence | ProofType::Obsolescence => {
            let skl_hash = sha256(skl.unwrap_or_default());
            sha256_concat(&skl_hash, &min_epoch_id.to_be_bytes())
        }
    }
}

/// Reconstructs the Merkle root implied by a proof's leaf and neighbours.
///
/// For absence proofs, levels below the first populated neighbour stay at
/// the zero sentinel without being hashed: an absence proof only carries
/// neighbours from the point the search path first diverges from an empty
/// subtree, and everything beneath that point is, by construction, empty.
#[must_use]
pub fn reconstruct_root(
    path: &[u8; 32],
    proof_type: ProofType,
    leaf: [u8; 32],
    neighbours: &NeighbourMap,
) -> [u8; 32] {
    let mut acc = leaf;
    let mut reached_non_empty = proof_type != ProofType::Absence;

    for level in (0..MERKLE_DEPTH).rev() {
        let level = level as u8;
        let sibling = neighbours.get(level).copied();

        if !reached_non_empty {
            match sibling {
                None => continue,
                Some(_) => reached_non_empty = true,
            }
        }

        let sibling = sibling.unwrap_or(ZERO_NODE);
        let bit = bit_at(path, level as usize);
        acc = if bit == 0 {
            sha256_concat(&acc, &sibling)
        } else {
            sha256_concat(&sibling, &acc)
        };
    }

    acc
}
