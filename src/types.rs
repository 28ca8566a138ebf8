//! Shared data model: proof kinds, neighbour maps, epoch/proof wire shapes.
//!
//! Newtypes with exact-length `TryFrom<&[u8]>` impls follow the teacher's
//! `impl_tryfrom_slice!` convention (`src/types.rs` in the teacher), adapted
//! from Obex's fixed protocol widths to Key Transparency's.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const VRF_PROOF_LEN: usize = 80;
pub const MERKLE_DEPTH: usize = 256;

/// Three kinds of Merkle-tree proof (`spec.md` §3, §4.2).
///
/// Wire-encoded as the integer `0|1|2` (`spec.md` §6), not a string tag:
/// `serde` round-trips through `u8` via `TryFrom`/`From` below.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ProofType {
    Absence,
    Presence,
    Obsolescence,
}

impl TryFrom<u8> for ProofType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Absence),
            1 => Ok(Self::Presence),
            2 => Ok(Self::Obsolescence),
            _ => Err(Error::InvalidInput("unknown proof type")),
        }
    }
}

impl From<ProofType> for u8 {
    fn from(value: ProofType) -> Self {
        match value {
            ProofType::Absence => 0,
            ProofType::Presence => 1,
            ProofType::Obsolescence => 2,
        }
    }
}

/// Sparse neighbour map: tree level (0..=255) to 32-byte sibling hash.
///
/// Missing keys denote an empty-subtree sibling (`hash::ZERO_NODE`); a
/// dense `[Option<[u8; 32]>; 256]` would be equally valid per `spec.md`
/// §9's design note, but a `BTreeMap` keeps the sparse-proof wire format
/// (which typically carries only a handful of non-empty levels) cheap to
/// construct from JSON without a 256-entry array allocation per proof.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NeighbourMap(BTreeMap<u8, [u8; 32]>);

impl NeighbourMap {
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, level: u8, hash: [u8; 32]) {
        self.0.insert(level, hash);
    }

    #[must_use]
    pub fn get(&self, level: u8) -> Option<&[u8; 32]> {
        self.0.get(&level)
    }

    #[must_use]
    pub fn contains(&self, level: u8) -> bool {
        self.0.contains_key(&level)
    }
}

impl FromIterator<(u8, [u8; 32])> for NeighbourMap {
    fn from_iter<T: IntoIterator<Item = (u8, [u8; 32])>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Which pinned root the epoch certificate is expected to chain to.
///
/// Wire-encoded as the integer `0|1` (`spec.md` §6), matching [`ProofType`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CertificateIssuer {
    LetsEncrypt,
    ZeroSSL,
}

impl TryFrom<u8> for CertificateIssuer {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::LetsEncrypt),
            1 => Ok(Self::ZeroSSL),
            _ => Err(Error::InvalidInput("unknown certificate issuer")),
        }
    }
}

impl From<CertificateIssuer> for u8 {
    fn from(value: CertificateIssuer) -> Self {
        match value {
            CertificateIssuer::LetsEncrypt => 0,
            CertificateIssuer::ZeroSSL => 1,
        }
    }
}

/// An insertion proof: `{ ProofType, VRFProofBytes, NeighbourMap }`.
///
/// Carries no revision field: the tree path is the raw VRF output alone, and
/// the revision a caller is checking against only ever enters verification
/// as `min_epoch_id`, bound into the leaf hash (`merkle::leaf_hash`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertionProof {
    pub proof_type: ProofType,
    pub vrf_proof: [u8; VRF_PROOF_LEN],
    pub neighbours: NeighbourMap,
}

/// An epoch snapshot as presented by the server (`spec.md` §3).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epoch {
    pub epoch_id: u32,
    #[serde(with = "hex_32")]
    pub prev_chain_hash: [u8; 32],
    #[serde(with = "hex_32")]
    pub tree_hash: [u8; 32],
    #[serde(with = "hex_32")]
    pub chain_hash: [u8; 32],
    pub certificate_chain: String,
    pub certificate_issuer: CertificateIssuer,
    pub certificate_time: i64,
}

/// A successful verification's only observable output: the anchoring
/// certificate's `NotBefore` timestamp (Unix seconds).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotBefore(pub i64);

mod hex_32 {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
        hex::encode(bytes).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
        let s = String::deserialize(d)?;
        let decoded = hex::decode(&s).map_err(serde::de::Error::custom)?;
        if decoded.len() != 32 {
            return Err(serde::de::Error::custom("expected 32 bytes"));
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(&decoded);
        Ok(out)
    }
}
