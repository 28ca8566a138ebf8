//! Client-side, offline verifier for Key Transparency proofs.
//!
//! Decides whether a claimed Signed Key List is bound to an email address in
//! a published epoch, and whether that epoch is anchored in a
//! Certificate-Transparency-logged X.509 certificate. Every entry point is
//! pure with respect to the filesystem and network: callers supply already
//! fetched epochs, proofs, and certificate chains, and get back a
//! `Result<_, error::Error>`.
//!
//! The verification pipeline composes five independently testable
//! components:
//!
//! - [`vrf`]: ECVRF-EDWARDS25519-SHA512-ELL2 proof verification.
//! - [`merkle`]: sparse depth-256 Merkle tree root reconstruction.
//! - [`cert`]: X.509 chain validation and CT SCT verification.
//! - [`ctlog`]: the pinned CT log operator/key table.
//! - [`epoch`]: composition into `verify_epoch` and `verify_insertion`.

pub mod cert;
pub mod ctlog;
pub mod epoch;
pub mod error;
pub mod hash;
pub mod merkle;
pub mod roots;
pub mod types;
pub mod vrf;

pub use epoch::{verify_epoch, verify_insertion};
pub use error::{Error, Result};
pub use types::{CertificateIssuer, Epoch, InsertionProof, NeighbourMap, NotBefore, ProofType};
