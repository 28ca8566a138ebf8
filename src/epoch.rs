//! Top-level composition: chain-hash binding, SAN anchoring, and the two
//! entry points callers actually use (`verify_epoch`, `verify_insertion`).
//!
//! Each function is `tracing::instrument`ed so a failing verification can
//! be traced back to the component that rejected it without the error
//! message itself needing to carry that context.

use crate::error::Error;
use crate::hash::sha256_concat;
use crate::merkle;
use crate::types::{Epoch, InsertionProof, NotBefore};
use crate::vrf::{self, VrfPublicKey};
use tracing::{instrument, warn};

/// The fixed SAN anchor format version. `SPEC_FULL.md` §4.4 pins this to
/// `0`; a future format change would introduce a new constant rather than
/// reinterpreting this one.
pub const NAME_VERSION: u32 = 0;

/// Builds the canonical SAN anchoring string for a chain hash, time,
/// epoch, and base domain (`spec.md` §4.4 step 3):
///
/// `{hex(chainHash)[0..32]}.{hex(chainHash)[32..64]}.{certificateTime}.{epochID}.{nameVersion}.{baseDomain}`
#[must_use]
pub fn canonical_san(
    chain_hash: &[u8; 32],
    certificate_time: i64,
    epoch_id: u32,
    base_domain: &str,
) -> String {
    let hex = hex::encode(chain_hash);
    let (first, second) = hex.split_at(32);
    format!("{first}.{second}.{certificate_time}.{epoch_id}.{NAME_VERSION}.{base_domain}")
}

/// Verifies an epoch's certificate chain, its chain-hash binding to the
/// previous epoch, and its SAN anchor, returning the anchoring
/// certificate's `NotBefore` (Unix seconds) on success.
///
/// # Errors
/// - [`Error::CertFailure`] if the certificate chain, CT diversity, or SAN
///   anchor checks fail.
/// - [`Error::IntegrityFailure`] if the recomputed chain hash does not
///   match `epoch.chain_hash`.
#[instrument(skip(epoch), fields(epoch_id = epoch.epoch_id))]
pub fn verify_epoch(epoch: &Epoch, base_domain: &str, current_time: i64) -> Result<NotBefore, Error> {
    let chain = crate::cert::parse_chain(&epoch.certificate_chain)?;
    crate::cert::verify_chain(&chain, epoch.certificate_issuer, current_time)?;
    crate::cert::verify_embedded_scts(&chain)?;

    let computed_chain_hash = sha256_concat(&epoch.prev_chain_hash, &epoch.tree_hash);
    if computed_chain_hash != epoch.chain_hash {
        warn!("chain hash mismatch");
        return Err(Error::IntegrityFailure(
            "recomputed chain hash does not match published chain hash".into(),
        ));
    }

    let expected_san = canonical_san(
        &epoch.chain_hash,
        epoch.certificate_time,
        epoch.epoch_id,
        base_domain,
    );
    let sans = crate::cert::dns_sans(&chain[0])?;
    if !sans.iter().any(|s| s == &expected_san) {
        warn!("SAN anchor not found among certificate's DNS SANs");
        return Err(Error::CertFailure(
            "certificate does not carry the expected SAN anchor".into(),
        ));
    }

    Ok(NotBefore(crate::cert::leaf_not_before(&chain)))
}

/// Verifies that `proof` demonstrates `email` binds to `skl` (or its
/// absence, for an absence proof) at `min_epoch_id`, against `root_hash`
/// (`spec.md` §4.4 steps 5-8 / §9 Open Question 2).
///
/// # Errors
/// - [`Error::VrfProofInvalid`] if the VRF proof does not verify.
/// - [`Error::IntegrityFailure`] if the reconstructed Merkle root does not
///   match `root_hash`.
#[instrument(skip(email, skl, vrf_pubkey, root_hash, proof))]
pub fn verify_insertion(
    email: &str,
    min_epoch_id: u32,
    skl: Option<&[u8]>,
    vrf_pubkey: &VrfPublicKey,
    root_hash: &[u8; 32],
    proof: &InsertionProof,
) -> Result<(), Error> {
    let beta = vrf::verify_with_key(vrf_pubkey, email.as_bytes(), &proof.vrf_proof)?;
    let path = merkle::tree_path(&beta);

    let leaf = merkle::leaf_hash(proof.proof_type, skl, min_epoch_id);
    let reconstructed = merkle::reconstruct_root(&path, proof.proof_type, leaf, &proof.neighbours);

    if &reconstructed != root_hash {
        warn!("reconstructed root does not match published root hash");
        return Err(Error::IntegrityFailure(
            "reconstructed Merkle root does not match published root hash".into(),
        ));
    }

    Ok(())
}
