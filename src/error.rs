use thiserror::Error;

/// The complete error taxonomy surfaced to callers.
///
/// No verification path in this crate panics on malformed input; every
/// decode, parse, or byte-slice operation that can fail surfaces one of
/// these variants instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("certificate chain: {0}")]
    CertFailure(String),

    #[error("integrity: {0}")]
    IntegrityFailure(String),

    #[error("SCT verification failed: fewer than two distinct operators verified")]
    SctFailure {
        /// Per-SCT errors, collected rather than short-circuited so the
        /// diversity gate can still be evaluated against the SCTs that did
        /// verify.
        per_sct: Vec<String>,
    },

    #[error("VRF proof invalid")]
    VrfProofInvalid,

    #[error("Merkle proof invalid: {0}")]
    MerkleProofInvalid(String),

    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

impl Error {
    #[must_use]
    pub fn sct_failure(per_sct: Vec<String>) -> Self {
        Self::SctFailure { per_sct }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
