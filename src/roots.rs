//! Pinned trust anchors.
//!
//! The certificate chains epochs are anchored against must terminate at one
//! of exactly two roots (`SPEC_FULL.md` §5.3): Let's Encrypt's ISRG Root X1,
//! or ZeroSSL's root. Both are embedded at build time rather than read from
//! the filesystem or fetched, so verification never depends on local trust
//! store contents or network access (`SPEC_FULL.md` §2, ambient constraint).

use crate::types::CertificateIssuer;

/// ISRG Root X1, the Let's Encrypt trust anchor.
pub const LETS_ENCRYPT_ROOT_PEM: &str = include_str!("roots/isrg_root_x1.pem");

/// ZeroSSL's root of trust.
pub const ZEROSSL_ROOT_PEM: &str = include_str!("roots/zerossl_root.pem");

/// Returns the pinned root PEM for the given issuer.
#[must_use]
pub fn pem_for(issuer: CertificateIssuer) -> &'static str {
    match issuer {
        CertificateIssuer::LetsEncrypt => LETS_ENCRYPT_ROOT_PEM,
        CertificateIssuer::ZeroSSL => ZEROSSL_ROOT_PEM,
    }
}
