//! X.509 chain verification and Certificate Transparency SCT checking.
//!
//! Grounded in `examples/other_examples`'s `luct::cert_chain` (chain walking
//! via `x509_verify::VerifyingKey`, precertificate TBS reconstruction by
//! stripping the SCT and CT-poison extensions) and in the sigstore fixture
//! generator's manual RFC 6962 §3.2 signed-payload construction. Diversity
//! gating (`SPEC_FULL.md` §5.4) is new: at least two SCTs from *distinct*
//! operators must verify, with per-SCT failures collected rather than
//! short-circuited so a caller can see exactly which logs were rejected.

use crate::ctlog::{self, PinnedLog};
use crate::error::Error;
use crate::roots;
use crate::types::CertificateIssuer;
use const_oid::ObjectIdentifier;
use ed25519_dalek::Verifier as _;
use ed25519_dalek::{Signature as Ed25519Signature, VerifyingKey as Ed25519VerifyingKey};
use p256::ecdsa::signature::Verifier as _;
use p256::ecdsa::{Signature as P256Signature, VerifyingKey as P256VerifyingKey};
use p256::pkcs8::DecodePublicKey as _;
use sha2::{Digest, Sha256};
use x509_cert::der::asn1::OctetStringRef;
use x509_cert::der::{Decode, Encode};
use x509_cert::spki::SubjectPublicKeyInfoOwned;
use x509_cert::Certificate;
use x509_verify::VerifyingKey;

const CT_PRECERT_SCTS_OID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.4.1.11129.2.4.2");
const CT_POISON_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.4.1.11129.2.4.3");
const SUBJECT_ALT_NAME_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.17");
const BASIC_CONSTRAINTS_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.19");
const KEY_USAGE_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.15");

/// SPKI `AlgorithmIdentifier` OIDs a pinned CT log key may carry
/// (RFC 6962 §3.2 permits either; `SPEC_FULL.md` §4.4 requires dispatch
/// rather than assuming one).
const EC_PUBLIC_KEY_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
const ED25519_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

/// `dNSName` GeneralName tag: context-specific, primitive, number 2.
const DNS_NAME_TAG: u8 = 0x82;

/// KeyUsage bit mask for `keyCertSign` (RFC 5280 §4.2.1.3, bit 5): the BIT
/// STRING numbers bit 0 as the first octet's MSB, so bit 5 is `0x80 >> 5`.
const KEY_CERT_SIGN_BIT: u8 = 0x04;

/// Minimum number of distinct-operator SCTs that must verify
/// (`SPEC_FULL.md` §5.4).
pub const MIN_DISTINCT_OPERATORS: usize = 2;

/// Parses a PEM-encoded certificate chain, leaf first.
///
/// # Errors
/// Returns [`Error::CertFailure`] if the PEM is malformed or the chain has
/// fewer than two certificates (a lone leaf can't be chained to a pinned
/// root; root certificates are never themselves logged this way).
pub fn parse_chain(pem: &str) -> Result<Vec<Certificate>, Error> {
    let chain = Certificate::load_pem_chain(pem.as_bytes())
        .map_err(|e| Error::CertFailure(format!("malformed certificate chain: {e}")))?;
    if chain.len() < 2 {
        return Err(Error::CertFailure(
            "chain must contain at least a leaf and an intermediate".into(),
        ));
    }
    Ok(chain)
}

/// Verifies each link of the chain and that it terminates at the pinned
/// root for `issuer`, that `at_time` falls within every certificate's
/// validity window, and that each signing certificate is authorized to
/// sign (BasicConstraints CA + path length, KeyUsage `keyCertSign`).
///
/// # Errors
/// Returns [`Error::CertFailure`] on any broken signature link, an
/// unparseable pinned root, an out-of-window `at_time` for any certificate
/// in the chain, or a signer that isn't authorized to sign.
pub fn verify_chain(chain: &[Certificate], issuer: CertificateIssuer, at_time: i64) -> Result<(), Error> {
    for cert in chain {
        check_validity(cert, at_time)?;
    }

    for idx in 1..chain.len() {
        let key = VerifyingKey::try_from(&chain[idx])
            .map_err(|e| Error::CertFailure(format!("bad issuer key at depth {idx}: {e}")))?;
        key.verify(&chain[idx - 1])
            .map_err(|_| Error::CertFailure(format!("signature mismatch at depth {idx}")))?;
        check_signer_constraints(&chain[idx], idx)?;
    }

    let root = Certificate::load_pem_chain(roots::pem_for(issuer).as_bytes())
        .map_err(|e| Error::CertFailure(format!("pinned root malformed: {e}")))?
        .into_iter()
        .next()
        .ok_or_else(|| Error::CertFailure("pinned root PEM is empty".into()))?;
    let root_key = VerifyingKey::try_from(&root)
        .map_err(|e| Error::CertFailure(format!("pinned root key malformed: {e}")))?;
    root_key
        .verify(chain.last().expect("chain has at least 2 entries"))
        .map_err(|_| Error::CertFailure("chain does not terminate at the pinned root".into()))?;

    Ok(())
}

/// Checks `at_time` falls within `cert`'s validity window.
fn check_validity(cert: &Certificate, at_time: i64) -> Result<(), Error> {
    let validity = &cert.tbs_certificate.validity;
    let not_before = validity.not_before.to_unix_duration().as_secs() as i64;
    let not_after = validity.not_after.to_unix_duration().as_secs() as i64;
    if at_time < not_before || at_time > not_after {
        return Err(Error::CertFailure(format!(
            "verification time {at_time} outside certificate validity [{not_before}, {not_after}]"
        )));
    }
    Ok(())
}

/// Checks that `cert`, which signs the certificate at `idx - 1` in the
/// chain, is itself authorized to sign: BasicConstraints marks it a CA
/// (and its path length, if set, isn't exceeded by the intermediates below
/// it), and KeyUsage, if present, carries `keyCertSign`.
fn check_signer_constraints(cert: &Certificate, idx: usize) -> Result<(), Error> {
    let extensions = cert.tbs_certificate.extensions.as_ref();

    let (is_ca, path_len) = extensions
        .and_then(|exts| exts.iter().find(|e| e.extn_id == BASIC_CONSTRAINTS_OID))
        .map(|ext| parse_basic_constraints(ext.extn_value.as_bytes()))
        .transpose()?
        .unwrap_or((false, None));
    if !is_ca {
        return Err(Error::CertFailure(format!(
            "certificate at depth {idx} signs another certificate but is not marked as a CA"
        )));
    }
    if let Some(max_intermediates) = path_len {
        let intermediates_below = (idx - 1) as u32;
        if intermediates_below > max_intermediates {
            return Err(Error::CertFailure(format!(
                "certificate at depth {idx} violates its path length constraint"
            )));
        }
    }

    if let Some(key_usage) = extensions
        .and_then(|exts| exts.iter().find(|e| e.extn_id == KEY_USAGE_OID))
    {
        if !parse_key_usage_cert_sign(key_usage.extn_value.as_bytes())? {
            return Err(Error::CertFailure(format!(
                "certificate at depth {idx} does not carry keyCertSign in its KeyUsage"
            )));
        }
    }

    Ok(())
}

/// Parses a BasicConstraints extension value into `(cA, pathLenConstraint)`.
fn parse_basic_constraints(ext_value: &[u8]) -> Result<(bool, Option<u32>), Error> {
    let inner = OctetStringRef::from_der(ext_value)
        .map_err(|e| Error::CertFailure(format!("malformed BasicConstraints encoding: {e}")))?;
    let bytes = inner.as_bytes();
    if bytes.first() != Some(&0x30) {
        return Err(Error::CertFailure("BasicConstraints is not a SEQUENCE".into()));
    }
    let (seq_len, pos) = read_der_length(bytes, 1)?;
    let end = pos + seq_len;
    if end > bytes.len() {
        return Err(Error::CertFailure(
            "BasicConstraints SEQUENCE length overruns extension".into(),
        ));
    }

    let mut is_ca = false;
    let mut path_len = None;
    let mut pos = pos;
    while pos < end {
        let tag = bytes[pos];
        let (len, content_start) = read_der_length(bytes, pos + 1)?;
        if content_start + len > end {
            return Err(Error::CertFailure(
                "BasicConstraints field overruns SEQUENCE".into(),
            ));
        }
        let content = &bytes[content_start..content_start + len];
        match tag {
            0x01 => is_ca = content.first() == Some(&0xFF),
            0x02 => {
                let mut value: u32 = 0;
                for b in content {
                    value = (value << 8) | u32::from(*b);
                }
                path_len = Some(value);
            }
            _ => {}
        }
        pos = content_start + len;
    }
    Ok((is_ca, path_len))
}

/// Parses a KeyUsage extension value, returning whether `keyCertSign` is set.
fn parse_key_usage_cert_sign(ext_value: &[u8]) -> Result<bool, Error> {
    let inner = OctetStringRef::from_der(ext_value)
        .map_err(|e| Error::CertFailure(format!("malformed KeyUsage encoding: {e}")))?;
    let bytes = inner.as_bytes();
    if bytes.first() != Some(&0x03) {
        return Err(Error::CertFailure("KeyUsage is not a BIT STRING".into()));
    }
    let (len, content_start) = read_der_length(bytes, 1)?;
    if len < 2 || content_start + len > bytes.len() {
        return Err(Error::CertFailure("KeyUsage BIT STRING malformed".into()));
    }
    let bits_byte = bytes[content_start + 1];
    Ok(bits_byte & KEY_CERT_SIGN_BIT != 0)
}

/// Returns the leaf certificate's `notBefore` as Unix seconds.
#[must_use]
pub fn leaf_not_before(chain: &[Certificate]) -> i64 {
    chain[0]
        .tbs_certificate
        .validity
        .not_before
        .to_unix_duration()
        .as_secs() as i64
}

/// Reads a DER length octet(s) starting at `pos`, returning `(length,
/// offset of the first content byte)`. Supports short form and long form
/// up to 4 length bytes, which covers every certificate extension in
/// practice.
fn read_der_length(bytes: &[u8], pos: usize) -> Result<(usize, usize), Error> {
    let first = *bytes
        .get(pos)
        .ok_or_else(|| Error::CertFailure("truncated DER length".into()))?;
    if first & 0x80 == 0 {
        return Ok((first as usize, pos + 1));
    }
    let num_bytes = (first & 0x7f) as usize;
    if num_bytes == 0 || num_bytes > 4 || bytes.len() < pos + 1 + num_bytes {
        return Err(Error::CertFailure("malformed DER long-form length".into()));
    }
    let mut len = 0usize;
    for b in &bytes[pos + 1..pos + 1 + num_bytes] {
        len = (len << 8) | usize::from(*b);
    }
    Ok((len, pos + 1 + num_bytes))
}

/// Extracts the leaf certificate's DNS Subject Alternative Names.
///
/// Parsed by hand rather than through a typed `GeneralName` decoder: the
/// extension value is a short, well-known DER shape (a `SEQUENCE` of
/// context-tagged choices), and a direct TLV walk avoids pulling in a
/// decoder for `GeneralName` variants this verifier never needs.
pub fn dns_sans(leaf: &Certificate) -> Result<Vec<String>, Error> {
    let extensions = leaf
        .tbs_certificate
        .extensions
        .as_ref()
        .ok_or_else(|| Error::CertFailure("leaf carries no extensions".into()))?;
    let ext = extensions
        .iter()
        .find(|e| e.extn_id == SUBJECT_ALT_NAME_OID)
        .ok_or_else(|| Error::CertFailure("leaf carries no SAN extension".into()))?;

    let bytes = ext.extn_value.as_bytes();
    if bytes.first() != Some(&0x30) {
        return Err(Error::CertFailure("SAN extension is not a SEQUENCE".into()));
    }
    let (seq_len, mut pos) = read_der_length(bytes, 1)?;
    let end = pos + seq_len;
    if end > bytes.len() {
        return Err(Error::CertFailure("SAN SEQUENCE length overruns extension".into()));
    }

    let mut names = Vec::new();
    while pos < end {
        let tag = bytes[pos];
        let (len, content_start) = read_der_length(bytes, pos + 1)?;
        if content_start + len > end {
            return Err(Error::CertFailure("SAN entry overruns SEQUENCE".into()));
        }
        let content = &bytes[content_start..content_start + len];
        if tag == DNS_NAME_TAG {
            let name = std::str::from_utf8(content)
                .map_err(|_| Error::CertFailure("non-UTF8 DNS SAN entry".into()))?;
            names.push(name.to_string());
        }
        pos = content_start + len;
    }

    Ok(names)
}

/// Reconstructs the precertificate TBS DER: the leaf's TBS with the SCT
/// list and CT-poison extensions removed, as required to recompute the
/// bytes that were actually signed by each log (RFC 6962 §3.2).
fn precert_tbs_der(leaf: &Certificate) -> Result<Vec<u8>, Error> {
    let mut tbs = leaf.tbs_certificate.clone();
    tbs.extensions = tbs.extensions.map(|exts| {
        exts.into_iter()
            .filter(|ext| ext.extn_id != CT_PRECERT_SCTS_OID && ext.extn_id != CT_POISON_OID)
            .collect::<Vec<_>>()
    });
    let mut der = Vec::new();
    tbs.encode_to_vec(&mut der)
        .map_err(|e| Error::CertFailure(format!("failed to re-encode precertificate TBS: {e}")))?;
    Ok(der)
}

/// One SCT as embedded in the leaf certificate's SCT-list extension
/// (RFC 6962 §3.3).
#[derive(Clone, Debug)]
struct ParsedSct {
    log_id: [u8; 32],
    timestamp: u64,
    signature: Vec<u8>,
}

/// Parses the TLS-encoded `SignedCertificateTimestampList` carried in the
/// leaf's SCT extension.
fn parse_sct_list(leaf: &Certificate) -> Result<Vec<ParsedSct>, Error> {
    let extensions = leaf
        .tbs_certificate
        .extensions
        .as_ref()
        .ok_or_else(|| Error::CertFailure("leaf carries no extensions".into()))?;
    let ext = extensions
        .iter()
        .find(|e| e.extn_id == CT_PRECERT_SCTS_OID)
        .ok_or_else(|| Error::CertFailure("leaf carries no embedded SCTs".into()))?;

    // The extension value is itself a DER OCTET STRING wrapping the raw
    // TLS-encoded list (RFC 6962's ASN.1 type for this extension).
    let inner = OctetStringRef::from_der(ext.extn_value.as_bytes())
        .map_err(|e| Error::CertFailure(format!("malformed SCT list encoding: {e}")))?;
    let bytes = inner.as_bytes();

    if bytes.len() < 2 {
        return Err(Error::CertFailure("SCT list too short".into()));
    }
    let total_len = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
    if bytes.len() != total_len + 2 {
        return Err(Error::CertFailure("SCT list length prefix mismatch".into()));
    }

    let mut out = Vec::new();
    let mut cursor = 2usize;
    while cursor < bytes.len() {
        if bytes.len() < cursor + 2 {
            return Err(Error::CertFailure("truncated SCT entry length".into()));
        }
        let entry_len = u16::from_be_bytes([bytes[cursor], bytes[cursor + 1]]) as usize;
        cursor += 2;
        if bytes.len() < cursor + entry_len {
            return Err(Error::CertFailure("truncated SCT entry".into()));
        }
        let entry = &bytes[cursor..cursor + entry_len];
        cursor += entry_len;

        if entry.len() < 1 + 32 + 8 + 2 {
            return Err(Error::CertFailure("SCT entry too short".into()));
        }
        let mut pos = 0usize;
        let _version = entry[pos];
        pos += 1;
        let mut log_id = [0u8; 32];
        log_id.copy_from_slice(&entry[pos..pos + 32]);
        pos += 32;
        let timestamp = u64::from_be_bytes(entry[pos..pos + 8].try_into().unwrap());
        pos += 8;
        let ext_len = u16::from_be_bytes([entry[pos], entry[pos + 1]]) as usize;
        pos += 2 + ext_len;
        if entry.len() < pos + 2 + 2 {
            return Err(Error::CertFailure("SCT entry missing signature".into()));
        }
        pos += 2; // signature_and_hash_algorithm
        let sig_len = u16::from_be_bytes([entry[pos], entry[pos + 1]]) as usize;
        pos += 2;
        if entry.len() != pos + sig_len {
            return Err(Error::CertFailure("SCT signature length mismatch".into()));
        }
        let signature = entry[pos..pos + sig_len].to_vec();

        out.push(ParsedSct {
            log_id,
            timestamp,
            signature,
        });
    }

    Ok(out)
}

/// Builds the exact byte sequence a log signs over for a precertificate
/// SCT (RFC 6962 §3.2): version, signature type, timestamp, precert log
/// entry (issuer key hash + TBS), and an empty extensions field.
fn signed_payload(precert_tbs_der: &[u8], issuer_spki_der: &[u8], timestamp: u64) -> Vec<u8> {
    let issuer_key_hash = Sha256::digest(issuer_spki_der);

    let mut payload = Vec::with_capacity(1 + 1 + 8 + 2 + 32 + 3 + precert_tbs_der.len() + 2);
    payload.push(0); // SCT version v1
    payload.push(0); // signature_type: certificate_timestamp
    payload.extend_from_slice(&timestamp.to_be_bytes());
    payload.extend_from_slice(&1u16.to_be_bytes()); // log_entry_type: precert_entry
    payload.extend_from_slice(&issuer_key_hash);
    let tbs_len = precert_tbs_der.len() as u32;
    payload.extend_from_slice(&tbs_len.to_be_bytes()[1..]); // 24-bit length
    payload.extend_from_slice(precert_tbs_der);
    payload.extend_from_slice(&0u16.to_be_bytes()); // no CT extensions
    payload
}

/// Outcome of the CT diversity gate: which operators' SCTs verified, and
/// the per-SCT errors for ones that didn't.
pub struct CtVerification {
    pub verified_operators: Vec<String>,
    pub per_sct_errors: Vec<String>,
}

/// Verifies embedded SCTs against the pinned log table and enforces the
/// distinct-operator diversity gate.
///
/// Every SCT is checked; failures are collected into `per_sct_errors`
/// rather than returned on first mismatch, so a caller can tell whether a
/// single bad log or a systemic issue caused a diversity-gate failure.
///
/// # Errors
/// Returns [`Error::SctFailure`] if fewer than [`MIN_DISTINCT_OPERATORS`]
/// distinct operators verified.
pub fn verify_embedded_scts(chain: &[Certificate]) -> Result<CtVerification, Error> {
    let leaf = &chain[0];
    let issuer = &chain[1];

    let scts = parse_sct_list(leaf)?;
    let precert_tbs = precert_tbs_der(leaf)?;

    let mut issuer_spki_der = Vec::new();
    issuer
        .tbs_certificate
        .subject_public_key_info
        .encode_to_vec(&mut issuer_spki_der)
        .map_err(|e| Error::CertFailure(format!("failed to encode issuer SPKI: {e}")))?;

    let table = ctlog::table()?;

    let results = scts
        .iter()
        .map(|sct| verify_one_sct(sct, &precert_tbs, &issuer_spki_der, table))
        .collect();

    aggregate_sct_results(results)
}

/// Enforces the distinct-operator diversity gate over per-SCT outcomes
/// (`Ok(operator)` or `Err(message)`), separated from [`verify_embedded_scts`]
/// so the counting rule itself is testable without certificate fixtures.
fn aggregate_sct_results(results: Vec<Result<String, String>>) -> Result<CtVerification, Error> {
    let mut verified_operators = Vec::new();
    let mut per_sct_errors = Vec::new();

    for result in results {
        match result {
            Ok(operator) => {
                if !verified_operators.contains(&operator) {
                    verified_operators.push(operator);
                }
            }
            Err(e) => per_sct_errors.push(e),
        }
    }

    if verified_operators.len() < MIN_DISTINCT_OPERATORS {
        return Err(Error::sct_failure(per_sct_errors));
    }

    Ok(CtVerification {
        verified_operators,
        per_sct_errors,
    })
}

fn verify_one_sct(
    sct: &ParsedSct,
    precert_tbs: &[u8],
    issuer_spki_der: &[u8],
    table: &ctlog::PinnedLogTable,
) -> Result<String, String> {
    let pinned: &PinnedLog = table
        .lookup(&sct.log_id)
        .ok_or_else(|| format!("log id {} is not pinned", hex::encode(sct.log_id)))?;

    let payload = signed_payload(precert_tbs, issuer_spki_der, sct.timestamp);

    let spki = SubjectPublicKeyInfoOwned::from_der(&pinned.public_key_der)
        .map_err(|e| format!("{}: malformed log key: {e}", pinned.operator))?;

    if spki.algorithm.oid == EC_PUBLIC_KEY_OID {
        let vk = P256VerifyingKey::from_public_key_der(&pinned.public_key_der)
            .map_err(|e| format!("{}: malformed P-256 log key: {e}", pinned.operator))?;
        let sig = P256Signature::from_der(&sct.signature)
            .map_err(|e| format!("{}: malformed signature: {e}", pinned.operator))?;
        vk.verify(&payload, &sig)
            .map_err(|_| format!("{}: signature verification failed", pinned.operator))?;
    } else if spki.algorithm.oid == ED25519_OID {
        let vk = Ed25519VerifyingKey::from_public_key_der(&pinned.public_key_der)
            .map_err(|e| format!("{}: malformed Ed25519 log key: {e}", pinned.operator))?;
        let sig = Ed25519Signature::try_from(sct.signature.as_slice())
            .map_err(|e| format!("{}: malformed signature: {e}", pinned.operator))?;
        vk.verify(&payload, &sig)
            .map_err(|_| format!("{}: signature verification failed", pinned.operator))?;
    } else {
        return Err(format!(
            "{}: unsupported log key algorithm {}",
            pinned.operator, spki.algorithm.oid
        ));
    }

    Ok(pinned.operator.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_payload_layout_matches_rfc6962() {
        let tbs = vec![0xAAu8; 10];
        let spki = vec![0xBBu8; 20];
        let payload = signed_payload(&tbs, &spki, 0x0102_0304_0506_0708);
        assert_eq!(payload[0], 0);
        assert_eq!(payload[1], 0);
        assert_eq!(&payload[2..10], &0x0102_0304_0506_0708u64.to_be_bytes());
        assert_eq!(&payload[10..12], &1u16.to_be_bytes());
        let issuer_key_hash = Sha256::digest(&spki);
        assert_eq!(&payload[12..44], issuer_key_hash.as_slice());
        assert_eq!(payload[44..47], 10u32.to_be_bytes()[1..]);
        assert_eq!(&payload[47..57], &tbs[..]);
        assert_eq!(&payload[57..59], &0u16.to_be_bytes());
    }

    #[test]
    fn parse_chain_rejects_single_certificate_chains() {
        let pem = roots::LETS_ENCRYPT_ROOT_PEM;
        assert!(parse_chain(pem).is_err());
    }

    #[test]
    fn read_der_length_handles_short_and_long_form() {
        assert_eq!(read_der_length(&[0x05], 0).unwrap(), (5, 1));
        assert_eq!(read_der_length(&[0x82, 0x01, 0x00], 0).unwrap(), (256, 3));
    }

    /// `BasicConstraints ::= SEQUENCE { cA BOOLEAN DEFAULT FALSE, pathLenConstraint
    /// INTEGER OPTIONAL }`, DER-encoded and wrapped in the OCTET STRING an
    /// extension value always is.
    fn basic_constraints_octet_string(ca: bool, path_len: Option<u8>) -> Vec<u8> {
        let mut seq_body = Vec::new();
        if ca {
            seq_body.extend_from_slice(&[0x01, 0x01, 0xFF]);
        }
        if let Some(p) = path_len {
            seq_body.extend_from_slice(&[0x02, 0x01, p]);
        }
        let mut seq = vec![0x30, seq_body.len() as u8];
        seq.extend_from_slice(&seq_body);
        let mut octet_string = vec![0x04, seq.len() as u8];
        octet_string.extend_from_slice(&seq);
        octet_string
    }

    #[test]
    fn parse_basic_constraints_reads_ca_and_path_len() {
        let ext = basic_constraints_octet_string(true, Some(2));
        assert_eq!(parse_basic_constraints(&ext).unwrap(), (true, Some(2)));
    }

    #[test]
    fn parse_basic_constraints_defaults_ca_false_without_path_len() {
        let ext = basic_constraints_octet_string(false, None);
        assert_eq!(parse_basic_constraints(&ext).unwrap(), (false, None));
    }

    /// `KeyUsage ::= BIT STRING`, DER-encoded with a 1-byte unused-bits prefix.
    fn key_usage_octet_string(bits_byte: u8) -> Vec<u8> {
        let bit_string = [0x03, 0x02, 0x00, bits_byte];
        let mut octet_string = vec![0x04, bit_string.len() as u8];
        octet_string.extend_from_slice(&bit_string);
        octet_string
    }

    #[test]
    fn parse_key_usage_cert_sign_detects_the_bit() {
        assert!(parse_key_usage_cert_sign(&key_usage_octet_string(0x04)).unwrap());
        assert!(parse_key_usage_cert_sign(&key_usage_octet_string(0x80)).is_ok_and(|v| !v));
    }

    #[test]
    fn single_operator_fails_diversity_gate_even_if_valid() {
        let results = vec![Ok("Google".to_string()), Ok("Google".to_string())];
        assert!(aggregate_sct_results(results).is_err());
    }

    #[test]
    fn two_distinct_operators_satisfy_diversity_gate() {
        let results = vec![Ok("Google".to_string()), Ok("Cloudflare".to_string())];
        let verification = aggregate_sct_results(results).unwrap();
        assert_eq!(verification.verified_operators.len(), 2);
    }

    #[test]
    fn unknown_log_errors_are_collected_not_short_circuited() {
        let results = vec![
            Err("log id abcd is not pinned".to_string()),
            Ok("Google".to_string()),
            Ok("Cloudflare".to_string()),
        ];
        let verification = aggregate_sct_results(results).unwrap();
        assert_eq!(verification.verified_operators.len(), 2);
        assert_eq!(verification.per_sct_errors.len(), 1);
    }
}
