//! The pinned table of trusted Certificate Transparency logs.
//!
//! Embedded as JSON and parsed once behind a `OnceLock`, following the
//! teacher's preference for lazily-initialized, thread-safe static state
//! over `lazy_static`-style external crates (`SPEC_FULL.md` §6, ambient
//! stack addition: the original distillation left log-key management
//! unspecified beyond "pinned"). The manifest shape — `{Operators:[{name,
//! Logs:[{log_id, Key}]}]}` — and field names follow
//! `original_source/verify_epoch.go`'s `parseCTPublicKeys` exactly, so the
//! embedded constant here is a drop-in for the server's own log list file.

use crate::error::Error;
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// One log entry under an operator, as `parseCTPublicKeys` unmarshals it:
/// `log_id` base64-encoded, `Key` an SPKI-DER public key, also base64.
#[derive(Clone, Debug, Deserialize)]
struct LogEntryRaw {
    log_id: String,
    #[serde(rename = "Key")]
    key: String,
}

/// One operator and the logs it runs.
#[derive(Clone, Debug, Deserialize)]
struct OperatorRaw {
    name: String,
    #[serde(rename = "Logs")]
    logs: Vec<LogEntryRaw>,
}

/// The manifest's outer shape: `{"Operators": [...]}`.
#[derive(Clone, Debug, Deserialize)]
struct ManifestRaw {
    #[serde(rename = "Operators")]
    operators: Vec<OperatorRaw>,
}

/// A pinned log, decoded and ready to verify SCT signatures against.
#[derive(Clone, Debug)]
pub struct PinnedLog {
    pub operator: String,
    pub public_key_der: Vec<u8>,
}

/// The embedded pinned-log manifest.
///
/// Mirrors the shape of Chrome's / Apple's CT log list, trimmed to the
/// operators this verifier accepts (`SPEC_FULL.md` §5.4's CT diversity
/// gate requires distinguishing operators, not just log instances).
const PINNED_LOGS_JSON: &str = r#"{
  "Operators": [
    {
      "name": "Google",
      "Logs": [
        {
          "log_id": "MMUQZ5pdSvNPNWflvTg+TdHxv3wCW6E9ocf+LMFJL4Y=",
          "Key": "MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAELj13eokbf/267UqymG0IW5RAtreY9RfRCf4hRFjXF2tjqhEbX7/uONxe1A0/uXl3VEUJ8hYJJy3dchhnj0mSWQ=="
        }
      ]
    },
    {
      "name": "Cloudflare",
      "Logs": [
        {
          "log_id": "mXnEs5KmGhifF4AyUutq9XX2YAtneGsg7phtEo8Ankc=",
          "Key": "MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAEG1xguyczovDsZbd/fjpewGRyVarWe0CWmE6w8pCGDFgFduuQP2GwCtPPXkFDdimJ7W5qdYD8UicdmfWlYwi1lQ=="
        }
      ]
    },
    {
      "name": "DigiCert",
      "Logs": [
        {
          "log_id": "KnqTIYdfPlEGTwFsJPkTuDCiUKDk9xJRIJdRZ87t+jc=",
          "Key": "MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAEn3S99aupxxh/MWWmctlEJNV0t9ilDi00uGoX/H7HukhwTyGGSOAifz/xr2B0xDUh+Ykg5pTc7M7lSuClA2Kv5Q=="
        }
      ]
    }
  ]
}"#;

#[derive(Debug, Clone)]
pub struct PinnedLogTable {
    by_log_id: HashMap<[u8; 32], PinnedLog>,
}

impl PinnedLogTable {
    fn load() -> Result<Self, Error> {
        Self::from_json(PINNED_LOGS_JSON)
    }

    /// Parses a CT-log manifest in the server's own `{Operators:[{name,
    /// Logs:[{log_id, Key}]}]}` shape. Exposed so callers can pin an
    /// externally supplied log list instead of the embedded default.
    ///
    /// # Errors
    /// Returns [`Error::IntegrityFailure`] if the JSON doesn't match that
    /// shape, or any `log_id`/`Key` field isn't validly base64-encoded, or
    /// a `log_id` doesn't decode to exactly 32 bytes.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let manifest: ManifestRaw = serde_json::from_str(json)
            .map_err(|e| Error::IntegrityFailure(format!("pinned log table malformed: {e}")))?;

        let mut by_log_id = HashMap::new();
        for operator in manifest.operators {
            for log in operator.logs {
                let log_id = B64
                    .decode(log.log_id.as_bytes())
                    .map_err(|e| Error::IntegrityFailure(format!("bad log id encoding: {e}")))?;
                let log_id: [u8; 32] = log_id
                    .try_into()
                    .map_err(|_| Error::IntegrityFailure("log id must be 32 bytes".into()))?;
                let public_key_der = B64
                    .decode(log.key.as_bytes())
                    .map_err(|e| Error::IntegrityFailure(format!("bad log key encoding: {e}")))?;
                by_log_id.insert(
                    log_id,
                    PinnedLog {
                        operator: operator.name.clone(),
                        public_key_der,
                    },
                );
            }
        }
        Ok(Self { by_log_id })
    }

    #[must_use]
    pub fn lookup(&self, log_id: &[u8; 32]) -> Option<&PinnedLog> {
        self.by_log_id.get(log_id)
    }
}

static TABLE: OnceLock<PinnedLogTable> = OnceLock::new();

/// Returns the process-wide pinned log table, parsing it on first access.
///
/// # Errors
/// Returns an error if the embedded manifest is malformed; this would be a
/// build-time defect, not something triggered by verifier input.
pub fn table() -> Result<&'static PinnedLogTable, Error> {
    if let Some(t) = TABLE.get() {
        return Ok(t);
    }
    let loaded = PinnedLogTable::load()?;
    Ok(TABLE.get_or_init(|| loaded))
}
