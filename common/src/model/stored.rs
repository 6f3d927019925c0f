//! Versioned payloads for diagnostics kept in browser storage.
//!
//! New writes always use the tagged `flat-v2` envelope. Reads also accept the
//! two untagged shapes that older builds left behind: a bare array of flat
//! records under `flatDiagnostics` and a bare nested document under
//! `diagnostics`. Decoding yields a closed `StoredDiagnostics` value, so
//! migration is a plain match instead of inspecting object keys.

use super::diagnostic::{DiagnosticRecord, preprocess_diagnostics};
use super::legacy::{LegacyDiagnosticDocument, flatten_diagnostics};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("unreadable stored diagnostics: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format")]
pub enum StoredDiagnostics {
    #[serde(rename = "legacy-v1")]
    Legacy { document: LegacyDiagnosticDocument },
    #[serde(rename = "flat-v2")]
    Flat { diagnostics: Vec<DiagnosticRecord> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlatPayload {
    Tagged(StoredDiagnostics),
    Bare(Vec<DiagnosticRecord>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LegacyPayload {
    Tagged(StoredDiagnostics),
    Bare(LegacyDiagnosticDocument),
}

impl StoredDiagnostics {
    pub fn flat(diagnostics: Vec<DiagnosticRecord>) -> Self {
        Self::Flat { diagnostics }
    }

    /// Decodes the value stored under the current flat key.
    pub fn decode_flat(raw: &str) -> Result<Self, DecodeError> {
        Ok(match serde_json::from_str::<FlatPayload>(raw)? {
            FlatPayload::Tagged(stored) => stored,
            FlatPayload::Bare(diagnostics) => Self::Flat { diagnostics },
        })
    }

    /// Decodes the value stored under the legacy key.
    pub fn decode_legacy(raw: &str) -> Result<Self, DecodeError> {
        Ok(match serde_json::from_str::<LegacyPayload>(raw)? {
            LegacyPayload::Tagged(stored) => stored,
            LegacyPayload::Bare(document) => Self::Legacy { document },
        })
    }

    pub fn encode(&self) -> Result<String, DecodeError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Converts any stored shape into flat records. Nested documents get their
    /// retired field names renamed and are flattened around `legacy_default_year`.
    pub fn into_records(self, legacy_default_year: i32) -> Vec<DiagnosticRecord> {
        match self {
            Self::Flat { diagnostics } => preprocess_diagnostics(diagnostics),
            Self::Legacy { mut document } => {
                document.apply_legacy_renames();
                flatten_diagnostics(&document, legacy_default_year)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_flat_array_is_accepted() {
        let stored = StoredDiagnostics::decode_flat(r#"[{"year":2021,"valueBio":3}]"#).unwrap();
        let records = stored.into_records(2020);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].year, 2021);
        assert_eq!(records[0].value_bio, Some(3.0));
    }

    #[test]
    fn writes_tagged_envelope() {
        let encoded = StoredDiagnostics::flat(vec![DiagnosticRecord::new(2020)])
            .encode()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value, json!({ "format": "flat-v2", "diagnostics": [{ "year": 2020 }] }));

        let decoded = StoredDiagnostics::decode_flat(&encoded).unwrap();
        assert_eq!(decoded, StoredDiagnostics::flat(vec![DiagnosticRecord::new(2020)]));
    }

    #[test]
    fn bare_legacy_document_migrates() {
        let raw = r#"{
            "qualite-des-produits": { "2019": { "valueBio": 8 } },
            "gaspillage-alimentaire": { "hasCovenant": true }
        }"#;
        let stored = StoredDiagnostics::decode_legacy(raw).unwrap();
        assert!(matches!(stored, StoredDiagnostics::Legacy { .. }));

        let records = stored.into_records(2020);
        assert_eq!(records.iter().map(|r| r.year).collect::<Vec<_>>(), vec![2020, 2019]);
        assert_eq!(records[0].has_donation_agreement, Some(true));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(StoredDiagnostics::decode_flat("not json").is_err());
        assert!(StoredDiagnostics::decode_flat(r#"{"format":"flat-v9"}"#).is_err());
    }
}
