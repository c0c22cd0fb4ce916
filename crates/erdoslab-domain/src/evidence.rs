//! Evidence entries backing a claim

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single entry of the `evidence` list in `status.json`.
///
/// The entry kind decides which policy rules apply: `lean` and
/// `certificate` satisfy the solved/disproved gate (with `lean` entries
/// further validated against the proof file), `literature` backs
/// literature claims, and unknown kinds are carried along but satisfy
/// nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Evidence {
    /// A Lean proof: file plus the theorem it must contain
    Lean {
        /// Path to the Lean file, relative to the repo root or problem dir
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<String>,
        /// Name of the proved theorem
        #[serde(default, skip_serializing_if = "Option::is_none")]
        theorem: Option<String>,
        /// Fields this tooling does not interpret
        #[serde(flatten)]
        extra: Map<String, Value>,
    },

    /// A machine-checkable certificate produced by an external tool
    Certificate {
        /// Path to the certificate artifact
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<String>,
        /// Fields this tooling does not interpret
        #[serde(flatten)]
        extra: Map<String, Value>,
    },

    /// A literature citation
    Literature {
        /// Citation identifier (DOI, arXiv id, ...)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reference: Option<String>,
        /// Fields this tooling does not interpret
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
}

impl Evidence {
    /// Build a Lean evidence entry.
    pub fn lean(file: impl Into<String>, theorem: impl Into<String>) -> Self {
        Evidence::Lean {
            file: Some(file.into()),
            theorem: Some(theorem.into()),
            extra: Map::new(),
        }
    }

    /// Interpret one raw evidence value.
    ///
    /// Returns `Err` for non-objects, `Ok(None)` for objects with a missing
    /// or unknown `type`, and `Ok(Some(..))` for recognized kinds.
    pub fn from_value(value: &Value) -> Result<Option<Self>, String> {
        let obj = value.as_object().ok_or("must be an object")?;
        match obj.get("type").and_then(Value::as_str) {
            Some("lean") | Some("certificate") | Some("literature") => {
                let evidence = serde_json::from_value(value.clone())
                    .map_err(|e| format!("malformed evidence entry: {}", e))?;
                Ok(Some(evidence))
            }
            _ => Ok(None),
        }
    }

    /// Whether this entry can back a solved/disproved claim.
    pub fn supports_proof_claim(&self) -> bool {
        matches!(self, Evidence::Lean { .. } | Evidence::Certificate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lean_entry_roundtrip() {
        let entry = Evidence::lean("ErdosLab/Problems/P0379.lean", "erdos_379");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "lean");
        assert_eq!(value["theorem"], "erdos_379");

        let back = Evidence::from_value(&value).unwrap().unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_unknown_kind_tolerated() {
        let value = json!({"type": "oracle", "detail": "trust me"});
        assert_eq!(Evidence::from_value(&value).unwrap(), None);
    }

    #[test]
    fn test_missing_type_tolerated() {
        let value = json!({"file": "somewhere"});
        assert_eq!(Evidence::from_value(&value).unwrap(), None);
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(Evidence::from_value(&json!("lean")).is_err());
        assert!(Evidence::from_value(&json!(42)).is_err());
    }

    #[test]
    fn test_proof_claim_support() {
        assert!(Evidence::lean("a.lean", "thm").supports_proof_claim());
        let cert = Evidence::Certificate {
            file: Some("cert.out".into()),
            extra: Map::new(),
        };
        assert!(cert.supports_proof_claim());
        let lit = Evidence::Literature {
            reference: Some("10.1234/abcd".into()),
            extra: Map::new(),
        };
        assert!(!lit.supports_proof_claim());
    }

    #[test]
    fn test_extra_fields_preserved() {
        let value = json!({"type": "lean", "file": "a.lean", "theorem": "t", "commit": "abc123"});
        let entry = Evidence::from_value(&value).unwrap().unwrap();
        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back["commit"], "abc123");
    }
}
