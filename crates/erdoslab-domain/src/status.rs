//! The per-problem `status.json` record

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::state::ClaimState;

/// Parsed `status.json`.
///
/// The record is deliberately lenient: every field is optional at parse time
/// so the policy checker can report precise, field-level violations instead
/// of a single deserialization failure. The scaffolder always writes the
/// complete shape. Unknown fields are preserved across read-modify-write.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProblemStatus {
    /// Canonical problem id (e.g. `P0379`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_id: Option<String>,

    /// Optional human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// The claim block (`claim.state`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim: Option<ClaimRecord>,

    /// Pointer to the frozen statement file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frozen_statement: Option<FrozenStatementRef>,

    /// Evidence entries backing the claim; raw values so malformed entries
    /// can be diagnosed individually
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Value>,

    /// Fields this tooling does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `claim` block of `status.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Raw state string; validated against [`ClaimState`] by the checker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Fields this tooling does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `frozen_statement` block of `status.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrozenStatementRef {
    /// Path to the frozen statement, relative to the problem directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Fields this tooling does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProblemStatus {
    /// The claim state, when present and recognized.
    pub fn claim_state(&self) -> Option<ClaimState> {
        self.claim
            .as_ref()
            .and_then(|claim| claim.state.as_deref())
            .and_then(ClaimState::parse)
    }

    /// Set the claim state, creating the claim block if needed.
    pub fn set_claim_state(&mut self, state: ClaimState) {
        let claim = self.claim.get_or_insert_with(ClaimRecord::default);
        claim.state = Some(state.as_str().to_string());
    }
}
