//! Claim lifecycle states

use serde::{Deserialize, Serialize};

/// Lifecycle state of a problem's claim.
///
/// Every problem starts `partial`. The terminal states carry different
/// evidence requirements, enforced by the policy checker:
/// - `solved`/`disproved` require a machine-checked proof artifact
/// - `literature_solved` requires primary sources and a mapping
/// - `ambiguous` requires a statement variants writeup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimState {
    /// Work in progress; no completed claim
    Partial,

    /// Proved, backed by a machine-checked proof
    Solved,

    /// Refuted, backed by a machine-checked proof
    Disproved,

    /// Settled in the literature; backed by citations, not a local proof
    LiteratureSolved,

    /// The statement itself is ambiguous; variants documented
    Ambiguous,
}

/// All allowed states, in reporting order.
pub const ALLOWED_STATES: [ClaimState; 5] = [
    ClaimState::Partial,
    ClaimState::Solved,
    ClaimState::Disproved,
    ClaimState::LiteratureSolved,
    ClaimState::Ambiguous,
];

impl ClaimState {
    /// Get the state name as stored in `status.json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimState::Partial => "partial",
            ClaimState::Solved => "solved",
            ClaimState::Disproved => "disproved",
            ClaimState::LiteratureSolved => "literature_solved",
            ClaimState::Ambiguous => "ambiguous",
        }
    }

    /// Parse a state from its `status.json` spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "partial" => Some(ClaimState::Partial),
            "solved" => Some(ClaimState::Solved),
            "disproved" => Some(ClaimState::Disproved),
            "literature_solved" => Some(ClaimState::LiteratureSolved),
            "ambiguous" => Some(ClaimState::Ambiguous),
            _ => None,
        }
    }

    /// Whether this state claims a machine-checked resolution.
    pub fn is_proof_claim(&self) -> bool {
        matches!(self, ClaimState::Solved | ClaimState::Disproved)
    }
}

impl std::str::FromStr for ClaimState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid claim state: {}", s))
    }
}

impl std::fmt::Display for ClaimState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_all_states() {
        for state in ALLOWED_STATES {
            assert_eq!(ClaimState::parse(state.as_str()), Some(state));
        }
    }

    #[test]
    fn test_unknown_state() {
        assert_eq!(ClaimState::parse("proved"), None);
        assert_eq!(ClaimState::parse("SOLVED"), None);
        assert_eq!(ClaimState::parse(""), None);
    }

    #[test]
    fn test_proof_claims() {
        assert!(ClaimState::Solved.is_proof_claim());
        assert!(ClaimState::Disproved.is_proof_claim());
        assert!(!ClaimState::Partial.is_proof_claim());
        assert!(!ClaimState::LiteratureSolved.is_proof_claim());
        assert!(!ClaimState::Ambiguous.is_proof_claim());
    }

    #[test]
    fn test_serde_spelling() {
        let json = serde_json::to_string(&ClaimState::LiteratureSolved).unwrap();
        assert_eq!(json, "\"literature_solved\"");
        let back: ClaimState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ClaimState::LiteratureSolved);
    }
}
