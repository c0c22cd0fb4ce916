//! Policy checker configuration

use std::path::PathBuf;

/// Configuration for the repository policy rules.
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    /// Tokens that mark an unproven placeholder in proof code
    pub placeholder_tokens: Vec<String>,

    /// Reject top-level `axiom` declarations in gated proof code
    pub forbid_escape_hatches: bool,

    /// Require a semantic audit for solved/disproved claims
    pub require_semantic_audit: bool,

    /// Accept LEGACY audit status for pre-existing entries
    pub allow_legacy_audit: bool,

    /// Directory of gated proof code, relative to the repo root
    pub gated_dir: PathBuf,

    /// Scan every Lean file under the gated directory, not just files
    /// named by evidence entries
    pub scan_gated_dir: bool,

    /// Validate the active-problem slot (`problems/ACTIVE`)
    pub validate_active: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            placeholder_tokens: vec!["sorry".to_string(), "admit".to_string()],
            forbid_escape_hatches: true,
            require_semantic_audit: true,
            allow_legacy_audit: true,
            gated_dir: PathBuf::from("ErdosLab"),
            scan_gated_dir: true,
            validate_active: true,
        }
    }
}

impl PolicyConfig {
    /// Strict configuration: no LEGACY grandfathering.
    pub fn strict() -> Self {
        Self {
            allow_legacy_audit: false,
            ..Self::default()
        }
    }

    /// Permissive configuration for scratch checkouts: structural checks
    /// only, no audit or proof-text requirements.
    pub fn permissive() -> Self {
        Self {
            placeholder_tokens: Vec::new(),
            forbid_escape_hatches: false,
            require_semantic_audit: false,
            allow_legacy_audit: true,
            gated_dir: PathBuf::from("ErdosLab"),
            scan_gated_dir: false,
            validate_active: false,
        }
    }
}
