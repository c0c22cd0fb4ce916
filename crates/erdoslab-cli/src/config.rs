//! Configuration management for the CLI.

use std::fs;
use std::path::{Path, PathBuf};

use erdoslab_policy::PolicyConfig;
use erdoslab_scout::ScoutConfig;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// CLI configuration.
///
/// Loaded from `erdoslab.toml` at the repository root, falling back to the
/// user-level `~/.erdoslab/config.toml`, falling back to defaults. A
/// missing file is not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Scout (prompt/ingestion) settings
    #[serde(default)]
    pub scout: ScoutConfig,

    /// Policy checker settings
    #[serde(default)]
    pub policy: PolicySettings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// Policy checker settings, mirrored into [`PolicyConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicySettings {
    /// Tokens that mark an unproven placeholder in proof code
    #[serde(default = "default_placeholder_tokens")]
    pub placeholder_tokens: Vec<String>,

    /// Accept LEGACY audit status for pre-existing entries
    #[serde(default = "default_true")]
    pub allow_legacy_audit: bool,

    /// Directory of gated proof code, relative to the repo root
    #[serde(default = "default_gated_dir")]
    pub gated_dir: String,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            placeholder_tokens: default_placeholder_tokens(),
            allow_legacy_audit: true,
            gated_dir: default_gated_dir(),
        }
    }
}

impl PolicySettings {
    /// Build the checker configuration these settings describe.
    pub fn to_policy_config(&self) -> PolicyConfig {
        PolicyConfig {
            placeholder_tokens: self.placeholder_tokens.clone(),
            allow_legacy_audit: self.allow_legacy_audit,
            gated_dir: PathBuf::from(&self.gated_dir),
            ..PolicyConfig::default()
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_placeholder_tokens() -> Vec<String> {
    vec!["sorry".to_string(), "admit".to_string()]
}

fn default_gated_dir() -> String {
    "ErdosLab".to_string()
}

impl Config {
    /// User-level configuration path.
    pub fn user_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".erdoslab").join("config.toml"))
    }

    /// Load configuration for a repository.
    pub fn load(repo_root: &Path) -> Result<Self> {
        let repo_config = repo_root.join("erdoslab.toml");
        if repo_config.is_file() {
            let contents = fs::read_to_string(&repo_config)?;
            return Ok(toml::from_str(&contents)?);
        }
        if let Some(user_config) = Self::user_path() {
            if user_config.is_file() {
                let contents = fs::read_to_string(&user_config)?;
                return Ok(toml::from_str(&contents)?);
            }
        }
        Ok(Self::default())
    }
}

/// Locate the repository root: the nearest ancestor of `start` containing
/// a `problems/` directory or an `erdoslab.toml`, else `start` itself.
pub fn find_repo_root(start: &Path) -> PathBuf {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join("problems").is_dir() || dir.join("erdoslab.toml").is_file() {
            return dir.to_path_buf();
        }
        current = dir.parent();
    }
    start.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert!(config.settings.color);
        assert_eq!(config.policy.placeholder_tokens, vec!["sorry", "admit"]);
        assert_eq!(config.scout.max_plans, 8);
    }

    #[test]
    fn test_repo_config_overrides() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("erdoslab.toml"),
            "[settings]\ncolor = false\n\n[policy]\nallow_legacy_audit = false\n\n[scout]\nmax_plans = 4\n",
        )
        .unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert!(!config.settings.color);
        assert!(!config.policy.allow_legacy_audit);
        assert_eq!(config.scout.max_plans, 4);
        // unset sections keep defaults
        assert_eq!(config.policy.gated_dir, "ErdosLab");
    }

    #[test]
    fn test_to_policy_config() {
        let mut settings = PolicySettings::default();
        settings.gated_dir = "Proofs".to_string();
        let policy = settings.to_policy_config();
        assert_eq!(policy.gated_dir, PathBuf::from("Proofs"));
        assert!(policy.scan_gated_dir);
    }

    #[test]
    fn test_find_repo_root_walks_up() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("problems")).unwrap();
        let nested = dir.path().join("problems/P0001/statement");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_repo_root(&nested), dir.path());
    }

    #[test]
    fn test_find_repo_root_fallback() {
        let dir = TempDir::new().unwrap();
        assert_eq!(find_repo_root(dir.path()), dir.path());
    }
}
