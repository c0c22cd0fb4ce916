//! Scout configuration

use serde::{Deserialize, Serialize};

use crate::plan::DEFAULT_MAX_PLANS;

/// Default models to scaffold prompt/response files for.
pub const DEFAULT_MODELS: [&str; 2] = ["gpt-5.2-pro", "gemini-deepthink"];

/// Configuration for prompt scaffolding and response ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// Models a prompt/response file pair is written for
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Maximum plans accepted in a planner response
    #[serde(default = "default_max_plans")]
    pub max_plans: usize,

    /// Maximum candidates kept after dedup and ranking
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,

    /// Maximum candidates rendered into the planner prompt
    #[serde(default = "default_max_literature")]
    pub max_literature_in_prompt: usize,
}

fn default_models() -> Vec<String> {
    DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()
}

fn default_max_plans() -> usize {
    DEFAULT_MAX_PLANS
}

fn default_max_candidates() -> usize {
    20
}

fn default_max_literature() -> usize {
    8
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            models: default_models(),
            max_plans: default_max_plans(),
            max_candidates: default_max_candidates(),
            max_literature_in_prompt: default_max_literature(),
        }
    }
}

impl ScoutConfig {
    /// Apply the `ERDOSLAB_MODELS` environment override (comma-separated).
    pub fn with_env_models(mut self) -> Self {
        if let Ok(raw) = std::env::var("ERDOSLAB_MODELS") {
            let models: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect();
            if !models.is_empty() {
                self.models = models;
            }
        }
        self
    }
}
