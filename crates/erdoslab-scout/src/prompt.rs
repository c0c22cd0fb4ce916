//! Prompt rendering and per-model prompt files

use std::fs;
use std::path::Path;

use crate::candidates::{render_prompt_block, CandidatesFile};
use crate::keywords::extract_keywords;
use crate::{ScoutConfig, ScoutError};

/// Prompt contract version embedded in every rendered prompt.
pub const PROMPT_VERSION: &str = "v1";

/// Placeholder seeded into response files.
pub const PLACEHOLDER_RESPONSE: &str = "# Paste model output below\n\n";

/// Everything a prompt needs to know about a problem.
#[derive(Debug, Clone)]
pub struct PromptContext<'a> {
    /// Canonical problem id (`P0379`)
    pub problem_id: &'a str,
    /// Problem number on the corpus website
    pub problem_number: u64,
    /// Optional human-readable title
    pub title: Option<&'a str>,
    /// Problem page URL
    pub problem_url: &'a str,
    /// Forum thread URL
    pub forum_url: &'a str,
    /// Frozen statement text (may be empty before freezing)
    pub statement_text: &'a str,
}

impl PromptContext<'_> {
    fn title_line(&self) -> String {
        self.title
            .map(str::to_string)
            .unwrap_or_else(|| format!("Erdos Problem #{}", self.problem_number))
    }

    fn keyword_line(&self) -> String {
        let keywords = extract_keywords(self.statement_text, 10);
        if keywords.is_empty() {
            "none".to_string()
        } else {
            keywords.join(", ")
        }
    }

    fn context_block(&self) -> String {
        format!(
            "Problem context:\n- problem_id: {}\n- title: {}\n- problem_url: {}\n- forum_url: {}\n- keywords: {}\n",
            self.problem_id,
            self.title_line(),
            self.problem_url,
            self.forum_url,
            self.keyword_line()
        )
    }

    fn statement_block(&self) -> String {
        let statement = if self.statement_text.trim().is_empty() {
            "TBD (statement unavailable)."
        } else {
            self.statement_text.trim()
        };
        format!("Frozen statement:\n{}\n", statement)
    }
}

/// Render the solver planner prompt.
///
/// The output contract is strict: one JSON object in a single ```json
/// fence, 3 to `max_plans` plans, nothing claimed as solved or verified.
pub fn planner_prompt(ctx: &PromptContext<'_>, config: &ScoutConfig) -> String {
    format!(
        "# Solver Planner Prompt (manual)\n\
         \nVersion: {version}\n\
         \nYou are generating structured research plans for an Erdos problem. \
         Do NOT claim the problem is solved. Do NOT mark anything as verified. \
         Output only plans and experiments that could lead to a proof.\n\
         \n{context}\
         \n{statement}\
         \nIf you used literature candidates from candidates.json, set solver_used_scout=true. \
         Otherwise keep solver_used_scout=false.\n\
         \nOutput format (STRICT): return exactly one JSON object in a single ```json``` block. \
         Do not include extra prose outside the JSON.\n\
         \nRequired JSON schema:\n\
         {{\n\
         \x20 \"problem_id\": \"{problem_id}\",\n\
         \x20 \"generated_at\": \"YYYY-MM-DD\",\n\
         \x20 \"solver_used_scout\": false,\n\
         \x20 \"plans\": [\n\
         \x20   {{\n\
         \x20     \"strategy_name\": \"...\",\n\
         \x20     \"high_level_idea\": \"...\",\n\
         \x20     \"key_lemmas\": [\n\
         \x20       {{\n\
         \x20         \"statement\": \"...\",\n\
         \x20         \"why_needed\": \"...\",\n\
         \x20         \"likely_sources\": [\"...\"],\n\
         \x20         \"checkability\": \"easy | medium | hard\"\n\
         \x20       }}\n\
         \x20     ],\n\
         \x20     \"definitions_needed\": [\"...\"],\n\
         \x20     \"risk_factors\": [\"...\"],\n\
         \x20     \"experiments\": [\"...\"],\n\
         \x20     \"formalization_path\": [\"...\"],\n\
         \x20     \"expected_payoff\": 0.0,\n\
         \x20     \"difficulty\": 0.0,\n\
         \x20     \"dependency_graph\": [\"lemma1 -> lemma2\", \"lemma2 -> theorem\"]\n\
         \x20   }}\n\
         \x20 ],\n\
         \x20 \"notes\": \"... optional ...\"\n\
         }}\n\
         \nRules:\n\
         - Provide 3 to {max_plans} plans.\n\
         - expected_payoff and difficulty must be numbers in [0,1].\n\
         - Do not assert correctness; everything is speculative.\n",
        version = PROMPT_VERSION,
        context = ctx.context_block(),
        statement = ctx.statement_block(),
        problem_id = ctx.problem_id,
        max_plans = config.max_plans,
    )
}

/// Append the (unverified) literature candidates block to a planner prompt.
pub fn planner_prompt_with_literature(
    prompt: &str,
    candidates: Option<&CandidatesFile>,
    config: &ScoutConfig,
) -> String {
    format!(
        "{}\n\nLiterature candidates (UNVERIFIED):\n{}\n",
        prompt.trim_end(),
        render_prompt_block(candidates, config.max_literature_in_prompt)
    )
}

/// Render the literature scout prompt.
pub fn literature_prompt(ctx: &PromptContext<'_>, config: &ScoutConfig) -> String {
    format!(
        "# Literature Scout Prompt (manual)\n\
         \nVersion: {version}\n\
         \nYou are assisting a literature scout for an Erdos problem. \
         Your task is to find candidate references in the mathematical literature. \
         Do NOT claim the problem is solved. Do NOT mark anything as verified. \
         Only output candidates with verifiable identifiers (DOI/arXiv/zbMATH/OpenAlex). \
         If you cannot find suitable candidates, return an empty list and include an error note.\n\
         \n{context}\
         \n{statement}\
         \nOutput format (STRICT): return exactly one JSON object in a single ```json``` block.\n\
         Do not include extra prose outside the JSON.\n\
         \nRequired JSON schema:\n\
         {{\n\
         \x20 \"problem_id\": \"{problem_id}\",\n\
         \x20 \"generated_at\": \"YYYY-MM-DD\",\n\
         \x20 \"solver_used_scout\": false,\n\
         \x20 \"queries\": [\n\
         \x20   {{\"query\": \"...\", \"notes\": \"...\"}}\n\
         \x20 ],\n\
         \x20 \"candidates\": [\n\
         \x20   {{\n\
         \x20     \"id\": \"10.1234/abcd\" | \"2101.01234\" | \"3138648\" | \"https://openalex.org/W...\",\n\
         \x20     \"id_type\": \"doi\" | \"arxiv\" | \"zbmath\" | \"openalex\",\n\
         \x20     \"title\": \"...\",\n\
         \x20     \"authors\": [\"...\"],\n\
         \x20     \"year\": \"YYYY\",\n\
         \x20     \"url\": \"https://...\",\n\
         \x20     \"confidence\": 0.0,\n\
         \x20     \"reasons\": [\"why this might be relevant\"],\n\
         \x20     \"status\": \"NEEDS_REVIEW\"\n\
         \x20   }}\n\
         \x20 ],\n\
         \x20 \"errors\": [\"... optional ...\"]\n\
         }}\n\
         \nRules:\n\
         - Include ONLY candidates with verifiable identifiers.\n\
         - Provide at least one explicit reason per candidate.\n\
         - Keep status = NEEDS_REVIEW.\n\
         - Max {max_candidates} candidates.\n",
        version = PROMPT_VERSION,
        context = ctx.context_block(),
        statement = ctx.statement_block(),
        problem_id = ctx.problem_id,
        max_candidates = config.max_candidates,
    )
}

/// Filesystem-safe label for a model name.
pub fn sanitize_label(model: &str) -> String {
    let label: String = model
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let label = label.trim_matches('_').to_string();
    // collapse runs of underscores left by punctuation
    let mut collapsed = String::with_capacity(label.len());
    for c in label.chars() {
        if c == '_' && collapsed.ends_with('_') {
            continue;
        }
        collapsed.push(c);
    }
    if collapsed.is_empty() {
        "model".to_string()
    } else {
        collapsed
    }
}

/// Write one prompt/response file pair per model under `base_dir`.
///
/// Existing files are left alone so pasted responses survive re-scaffolds.
pub fn write_model_prompts(
    base_dir: &Path,
    prompt_text: &str,
    response_extension: &str,
    models: &[String],
) -> Result<(), ScoutError> {
    fs::create_dir_all(base_dir)?;
    for model in models {
        let label = sanitize_label(model);
        let prompt_path = base_dir.join(format!("{}_prompt.md", label));
        let response_path = base_dir.join(format!("{}_response{}", label, response_extension));
        if !prompt_path.exists() {
            fs::write(
                &prompt_path,
                format!("# Model: {}\n\n{}\n", model, prompt_text.trim_end()),
            )?;
        }
        if !response_path.exists() {
            fs::write(&response_path, PLACEHOLDER_RESPONSE)?;
        }
    }
    Ok(())
}

/// Write the literature scout prompt and response placeholder into the
/// problem's `literature/` directory.
pub fn write_literature_prompt_files(
    literature_dir: &Path,
    prompt_text: &str,
) -> Result<(), ScoutError> {
    fs::create_dir_all(literature_dir)?;
    fs::write(
        literature_dir.join("scout_prompt.md"),
        format!("{}\n", prompt_text.trim_end()),
    )?;
    let response_path = literature_dir.join("scout_response.md");
    if !response_path.exists() {
        fs::write(&response_path, PLACEHOLDER_RESPONSE)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ctx<'a>() -> PromptContext<'a> {
        PromptContext {
            problem_id: "P0379",
            problem_number: 379,
            title: None,
            problem_url: "https://www.erdosproblems.com/379",
            forum_url: "https://www.erdosproblems.com/forum/thread/379",
            statement_text: "Is every sufficiently large integer a sum of distinct divisors?",
        }
    }

    #[test]
    fn test_planner_prompt_contract() {
        let prompt = planner_prompt(&ctx(), &ScoutConfig::default());
        assert!(prompt.contains("Version: v1"));
        assert!(prompt.contains("problem_id: P0379"));
        assert!(prompt.contains("Do NOT claim the problem is solved."));
        assert!(prompt.contains("Provide 3 to 8 plans."));
        assert!(prompt.contains("```json```"));
        assert!(prompt.contains("\"checkability\": \"easy | medium | hard\""));
    }

    #[test]
    fn test_planner_prompt_default_title() {
        let prompt = planner_prompt(&ctx(), &ScoutConfig::default());
        assert!(prompt.contains("title: Erdos Problem #379"));
    }

    #[test]
    fn test_literature_prompt_contract() {
        let prompt = literature_prompt(&ctx(), &ScoutConfig::default());
        assert!(prompt.contains("verifiable identifiers"));
        assert!(prompt.contains("Keep status = NEEDS_REVIEW."));
        assert!(prompt.contains("Max 20 candidates."));
    }

    #[test]
    fn test_prompt_with_literature_block() {
        let prompt = planner_prompt(&ctx(), &ScoutConfig::default());
        let with = planner_prompt_with_literature(&prompt, None, &ScoutConfig::default());
        assert!(with.contains("Literature candidates (UNVERIFIED):"));
        assert!(with.contains("missing candidates.json"));
    }

    #[test]
    fn test_empty_statement_placeholder() {
        let mut c = ctx();
        c.statement_text = "";
        let prompt = planner_prompt(&c, &ScoutConfig::default());
        assert!(prompt.contains("TBD (statement unavailable)."));
    }

    #[test]
    fn test_sanitize_label() {
        assert_eq!(sanitize_label("gpt-5.2-pro"), "gpt_5_2_pro");
        assert_eq!(sanitize_label("Gemini DeepThink"), "gemini_deepthink");
        assert_eq!(sanitize_label("***"), "model");
    }

    #[test]
    fn test_write_model_prompts_preserves_responses() {
        let dir = TempDir::new().unwrap();
        let models = vec!["gpt-5.2-pro".to_string()];
        write_model_prompts(dir.path(), "PROMPT", ".md", &models).unwrap();

        let response = dir.path().join("gpt_5_2_pro_response.md");
        std::fs::write(&response, "a pasted answer").unwrap();
        write_model_prompts(dir.path(), "PROMPT v2", ".md", &models).unwrap();

        assert_eq!(
            std::fs::read_to_string(&response).unwrap(),
            "a pasted answer"
        );
        // prompt also kept (first write wins)
        let prompt = std::fs::read_to_string(dir.path().join("gpt_5_2_pro_prompt.md")).unwrap();
        assert!(prompt.contains("PROMPT"));
        assert!(!prompt.contains("PROMPT v2"));
    }

    #[test]
    fn test_write_literature_prompt_files() {
        let dir = TempDir::new().unwrap();
        write_literature_prompt_files(dir.path(), "SCOUT PROMPT").unwrap();
        assert!(dir.path().join("scout_prompt.md").is_file());
        let placeholder =
            std::fs::read_to_string(dir.path().join("scout_response.md")).unwrap();
        assert_eq!(placeholder, PLACEHOLDER_RESPONSE);
    }
}
