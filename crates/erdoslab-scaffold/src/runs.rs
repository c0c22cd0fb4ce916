//! Solver run scaffolding

use std::fs;
use std::path::{Path, PathBuf};

use erdoslab_domain::{extract_statement, ProblemId};
use erdoslab_scout::prompt::{
    planner_prompt, planner_prompt_with_literature, write_model_prompts, PromptContext,
    PLACEHOLDER_RESPONSE,
};
use erdoslab_scout::{keywords, CandidatesFile, ScoutConfig};
use serde_json::json;

use crate::clock::{now_iso, run_id_now};
use crate::log::log_event;
use crate::template::load_status;
use crate::ScaffoldError;

const PLACEHOLDER_NOTES: &str = "# Notes\n\n";

fn default_checklist() -> &'static str {
    "# Verification Checklist\n\
     \n\
     - [ ] Statement matches frozen_v1.\n\
     - [ ] No unverified claims labeled as solved.\n\
     - [ ] Experiments are reproducible.\n\
     - [ ] Lean attempts compile or are clearly marked as WIP.\n"
}

/// The run id recorded in `runs/latest.json`, if any.
pub fn resolve_latest_run(runs_dir: &Path) -> Option<String> {
    let raw = fs::read_to_string(runs_dir.join("latest.json")).ok()?;
    let payload: serde_json::Value = serde_json::from_str(&raw).ok()?;
    payload
        .get("run_id")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

/// Resolve a run directory, where `latest` means the recorded latest run.
pub fn resolve_run_dir(problem_dir: &Path, run_id: &str) -> Result<PathBuf, ScaffoldError> {
    let runs_dir = problem_dir.join("solver/runs");
    let run_id = if run_id == "latest" {
        resolve_latest_run(&runs_dir)
            .ok_or_else(|| ScaffoldError::RunMissing("latest run not found".to_string()))?
    } else {
        run_id.to_string()
    };
    let run_dir = runs_dir.join(&run_id);
    if !run_dir.is_dir() {
        return Err(ScaffoldError::RunMissing(format!(
            "run directory not found: {}",
            run_dir.display()
        )));
    }
    Ok(run_dir)
}

/// Whether a run has been used (a response pasted or plans ingested).
pub fn run_used(run_dir: &Path) -> bool {
    if let Ok(content) = fs::read_to_string(run_dir.join("planner_response.md")) {
        let trimmed = content.trim();
        if !trimmed.is_empty() && !trimmed.starts_with(PLACEHOLDER_RESPONSE.trim()) {
            return true;
        }
    }
    let plans_dir = run_dir.join("plans");
    plans_dir.is_dir()
        && fs::read_dir(&plans_dir)
            .map(|mut entries| {
                entries.any(|e| {
                    e.map(|e| e.path().extension().is_some_and(|ext| ext == "json"))
                        .unwrap_or(false)
                })
            })
            .unwrap_or(false)
}

fn write_latest(runs_dir: &Path, run_id: &str) -> Result<(), ScaffoldError> {
    let payload = json!({"run_id": run_id, "updated_at": now_iso()});
    let path = runs_dir.join("latest.json");
    fs::write(&path, serde_json::to_string_pretty(&payload)? + "\n")
        .map_err(|e| ScaffoldError::io(&path, e))
}

/// Seed `solver/best/` with empty plan, summary, and next-actions files.
///
/// Existing files are kept; plan ingestion overwrites them with real
/// content later.
pub fn ensure_best_dir(problem_dir: &Path) -> Result<(), ScaffoldError> {
    let best_dir = problem_dir.join("solver/best");
    fs::create_dir_all(&best_dir).map_err(|e| ScaffoldError::io(&best_dir, e))?;

    let plan_path = best_dir.join("plan.json");
    if !plan_path.exists() {
        fs::write(&plan_path, "{\n  \"status\": \"empty\"\n}\n")
            .map_err(|e| ScaffoldError::io(&plan_path, e))?;
    }
    let summary_path = best_dir.join("summary.md");
    if !summary_path.exists() {
        fs::write(&summary_path, "# Solver Summary\n\nNo verified plan yet.\n")
            .map_err(|e| ScaffoldError::io(&summary_path, e))?;
    }
    let next_path = best_dir.join("next_actions.md");
    if !next_path.exists() {
        fs::write(&next_path, "# Next Actions\n\n- TODO: select a plan.\n")
            .map_err(|e| ScaffoldError::io(&next_path, e))?;
    }
    Ok(())
}

/// Ensure a run directory exists and is seeded with placeholders.
///
/// An unused latest run is reused instead of piling up empty directories;
/// `force_new` always creates a fresh one.
pub fn ensure_run(
    root: &Path,
    problem_dir: &Path,
    force_new: bool,
) -> Result<PathBuf, ScaffoldError> {
    let runs_dir = problem_dir.join("solver/runs");
    fs::create_dir_all(&runs_dir).map_err(|e| ScaffoldError::io(&runs_dir, e))?;

    if !force_new {
        if let Some(latest_id) = resolve_latest_run(&runs_dir) {
            let candidate = runs_dir.join(&latest_id);
            if candidate.is_dir() && !run_used(&candidate) {
                log_event(
                    root,
                    &format!(
                        "reuse run {} for {}",
                        latest_id,
                        problem_dir.file_name().unwrap_or_default().to_string_lossy()
                    ),
                )?;
                return Ok(candidate);
            }
        }
    }

    // timestamp ids collide at second granularity; suffix until free
    let mut run_id = run_id_now();
    let mut attempt = 1;
    while runs_dir.join(&run_id).exists() {
        attempt += 1;
        run_id = format!("{}-{}", run_id_now(), attempt);
    }
    let run_dir = runs_dir.join(&run_id);
    for sub in ["plans", "experiments", "lean", "verification"] {
        let dir = run_dir.join(sub);
        fs::create_dir_all(&dir).map_err(|e| ScaffoldError::io(&dir, e))?;
    }
    seed_file(&run_dir.join("planner_response.md"), PLACEHOLDER_RESPONSE)?;
    seed_file(&run_dir.join("notes.md"), PLACEHOLDER_NOTES)?;
    seed_file(
        &run_dir.join("verification/checklist.md"),
        default_checklist(),
    )?;
    write_latest(&runs_dir, &run_id)?;
    log_event(
        root,
        &format!(
            "created run {} for {}",
            run_id,
            problem_dir.file_name().unwrap_or_default().to_string_lossy()
        ),
    )?;
    Ok(run_dir)
}

fn seed_file(path: &Path, contents: &str) -> Result<(), ScaffoldError> {
    if !path.exists() {
        fs::write(path, contents).map_err(|e| ScaffoldError::io(path, e))?;
    }
    Ok(())
}

/// Create the full solver scaffolding for a problem: best/ seeding, a run
/// directory, the input bundle, and the planner prompts (with and without
/// the literature block, plus per-model prompt files).
pub fn scaffold_run(
    root: &Path,
    id: &ProblemId,
    title: Option<&str>,
    statement_override: Option<&str>,
    config: &ScoutConfig,
    force_new: bool,
) -> Result<PathBuf, ScaffoldError> {
    let problem_dir = root.join("problems").join(id.dir_name());
    if !problem_dir.is_dir() {
        return Err(ScaffoldError::ProblemMissing(problem_dir));
    }

    ensure_best_dir(&problem_dir)?;
    let run_dir = ensure_run(root, &problem_dir, force_new)?;

    let statement_text = match statement_override {
        Some(text) => text.to_string(),
        None => {
            let frozen = fs::read_to_string(problem_dir.join("statement/frozen_v1.md"))
                .unwrap_or_default();
            extract_statement(&frozen)
        }
    };

    let problem_id = id.dir_name();
    let problem_url = id.problem_url();
    let forum_url = id.forum_url();
    let ctx = PromptContext {
        problem_id: &problem_id,
        problem_number: id.number(),
        title,
        problem_url: &problem_url,
        forum_url: &forum_url,
        statement_text: &statement_text,
    };

    let status = load_status(&problem_dir.join("status.json"));
    let literature_path = problem_dir.join("literature/candidates.json");
    let bundle = json!({
        "problem_id": id.dir_name(),
        "title": title,
        "generated_at": now_iso(),
        "problem_url": problem_url,
        "forum_url": forum_url,
        "statement_text": statement_text,
        "keywords": keywords::extract_keywords(&statement_text, 10),
        "literature_candidates_path": literature_path.to_string_lossy(),
        "claim_state": status.claim.as_ref().and_then(|c| c.state.clone()),
        "evidence": status.evidence.clone().unwrap_or(json!([])),
        "notes": "Do not treat candidates as verified.",
    });
    let bundle_path = run_dir.join("input_bundle.json");
    fs::write(&bundle_path, serde_json::to_string_pretty(&bundle)? + "\n")
        .map_err(|e| ScaffoldError::io(&bundle_path, e))?;

    let prompt = planner_prompt(&ctx, config);
    let prompt_path = run_dir.join("planner_prompt.md");
    fs::write(&prompt_path, format!("{}\n", prompt.trim_end()))
        .map_err(|e| ScaffoldError::io(&prompt_path, e))?;

    let candidates = CandidatesFile::load(&literature_path);
    let prompt_with_lit = planner_prompt_with_literature(&prompt, candidates.as_ref(), config);
    let with_lit_path = run_dir.join("planner_prompt_with_literature.md");
    fs::write(&with_lit_path, &prompt_with_lit)
        .map_err(|e| ScaffoldError::io(&with_lit_path, e))?;

    write_model_prompts(
        &run_dir.join("llm/planner"),
        &prompt_with_lit,
        ".md",
        &config.models,
    )?;

    Ok(run_dir)
}
