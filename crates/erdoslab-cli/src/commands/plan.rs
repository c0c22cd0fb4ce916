//! The `plan` command: planner response validation and ingestion.

use std::fs;
use std::path::{Path, PathBuf};

use erdoslab_domain::ProblemId;
use erdoslab_scaffold::log::log_event;
use erdoslab_scaffold::now_iso;
use erdoslab_scaffold::runs::resolve_run_dir;
use erdoslab_scout::extract_json_object;
use erdoslab_scout::plan::{ingest_plans, plan_score, validate_payload, write_best};

use super::{parse_id, rel_display, resolve_input_path};
use crate::cli::{PlanAction, PlanArgs};
use crate::config::Config;
use crate::error::{CliError, Result};

/// Dispatch `plan validate` / `plan ingest`.
pub fn execute_plan(args: &PlanArgs, root: &Path, config: &Config) -> Result<i32> {
    match &args.action {
        PlanAction::Validate {
            id,
            run,
            file,
            max_plans,
        } => validate(id, run, file.as_deref(), *max_plans, root, config),
        PlanAction::Ingest {
            id,
            run,
            file,
            source,
        } => ingest(id, run, file.as_deref(), source.as_deref(), root),
    }
}

/// Locate the planner response: an explicit override, or the run's
/// `planner_response.md`.
fn response_path(
    root: &Path,
    id: &ProblemId,
    run: &str,
    file: Option<&Path>,
) -> Result<(PathBuf, Option<PathBuf>)> {
    match file {
        Some(path) => Ok((resolve_input_path(root, path), None)),
        None => {
            let problem_dir = root.join("problems").join(id.dir_name());
            if !problem_dir.is_dir() {
                return Err(CliError::InvalidInput(format!(
                    "missing problem directory: {}",
                    rel_display(root, &problem_dir)
                )));
            }
            let run_dir = resolve_run_dir(&problem_dir, run)?;
            Ok((run_dir.join("planner_response.md"), Some(run_dir)))
        }
    }
}

fn read_response(root: &Path, path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|_| {
        CliError::InvalidInput(format!(
            "missing planner response at {}",
            rel_display(root, path)
        ))
    })
}

fn validate(
    raw_id: &str,
    run: &str,
    file: Option<&Path>,
    max_plans: Option<usize>,
    root: &Path,
    config: &Config,
) -> Result<i32> {
    let id = parse_id(raw_id)?;
    let (path, _) = response_path(root, &id, run, file)?;
    let response = read_response(root, &path)?;
    let payload = extract_json_object(&response)?;

    let errors = validate_payload(
        &payload,
        &id.dir_name(),
        max_plans.unwrap_or(config.scout.max_plans),
    );
    if errors.is_empty() {
        println!("OK: planner JSON validates.");
        Ok(0)
    } else {
        println!("ERROR: planner JSON failed validation.");
        for err in &errors {
            println!("  - {}", err);
        }
        Ok(1)
    }
}

fn ingest(
    raw_id: &str,
    run: &str,
    file: Option<&Path>,
    source: Option<&str>,
    root: &Path,
) -> Result<i32> {
    let id = parse_id(raw_id)?;
    let problem_dir = root.join("problems").join(id.dir_name());
    if !problem_dir.is_dir() {
        return Err(CliError::InvalidInput(format!(
            "missing problem directory: {}",
            rel_display(root, &problem_dir)
        )));
    }
    let (path, run_dir) = response_path(root, &id, run, file)?;
    let response = read_response(root, &path)?;
    let payload = extract_json_object(&response)?;

    let Some(raw_plans) = payload.get("plans").and_then(serde_json::Value::as_array) else {
        return Err(CliError::InvalidInput(
            "response JSON missing plans list".to_string(),
        ));
    };
    if raw_plans.is_empty() {
        return Err(CliError::InvalidInput(
            "response JSON missing plans list".to_string(),
        ));
    }

    let source = source
        .map(str::to_string)
        .unwrap_or_else(|| match path.file_name().and_then(|n| n.to_str()) {
            Some("planner_response.md") => "planner_manual".to_string(),
            _ => "manual_llm".to_string(),
        });

    // with a --file override the plans land next to the response
    let run_dir = run_dir.unwrap_or_else(|| {
        path.parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf())
    });
    let ingested_at = now_iso();
    let (plans, warnings) =
        ingest_plans(&run_dir.join("plans"), raw_plans, &source, &ingested_at)?;

    let best = &plans[0];
    write_best(
        &problem_dir.join("solver/best"),
        best,
        plan_score(best),
    )?;

    if !warnings.is_empty() {
        append_warnings(&run_dir.join("notes.md"), &warnings)?;
    }

    log_event(
        root,
        &format!(
            "ingested {} plans for {} into {}",
            plans.len(),
            id.dir_name(),
            run_dir.file_name().unwrap_or_default().to_string_lossy()
        ),
    )?;

    println!(
        "Ingested {} plans into {}.",
        plans.len(),
        rel_display(root, &run_dir)
    );
    if !warnings.is_empty() {
        println!("Warnings:");
        for warning in &warnings {
            println!("  - {}", warning);
        }
    }
    Ok(0)
}

fn append_warnings(notes_path: &Path, warnings: &[String]) -> Result<()> {
    let mut notes = fs::read_to_string(notes_path).unwrap_or_default();
    notes.push_str("\n## Ingest warnings\n");
    for warning in warnings {
        notes.push_str(&format!("- {}\n", warning));
    }
    fs::write(notes_path, notes.trim_start().to_string())?;
    Ok(())
}
