//! The `scout` command: literature prompts and response ingestion.

use std::fs;
use std::path::Path;

use erdoslab_domain::extract_statement;
use erdoslab_scaffold::log::log_event;
use erdoslab_scaffold::now_iso;
use erdoslab_scout::candidates::{ingest_response, write_outputs};
use erdoslab_scout::prompt::{literature_prompt, write_literature_prompt_files, PromptContext};

use super::{parse_id, rel_display, resolve_input_path};
use crate::cli::{ScoutAction, ScoutArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Dispatch `scout prompt` / `scout ingest`.
pub fn execute_scout(
    args: &ScoutArgs,
    root: &Path,
    config: &Config,
    formatter: &Formatter,
) -> Result<i32> {
    match &args.action {
        ScoutAction::Prompt { id } => prompt(id, root, config),
        ScoutAction::Ingest { id, file, model } => {
            ingest(id, file.as_deref(), model, root, config, formatter)
        }
    }
}

fn prompt(raw_id: &str, root: &Path, config: &Config) -> Result<i32> {
    let id = parse_id(raw_id)?;
    let problem_dir = root.join("problems").join(id.dir_name());
    if !problem_dir.is_dir() {
        return Err(CliError::InvalidInput(format!(
            "missing problem directory: {}",
            rel_display(root, &problem_dir)
        )));
    }

    let frozen = fs::read_to_string(problem_dir.join("statement/frozen_v1.md"))
        .unwrap_or_default();
    let statement_text = extract_statement(&frozen);
    let problem_id = id.dir_name();
    let problem_url = id.problem_url();
    let forum_url = id.forum_url();
    let ctx = PromptContext {
        problem_id: &problem_id,
        problem_number: id.number(),
        title: None,
        problem_url: &problem_url,
        forum_url: &forum_url,
        statement_text: &statement_text,
    };

    let literature_dir = problem_dir.join("literature");
    let prompt_text = literature_prompt(&ctx, &config.scout);
    write_literature_prompt_files(&literature_dir, &prompt_text)?;
    log_event(root, &format!("scout prompt written for {}", problem_id))?;
    println!(
        "Wrote {}",
        rel_display(root, &literature_dir.join("scout_prompt.md"))
    );
    println!("Paste the model output into literature/scout_response.md, then run:");
    println!("  erdoslab scout ingest {}", id);
    Ok(0)
}

fn ingest(
    raw_id: &str,
    file: Option<&Path>,
    model: &str,
    root: &Path,
    config: &Config,
    formatter: &Formatter,
) -> Result<i32> {
    let id = parse_id(raw_id)?;
    let problem_dir = root.join("problems").join(id.dir_name());
    let literature_dir = problem_dir.join("literature");

    let response_path = match file {
        Some(path) => resolve_input_path(root, path),
        None => literature_dir.join("scout_response.md"),
    };
    let response = fs::read_to_string(&response_path).map_err(|_| {
        CliError::InvalidInput(format!(
            "missing scout response at {}",
            rel_display(root, &response_path)
        ))
    })?;

    let ingested = ingest_response(
        &response,
        &id.dir_name(),
        model,
        &now_iso(),
        config.scout.max_candidates,
    )?;
    write_outputs(&literature_dir, &ingested)?;
    log_event(
        root,
        &format!(
            "ingested {} literature candidate(s) for {}",
            ingested.candidates.len(),
            id.dir_name()
        ),
    )?;

    println!("{}", formatter.format_candidates(&ingested)?);
    if !ingested.errors.is_empty() {
        println!("Warnings:");
        for err in &ingested.errors {
            println!("  - {}", err);
        }
    }
    Ok(0)
}
