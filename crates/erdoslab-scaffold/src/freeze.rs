//! Frozen statement and report skeletons

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use erdoslab_domain::ProblemId;
use sha2::{Digest, Sha256};

use crate::log::log_event;
use crate::ScaffoldError;

/// Inputs for freezing a problem statement.
#[derive(Debug, Clone, Default)]
pub struct FreezeOptions<'a> {
    /// The statement text to freeze (already extracted from its source)
    pub statement_text: &'a str,

    /// Source page URL override
    pub problem_url: Option<&'a str>,

    /// Snapshot URL the hash belongs to
    pub snapshot_url: Option<&'a str>,

    /// Raw bytes of the fetched snapshot, hashed for provenance
    pub snapshot: Option<&'a [u8]>,
}

/// Freeze a problem statement and seed the report skeletons.
///
/// Writes `statement/frozen_v1.md` with source provenance (URL, access
/// date, snapshot SHA-256) and refuses to overwrite an existing frozen
/// statement: frozen means frozen. `report/writeup.md`,
/// `literature/primary_sources.md`, `literature/mapping.md`, and
/// `blueprint.md` are created only when absent.
pub fn freeze_problem(
    root: &Path,
    id: &ProblemId,
    options: &FreezeOptions<'_>,
) -> Result<PathBuf, ScaffoldError> {
    let problem_dir = root.join("problems").join(id.dir_name());
    if !problem_dir.is_dir() {
        return Err(ScaffoldError::ProblemMissing(problem_dir));
    }

    let frozen_path = problem_dir.join("statement/frozen_v1.md");
    if frozen_path.exists() {
        return Err(ScaffoldError::FrozenExists(frozen_path));
    }

    let accessed = Utc::now().format("%Y-%m-%d").to_string();
    let problem_url = options
        .problem_url
        .map(str::to_string)
        .unwrap_or_else(|| id.problem_url());
    let snapshot_hash = options.snapshot.map(sha256_hex);

    let statement_dir = problem_dir.join("statement");
    fs::create_dir_all(&statement_dir).map_err(|e| ScaffoldError::io(&statement_dir, e))?;
    fs::write(
        &frozen_path,
        render_frozen_statement(
            id.number(),
            &problem_url,
            options.snapshot_url,
            &accessed,
            options.statement_text,
            snapshot_hash.as_deref(),
        ),
    )
    .map_err(|e| ScaffoldError::io(&frozen_path, e))?;

    let forum_url = id.forum_url();
    seed_file(
        &problem_dir.join("report/writeup.md"),
        &render_writeup(&problem_url, &forum_url, &accessed),
    )?;
    seed_file(
        &problem_dir.join("literature/primary_sources.md"),
        &render_primary_sources(&problem_url, &forum_url, &accessed),
    )?;
    seed_file(
        &problem_dir.join("literature/mapping.md"),
        render_mapping(),
    )?;
    seed_file(&problem_dir.join("blueprint.md"), render_blueprint())?;

    log_event(root, &format!("froze statement for {}", id.dir_name()))?;
    Ok(frozen_path)
}

fn seed_file(path: &Path, contents: &str) -> Result<(), ScaffoldError> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ScaffoldError::io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| ScaffoldError::io(path, e))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

fn render_frozen_statement(
    number: u64,
    problem_url: &str,
    snapshot_url: Option<&str>,
    accessed: &str,
    statement_text: &str,
    snapshot_hash: Option<&str>,
) -> String {
    let hash_line = match (snapshot_url, snapshot_hash) {
        (Some(url), Some(hash)) => format!("- latex snapshot: {} (sha256: {})", url, hash),
        (Some(url), None) => format!("- latex snapshot: {} (sha256: unavailable)", url),
        (None, _) => "- latex snapshot: unavailable".to_string(),
    };
    let statement = if statement_text.trim().is_empty() {
        "TBD (fetch the statement from the source URL)."
    } else {
        statement_text.trim()
    };
    format!(
        "# Erdos Problem #{number} (frozen_v1)\n\
         \n\
         ## Source\n\
         - {problem_url} (accessed {accessed})\n\
         {hash_line}\n\
         \n\
         ## Definitions\n\
         - None.\n\
         \n\
         ## Statement\n\
         {statement}\n\
         \n\
         ## Edge cases\n\
         - None.\n"
    )
}

fn render_writeup(problem_url: &str, forum_url: &str, accessed: &str) -> String {
    let mut lines = vec!["# Writeup".to_string(), String::new()];
    lines.push("Summary (10-20 lines):".to_string());
    for i in 1..=10 {
        lines.push(format!("- TODO (line {})", i));
    }
    lines.extend([
        String::new(),
        "Sources:".to_string(),
        format!("- Problem page: {} (accessed {})", problem_url, accessed),
        format!("- Forum thread: {}", forum_url),
        "- Paper reference: UNVERIFIED".to_string(),
        String::new(),
        "Evidence status:".to_string(),
        "- pending (no local Lean proof yet).".to_string(),
    ]);
    lines.join("\n") + "\n"
}

fn render_primary_sources(problem_url: &str, forum_url: &str, accessed: &str) -> String {
    format!(
        "# Primary Sources\n\
         \n\
         - Problem page: {} (accessed {}).\n\
         - Forum thread: {}.\n\
         - Paper reference: UNVERIFIED.\n",
        problem_url, accessed, forum_url
    )
}

fn render_mapping() -> &'static str {
    "# Literature Mapping\n\n- TODO: map primary sources to proof steps.\n"
}

fn render_blueprint() -> &'static str {
    "# Blueprint\n\
     \n\
     ## Goal theorem\n\
     - See frozen statement.\n\
     \n\
     ## Lemmas (expected)\n\
     1) TODO\n\
     2) TODO\n\
     3) TODO\n\
     \n\
     ## Notes\n\
     - TODO\n"
}
