//! The `freeze` command: record an immutable statement snapshot.

use std::fs;
use std::path::Path;

use erdoslab_scaffold::freeze::{freeze_problem, FreezeOptions};

use super::{parse_id, rel_display, resolve_input_path};
use crate::cli::FreezeArgs;
use crate::error::Result;

/// Freeze a problem statement with source provenance.
pub fn execute_freeze(args: &FreezeArgs, root: &Path) -> Result<i32> {
    let id = parse_id(&args.id)?;

    let statement_path = resolve_input_path(root, &args.statement);
    let statement_text = fs::read_to_string(&statement_path)?;

    let snapshot_bytes = match &args.snapshot {
        Some(path) => Some(fs::read(resolve_input_path(root, path))?),
        None => None,
    };

    let options = FreezeOptions {
        statement_text: &statement_text,
        problem_url: args.url.as_deref(),
        snapshot_url: args.snapshot_url.as_deref(),
        snapshot: snapshot_bytes.as_deref(),
    };
    let frozen = freeze_problem(root, &id, &options)?;
    println!("Wrote {}", rel_display(root, &frozen));
    Ok(0)
}
