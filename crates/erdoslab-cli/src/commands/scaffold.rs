//! The `scaffold` command: solver run scaffolding.

use std::path::Path;

use erdoslab_scaffold::runs::scaffold_run;

use super::{parse_id, rel_display};
use crate::cli::ScaffoldArgs;
use crate::config::Config;
use crate::error::Result;

/// Create solver scaffolding and planner prompts for a problem.
pub fn execute_scaffold(args: &ScaffoldArgs, root: &Path, config: &Config) -> Result<i32> {
    let id = parse_id(&args.id)?;
    let scout_config = config.scout.clone().with_env_models();
    let run_dir = scaffold_run(
        root,
        &id,
        args.title.as_deref(),
        None,
        &scout_config,
        args.new_run,
    )?;
    println!("Solver scaffold ready: {}", rel_display(root, &run_dir));
    Ok(0)
}
