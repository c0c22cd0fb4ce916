//! The `ci` command: policy check, then the proof-assistant build.

use std::path::Path;
use std::process::Command;

use tracing::info;

use super::execute_check;
use crate::cli::CiArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// The single CI entry point: run the policy checker, then hand off to the
/// external proof-assistant build. Fail-fast: a failed check skips the
/// build entirely.
pub fn execute_ci(
    args: &CiArgs,
    root: &Path,
    config: &Config,
    formatter: &Formatter,
) -> Result<i32> {
    let check_code = execute_check(root, config, formatter)?;
    if check_code != 0 {
        return Ok(check_code);
    }

    if args.no_build {
        println!("All gates passed (build skipped).");
        return Ok(0);
    }

    let mut parts = args.build_cmd.split_whitespace();
    let Some(program) = parts.next() else {
        return Err(CliError::InvalidInput("empty build command".to_string()));
    };
    info!(command = %args.build_cmd, "running proof-assistant build");
    let status = Command::new(program)
        .args(parts)
        .current_dir(root)
        .status()
        .map_err(|e| CliError::BuildFailed(format!("{}: {}", args.build_cmd, e)))?;

    if !status.success() {
        return Err(CliError::BuildFailed(format!(
            "{} exited with {}",
            args.build_cmd, status
        )));
    }
    println!("All gates passed.");
    Ok(0)
}
