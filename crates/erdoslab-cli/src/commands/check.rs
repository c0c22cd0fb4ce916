//! The `check` command: the CI policy gate.

use std::path::Path;

use erdoslab_policy::PolicyChecker;

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Run the repository policy checker and report violations.
///
/// Exit code is the gate: 0 when every check passes, 1 otherwise.
pub fn execute_check(root: &Path, config: &Config, formatter: &Formatter) -> Result<i32> {
    let checker = PolicyChecker::new(config.policy.to_policy_config());
    let report = checker.check_repo(root)?;
    println!("{}", formatter.format_report(&report)?);
    Ok(if report.passed() { 0 } else { 1 })
}
