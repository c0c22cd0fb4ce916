//! Command implementations.

mod active;
mod audit;
mod check;
mod ci;
mod freeze;
mod new;
mod plan;
mod scaffold;
mod scout;

pub use active::execute_active;
pub use audit::execute_audit;
pub use check::execute_check;
pub use ci::execute_ci;
pub use freeze::execute_freeze;
pub use new::execute_new;
pub use plan::execute_plan;
pub use scaffold::execute_scaffold;
pub use scout::execute_scout;

use std::path::{Path, PathBuf};

use erdoslab_domain::ProblemId;

use crate::error::{CliError, Result};

/// Parse a problem id argument, mapping failures to usage errors.
pub(crate) fn parse_id(raw: &str) -> Result<ProblemId> {
    ProblemId::parse(raw).map_err(CliError::InvalidInput)
}

/// Repo-relative rendering of a path for user-facing output.
pub(crate) fn rel_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

/// Resolve a user-provided path against the repo root unless absolute.
pub(crate) fn resolve_input_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
