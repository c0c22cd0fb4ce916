//! Scaffolding event log

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::clock::now_iso;
use crate::ScaffoldError;

/// Append a timestamped event line to `logs/solver.log`.
///
/// The log is an audit trail of scaffolding actions (runs created, audits
/// generated, plans ingested); it is never read back by the tooling.
pub fn log_event(root: &Path, message: &str) -> Result<(), ScaffoldError> {
    let logs_dir = root.join("logs");
    fs::create_dir_all(&logs_dir).map_err(|e| ScaffoldError::io(&logs_dir, e))?;
    let log_path = logs_dir.join("solver.log");
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| ScaffoldError::io(&log_path, e))?;
    writeln!(file, "[{}] {}", now_iso(), message).map_err(|e| ScaffoldError::io(&log_path, e))?;
    info!(event = message, "scaffold event");
    Ok(())
}
