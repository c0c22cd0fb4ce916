//! The `audit` command: semantic audit checklist generation.

use std::path::Path;

use erdoslab_scaffold::audit::generate_audit;

use super::{parse_id, rel_display};
use crate::cli::AuditArgs;
use crate::error::Result;

/// Generate the semantic audit checklist for a problem.
pub fn execute_audit(args: &AuditArgs, root: &Path) -> Result<i32> {
    let id = parse_id(&args.id)?;
    let audit_path = generate_audit(root, &id, &args.run, args.lean_file.as_deref())?;
    println!("Wrote {}", rel_display(root, &audit_path));
    Ok(0)
}
