//! The `new` command: create a problem from the template.

use std::path::Path;

use erdoslab_scaffold::template::create_problem;

use super::{parse_id, rel_display};
use crate::cli::NewArgs;
use crate::error::Result;

/// Create `problems/<ID>` from `problems/TEMPLATE`.
pub fn execute_new(args: &NewArgs, root: &Path) -> Result<i32> {
    let id = parse_id(&args.id)?;
    let created = create_problem(root, &id, args.title.as_deref())?;
    println!("Created {}", rel_display(root, &created));
    println!("ACTIVE was not modified.");
    println!("To set ACTIVE, review the folder and run:");
    println!("  erdoslab active {}", id);
    Ok(0)
}
