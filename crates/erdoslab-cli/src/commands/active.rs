//! The `active` command: manage the single active-problem slot.

use std::io::{self, BufRead, Write};
use std::path::Path;

use erdoslab_scaffold::{active_exists, set_active};

use super::parse_id;
use crate::cli::ActiveArgs;
use crate::error::{CliError, Result};

/// Point `problems/ACTIVE` at a problem, confirming replacement.
pub fn execute_active(args: &ActiveArgs, root: &Path) -> Result<i32> {
    let id = parse_id(&args.id)?;

    if !args.yes {
        let prompt = if active_exists(root) {
            format!("problems/ACTIVE exists. Replace it with {}? [y/N]: ", id)
        } else {
            format!("Set problems/ACTIVE to {}? [y/N]: ", id)
        };
        if !confirm(&prompt)? {
            return Err(CliError::Aborted);
        }
    }

    let method = set_active(root, &id)?;
    println!("ACTIVE set to {} via {}.", id, method.as_str());
    Ok(0)
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut reply = String::new();
    io::stdin().lock().read_line(&mut reply)?;
    let reply = reply.trim().to_lowercase();
    Ok(reply == "y" || reply == "yes")
}
