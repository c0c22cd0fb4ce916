//! The active-problem slot (`problems/ACTIVE`)

use std::fs;
use std::path::Path;

use erdoslab_domain::ProblemId;

use crate::ScaffoldError;

/// How the active slot was populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveMethod {
    /// Relative symlink into `problems/`
    Symlink,
    /// Directory copy (platforms or filesystems without symlinks)
    Copy,
}

impl ActiveMethod {
    /// Human-readable label for status output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveMethod::Symlink => "symlink",
            ActiveMethod::Copy => "copy",
        }
    }
}

/// Whether `problems/ACTIVE` currently exists (including as a dangling
/// symlink, which still occupies the slot).
pub fn active_exists(root: &Path) -> bool {
    fs::symlink_metadata(root.join("problems/ACTIVE")).is_ok()
}

/// Point `problems/ACTIVE` at the given problem, replacing any previous
/// occupant.
///
/// Confirmation for replacing an existing slot is the caller's job; this
/// function only enforces that the target problem exists. Exactly-one-active
/// holds by construction: the slot is a single path.
pub fn set_active(root: &Path, id: &ProblemId) -> Result<ActiveMethod, ScaffoldError> {
    let problems_dir = root.join("problems");
    let source_dir = problems_dir.join(id.dir_name());
    if !source_dir.is_dir() {
        return Err(ScaffoldError::ProblemMissing(source_dir));
    }

    let active = problems_dir.join("ACTIVE");
    if fs::symlink_metadata(&active).is_ok() {
        remove_path(&active)?;
    }

    match symlink_dir(&id.dir_name(), &active) {
        Ok(()) => Ok(ActiveMethod::Symlink),
        Err(_) => {
            copy_dir(&source_dir, &active)?;
            Ok(ActiveMethod::Copy)
        }
    }
}

fn remove_path(path: &Path) -> Result<(), ScaffoldError> {
    let meta = fs::symlink_metadata(path).map_err(|e| ScaffoldError::io(path, e))?;
    if meta.file_type().is_symlink() || meta.is_file() {
        fs::remove_file(path).map_err(|e| ScaffoldError::io(path, e))
    } else {
        fs::remove_dir_all(path).map_err(|e| ScaffoldError::io(path, e))
    }
}

#[cfg(unix)]
fn symlink_dir(target: &str, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &str, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

fn copy_dir(from: &Path, to: &Path) -> Result<(), ScaffoldError> {
    fs::create_dir_all(to).map_err(|e| ScaffoldError::io(to, e))?;
    for entry in fs::read_dir(from).map_err(|e| ScaffoldError::io(from, e))? {
        let entry = entry.map_err(|e| ScaffoldError::io(from, e))?;
        let source = entry.path();
        let target = to.join(entry.file_name());
        if source.is_dir() {
            copy_dir(&source, &target)?;
        } else {
            fs::copy(&source, &target).map_err(|e| ScaffoldError::io(&source, e))?;
        }
    }
    Ok(())
}
