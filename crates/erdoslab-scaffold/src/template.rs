//! Problem creation from the TEMPLATE directory

use std::fs;
use std::path::{Path, PathBuf};

use erdoslab_domain::{ProblemId, ProblemStatus};

use crate::ScaffoldError;

/// Create `problems/<ID>` by copying `problems/TEMPLATE` and rewriting
/// `status.json` for a fresh problem.
///
/// Refuses to overwrite an existing problem directory and never touches the
/// active slot. Template fields the tooling does not interpret survive the
/// rewrite.
pub fn create_problem(
    root: &Path,
    id: &ProblemId,
    title: Option<&str>,
) -> Result<PathBuf, ScaffoldError> {
    let problems_dir = root.join("problems");
    let template_dir = problems_dir.join("TEMPLATE");
    if !template_dir.is_dir() {
        return Err(ScaffoldError::TemplateMissing(template_dir));
    }

    let target_dir = problems_dir.join(id.dir_name());
    if target_dir.exists() {
        return Err(ScaffoldError::ProblemExists(target_dir));
    }

    copy_dir(&template_dir, &target_dir)?;

    let status_path = target_dir.join("status.json");
    let mut status = load_status(&status_path);
    status.problem_id = Some(id.dir_name());
    status.title = title.map(str::to_string);
    status.set_claim_state(erdoslab_domain::ClaimState::Partial);
    let frozen = status
        .frozen_statement
        .get_or_insert_with(Default::default);
    frozen.file = Some("statement/frozen_v1.md".to_string());
    if !status
        .evidence
        .as_ref()
        .is_some_and(serde_json::Value::is_array)
    {
        status.evidence = Some(serde_json::Value::Array(Vec::new()));
    }
    write_status(&status_path, &status)?;

    Ok(target_dir)
}

/// Read a problem's `status.json`, tolerating absence and corruption the
/// way the scaffolder should: start from an empty record.
pub fn load_status(status_path: &Path) -> ProblemStatus {
    fs::read_to_string(status_path)
        .ok()
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

/// Write a `status.json` record (pretty-printed, trailing newline).
pub fn write_status(status_path: &Path, status: &ProblemStatus) -> Result<(), ScaffoldError> {
    let json = serde_json::to_string_pretty(status)? + "\n";
    fs::write(status_path, json).map_err(|e| ScaffoldError::io(status_path, e))
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

#[cfg(test)]
mod tests {
    use super::*;
    use erdoslab_domain::ClaimState;
    use tempfile::TempDir;

    fn seed_template(root: &Path) {
        let template = root.join("problems/TEMPLATE");
        fs::create_dir_all(template.join("compute/experiments")).unwrap();
        fs::write(
            template.join("compute/experiments/small_cases.py"),
            "# stub\n",
        )
        .unwrap();
        fs::write(
            template.join("status.json"),
            r#"{"claim": {"state": "partial"}, "tags": ["template"]}"#,
        )
        .unwrap();
    }

    #[test]
    fn test_create_problem_copies_template() {
        let dir = TempDir::new().unwrap();
        seed_template(dir.path());
        let id = ProblemId::parse("379").unwrap();
        let created = create_problem(dir.path(), &id, Some("A title")).unwrap();

        assert!(created.ends_with("problems/P0379"));
        assert!(created.join("compute/experiments/small_cases.py").is_file());

        let status = load_status(&created.join("status.json"));
        assert_eq!(status.problem_id.as_deref(), Some("P0379"));
        assert_eq!(status.title.as_deref(), Some("A title"));
        assert_eq!(status.claim_state(), Some(ClaimState::Partial));
        // template extras survive
        assert!(status.extra.contains_key("tags"));
    }

    #[test]
    fn test_create_problem_refuses_existing() {
        let dir = TempDir::new().unwrap();
        seed_template(dir.path());
        let id = ProblemId::parse("379").unwrap();
        create_problem(dir.path(), &id, None).unwrap();
        let err = create_problem(dir.path(), &id, None).unwrap_err();
        assert!(matches!(err, ScaffoldError::ProblemExists(_)));
    }

    #[test]
    fn test_create_problem_without_template() {
        let dir = TempDir::new().unwrap();
        let id = ProblemId::parse("1").unwrap();
        let err = create_problem(dir.path(), &id, None).unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateMissing(_)));
    }

    #[test]
    fn test_template_without_status_json() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("problems/TEMPLATE")).unwrap();
        let id = ProblemId::parse("2").unwrap();
        let created = create_problem(dir.path(), &id, None).unwrap();
        let status = load_status(&created.join("status.json"));
        assert_eq!(status.problem_id.as_deref(), Some("P0002"));
        assert_eq!(status.claim_state(), Some(ClaimState::Partial));
    }
}
