//! Semantic audit checklist generation

use std::fs;
use std::path::{Path, PathBuf};

use erdoslab_domain::{extract_statement, ProblemId};
use regex::Regex;

use crate::clock::now_iso;
use crate::log::log_event;
use crate::runs::resolve_run_dir;
use crate::ScaffoldError;

const MAX_DECLARATIONS: usize = 20;

/// Generate `statement/semantic_audit.md` for a problem.
///
/// The checklist starts INCOMPLETE; a reviewer edits the status line by
/// hand once every item is confirmed. The Lean file to inspect is resolved
/// from, in order: an explicit override, `ErdosLab/Problems/<ID>.lean`, and
/// the run's `lean/formalizer_response.lean`.
pub fn generate_audit(
    root: &Path,
    id: &ProblemId,
    run: &str,
    lean_override: Option<&str>,
) -> Result<PathBuf, ScaffoldError> {
    let problem_dir = root.join("problems").join(id.dir_name());
    if !problem_dir.is_dir() {
        return Err(ScaffoldError::ProblemMissing(problem_dir));
    }

    let frozen_text = fs::read_to_string(problem_dir.join("statement/frozen_v1.md"))
        .unwrap_or_default();
    let statement_text = extract_statement(&frozen_text);

    let lean_file = resolve_lean_file(root, id, &problem_dir, run, lean_override);
    let declarations = lean_file
        .as_deref()
        .and_then(|path| fs::read_to_string(path).ok())
        .map(|text| extract_lean_declarations(&text))
        .unwrap_or_default();
    let lean_line = match &lean_file {
        Some(path) => path
            .strip_prefix(root)
            .unwrap_or(path)
            .display()
            .to_string(),
        None => "(none found)".to_string(),
    };

    let mut lines = vec![
        "# Semantic Audit Checklist".to_string(),
        String::new(),
        "Status: INCOMPLETE".to_string(),
        "Reviewer: TBD".to_string(),
        "Notes: TBD".to_string(),
        String::new(),
        format!("- problem_id: {}", id.dir_name()),
        format!("- generated_at: {}", now_iso()),
        format!("- lean_file: {}", lean_line),
        String::new(),
        "Frozen statement (excerpt):".to_string(),
        "```".to_string(),
        statement_text.trim().to_string(),
        "```".to_string(),
        String::new(),
        "Lean statement candidates:".to_string(),
    ];
    if declarations.is_empty() {
        lines.push("- (none found)".to_string());
    } else {
        for decl in declarations {
            lines.push(format!("- {}", decl));
        }
    }
    lines.extend(
        [
            "",
            "Checklist:",
            "- [ ] Quantifiers and domains match the frozen statement.",
            "- [ ] All hypotheses and side conditions are present.",
            "- [ ] Edge cases (n=0/1, empty sets, etc.) are handled.",
            "- [ ] Definitions align with the informal statement.",
            "- [ ] The Lean theorem is not a weaker/stronger variant.",
            "",
            "Reviewer notes:",
            "- ",
        ]
        .map(str::to_string),
    );

    let statement_dir = problem_dir.join("statement");
    fs::create_dir_all(&statement_dir).map_err(|e| ScaffoldError::io(&statement_dir, e))?;
    let audit_path = statement_dir.join("semantic_audit.md");
    fs::write(&audit_path, lines.join("\n").trim_end().to_string() + "\n")
        .map_err(|e| ScaffoldError::io(&audit_path, e))?;

    log_event(
        root,
        &format!("semantic audit generated for {}", id.dir_name()),
    )?;
    Ok(audit_path)
}

fn resolve_lean_file(
    root: &Path,
    id: &ProblemId,
    problem_dir: &Path,
    run: &str,
    lean_override: Option<&str>,
) -> Option<PathBuf> {
    if let Some(raw) = lean_override {
        let path = Path::new(raw);
        return Some(if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        });
    }
    let lean_path = root
        .join("ErdosLab/Problems")
        .join(format!("{}.lean", id.dir_name()));
    if lean_path.is_file() {
        return Some(lean_path);
    }
    let run_dir = resolve_run_dir(problem_dir, run).ok()?;
    let candidate = run_dir.join("lean/formalizer_response.lean");
    candidate.is_file().then_some(candidate)
}

/// Declaration headers a reviewer should compare against the statement.
fn extract_lean_declarations(text: &str) -> Vec<String> {
    let pattern = Regex::new(r"^(theorem|lemma|def|structure|class|abbrev)\s+")
        .expect("declaration pattern is valid");
    text.lines()
        .map(str::trim)
        .filter(|line| pattern.is_match(line))
        .map(str::to_string)
        .take(MAX_DECLARATIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed_problem(root: &Path) -> ProblemId {
        let dir = root.join("problems/P0379");
        fs::create_dir_all(dir.join("statement")).unwrap();
        fs::write(
            dir.join("statement/frozen_v1.md"),
            "## Statement\nDoes it hold?\n\n## Edge cases\n- None.\n",
        )
        .unwrap();
        ProblemId::parse("379").unwrap()
    }

    #[test]
    fn test_audit_without_lean_file() {
        let dir = TempDir::new().unwrap();
        let id = seed_problem(dir.path());
        let path = generate_audit(dir.path(), &id, "latest", None).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# Semantic Audit Checklist"));
        assert!(text.contains("Status: INCOMPLETE"));
        assert!(text.contains("- lean_file: (none found)"));
        assert!(text.contains("Does it hold?"));
        assert!(text.contains("- [ ] Quantifiers and domains match the frozen statement."));
    }

    #[test]
    fn test_audit_extracts_declarations() {
        let dir = TempDir::new().unwrap();
        let id = seed_problem(dir.path());
        fs::create_dir_all(dir.path().join("ErdosLab/Problems")).unwrap();
        fs::write(
            dir.path().join("ErdosLab/Problems/P0379.lean"),
            "import Mathlib\n\ndef chain (n : Nat) : Nat := n\n\ntheorem erdos_379 : True := trivial\n  -- theorem inside a proof comment\n",
        )
        .unwrap();
        let path = generate_audit(dir.path(), &id, "latest", None).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("- lean_file: ErdosLab/Problems/P0379.lean"));
        assert!(text.contains("- def chain (n : Nat) : Nat := n"));
        assert!(text.contains("- theorem erdos_379 : True := trivial"));
    }

    #[test]
    fn test_audit_with_override() {
        let dir = TempDir::new().unwrap();
        let id = seed_problem(dir.path());
        fs::write(dir.path().join("custom.lean"), "lemma aux : True := trivial\n").unwrap();
        let path = generate_audit(dir.path(), &id, "latest", Some("custom.lean")).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("- lean_file: custom.lean"));
        assert!(text.contains("- lemma aux : True := trivial"));
    }

    #[test]
    fn test_audit_missing_problem() {
        let dir = TempDir::new().unwrap();
        let id = ProblemId::parse("7").unwrap();
        assert!(matches!(
            generate_audit(dir.path(), &id, "latest", None).unwrap_err(),
            ScaffoldError::ProblemMissing(_)
        ));
    }

    #[test]
    fn test_declaration_limit() {
        let text = (0..40)
            .map(|i| format!("lemma l{} : True := trivial", i))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(extract_lean_declarations(&text).len(), MAX_DECLARATIONS);
    }
}
