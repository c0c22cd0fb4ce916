//! Repository policy validation

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use erdoslab_domain::{AuditStatus, ClaimState, Evidence, ProblemStatus};
use tracing::debug;
use walkdir::WalkDir;

use crate::{PolicyConfig, PolicyError, Violation};

/// Outcome of a repository check.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Number of problem directories inspected
    pub problems_checked: usize,

    /// All violations found, in deterministic order
    pub violations: Vec<Violation>,
}

impl CheckReport {
    /// Whether the gate passed.
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// One-line summary in the CI log format.
    pub fn summary(&self) -> String {
        format!(
            "Summary: {} problem(s) checked, {} violation(s).",
            self.problems_checked,
            self.violations.len()
        )
    }
}

/// The policy checker walks a repository tree and collects violations.
///
/// Checking is read-only and deterministic: problem directories are visited
/// in sorted order and re-running on an unchanged tree yields an identical
/// report.
pub struct PolicyChecker {
    config: PolicyConfig,
}

impl PolicyChecker {
    /// Create a checker with the given configuration.
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// Create a checker with the default configuration.
    pub fn default_config() -> Self {
        Self::new(PolicyConfig::default())
    }

    /// Check the repository rooted at `root`.
    ///
    /// A missing `problems/` directory is not a violation; the report just
    /// records zero problems checked.
    pub fn check_repo(&self, root: &Path) -> Result<CheckReport, PolicyError> {
        let root = root
            .canonicalize()
            .map_err(|_| PolicyError::BadRoot(root.to_path_buf()))?;
        if !root.is_dir() {
            return Err(PolicyError::BadRoot(root));
        }

        let mut violations = Vec::new();
        let mut problems_checked = 0;

        let problems_dir = root.join("problems");
        if problems_dir.is_dir() {
            for problem_dir in sorted_problem_dirs(&problems_dir)? {
                let status_path = problem_dir.join("status.json");
                if !status_path.is_file() {
                    continue;
                }
                problems_checked += 1;
                debug!(problem = %problem_dir.display(), "checking problem");
                self.validate_problem(&root, &problem_dir, &mut violations);
            }
            if self.config.validate_active {
                self.check_active(&problems_dir, &mut violations);
            }
        }

        if self.config.scan_gated_dir {
            self.scan_gated_dir(&root, &mut violations)?;
        }

        dedup_in_order(&mut violations);
        Ok(CheckReport {
            problems_checked,
            violations,
        })
    }

    fn validate_problem(&self, root: &Path, problem_dir: &Path, out: &mut Vec<Violation>) {
        let status_path = problem_dir.join("status.json");
        let rel_status = rel(root, &status_path);

        let raw = match fs::read_to_string(&status_path) {
            Ok(raw) => raw,
            Err(e) => {
                out.push(Violation::InvalidStatusJson {
                    file: rel_status,
                    detail: e.to_string(),
                });
                return;
            }
        };
        let status: ProblemStatus = match serde_json::from_str(&raw) {
            Ok(status) => status,
            Err(e) => {
                out.push(Violation::InvalidStatusJson {
                    file: rel_status,
                    detail: e.to_string(),
                });
                return;
            }
        };

        if status
            .problem_id
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .is_empty()
        {
            out.push(Violation::MissingField {
                file: rel_status.clone(),
                field: "problem_id".to_string(),
            });
        }

        let state = match status.claim.as_ref().and_then(|c| c.state.as_deref()) {
            None => {
                out.push(Violation::MissingField {
                    file: rel_status.clone(),
                    field: "claim.state".to_string(),
                });
                None
            }
            Some(raw_state) => match ClaimState::parse(raw_state) {
                Some(state) => Some(state),
                None => {
                    out.push(Violation::InvalidClaimState {
                        file: rel_status.clone(),
                        found: raw_state.to_string(),
                    });
                    None
                }
            },
        };

        if status
            .frozen_statement
            .as_ref()
            .and_then(|f| f.file.as_deref())
            .map(str::trim)
            .unwrap_or("")
            .is_empty()
        {
            out.push(Violation::MissingField {
                file: rel_status.clone(),
                field: "frozen_statement.file".to_string(),
            });
        }

        match state {
            Some(state) if state.is_proof_claim() => {
                self.validate_proof_claim(root, problem_dir, &status, &rel_status, out);
            }
            Some(ClaimState::LiteratureSolved) => {
                for required in ["literature/primary_sources.md", "literature/mapping.md"] {
                    let path = problem_dir.join(required);
                    if !path.is_file() {
                        out.push(Violation::MissingRequiredFile {
                            status_file: rel_status.clone(),
                            required: rel(root, &path),
                        });
                    }
                }
            }
            Some(ClaimState::Ambiguous) => {
                let path = problem_dir.join("statement/variants.md");
                if !path.is_file() {
                    out.push(Violation::MissingRequiredFile {
                        status_file: rel_status.clone(),
                        required: rel(root, &path),
                    });
                }
            }
            _ => {}
        }
    }

    fn validate_proof_claim(
        &self,
        root: &Path,
        problem_dir: &Path,
        status: &ProblemStatus,
        rel_status: &Path,
        out: &mut Vec<Violation>,
    ) {
        for required in ["statement/frozen_v1.md", "report/writeup.md"] {
            let path = problem_dir.join(required);
            if !path.is_file() {
                out.push(Violation::MissingRequiredFile {
                    status_file: rel_status.to_path_buf(),
                    required: rel(root, &path),
                });
            }
        }

        match status.evidence.as_ref().and_then(|v| v.as_array()) {
            None => out.push(Violation::EvidenceListRequired {
                file: rel_status.to_path_buf(),
            }),
            Some(items) => {
                let mut has_required = false;
                for (index, item) in items.iter().enumerate() {
                    match Evidence::from_value(item) {
                        Err(detail) => out.push(Violation::InvalidEvidenceEntry {
                            file: rel_status.to_path_buf(),
                            index,
                            detail,
                        }),
                        Ok(None) => {}
                        Ok(Some(evidence)) => {
                            if evidence.supports_proof_claim() {
                                has_required = true;
                            }
                            if let Evidence::Lean { file, theorem, .. } = &evidence {
                                self.validate_lean_evidence(
                                    root,
                                    problem_dir,
                                    rel_status,
                                    index,
                                    file.as_deref(),
                                    theorem.as_deref(),
                                    out,
                                );
                            }
                        }
                    }
                }
                if !has_required {
                    out.push(Violation::MissingProofEvidence {
                        file: rel_status.to_path_buf(),
                    });
                }
            }
        }

        if self.config.require_semantic_audit {
            let audit_path = problem_dir.join("statement/semantic_audit.md");
            match fs::read_to_string(&audit_path) {
                Err(_) => out.push(Violation::AuditMissing {
                    file: rel(root, &audit_path),
                }),
                Ok(text) => {
                    let audit = AuditStatus::parse_document(&text);
                    if !audit.accepts_proof_claim(self.config.allow_legacy_audit) {
                        out.push(Violation::AuditIncomplete {
                            file: rel(root, &audit_path),
                            status: audit,
                        });
                    }
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn validate_lean_evidence(
        &self,
        root: &Path,
        problem_dir: &Path,
        rel_status: &Path,
        index: usize,
        file: Option<&str>,
        theorem: Option<&str>,
        out: &mut Vec<Violation>,
    ) {
        let Some(file) = file.map(str::trim).filter(|f| !f.is_empty()) else {
            out.push(Violation::InvalidEvidenceEntry {
                file: rel_status.to_path_buf(),
                index,
                detail: "file is required for lean evidence".to_string(),
            });
            return;
        };
        let Some(theorem) = theorem.map(str::trim).filter(|t| !t.is_empty()) else {
            out.push(Violation::InvalidEvidenceEntry {
                file: rel_status.to_path_buf(),
                index,
                detail: "theorem is required for lean evidence".to_string(),
            });
            return;
        };

        let Some(resolved) = resolve_repo_path(root, problem_dir, file) else {
            out.push(Violation::EvidencePathInvalid {
                file: rel_status.to_path_buf(),
                index,
                path: file.to_string(),
            });
            return;
        };
        if !resolved.is_file() {
            out.push(Violation::EvidenceFileMissing {
                file: rel_status.to_path_buf(),
                index,
                path: file.to_string(),
            });
            return;
        }

        let rel_proof = rel(root, &resolved);
        match fs::read_to_string(&resolved) {
            Err(e) => out.push(Violation::InvalidEvidenceEntry {
                file: rel_status.to_path_buf(),
                index,
                detail: format!("file could not be read: {}", e),
            }),
            Ok(text) => {
                if !text.contains(theorem) {
                    out.push(Violation::TheoremNotMentioned {
                        file: rel_proof.clone(),
                        theorem: theorem.to_string(),
                    });
                }
                self.scan_proof_text(&rel_proof, &text, out);
            }
        }
    }

    fn check_active(&self, problems_dir: &Path, out: &mut Vec<Violation>) {
        let active = problems_dir.join("ACTIVE");
        let Ok(meta) = fs::symlink_metadata(&active) else {
            return; // no active problem is allowed
        };

        if meta.file_type().is_symlink() {
            let Ok(target) = fs::read_link(&active) else {
                out.push(Violation::ActiveInvalid {
                    detail: "unreadable symlink".to_string(),
                });
                return;
            };
            let resolved = normalize_lexical(&problems_dir.join(&target));
            if !resolved.starts_with(problems_dir) || resolved == *problems_dir {
                out.push(Violation::ActiveInvalid {
                    detail: format!("symlink escapes problems/: {}", target.display()),
                });
                return;
            }
            if !resolved.join("status.json").is_file() {
                out.push(Violation::ActiveInvalid {
                    detail: format!(
                        "does not resolve to a problem directory: {}",
                        target.display()
                    ),
                });
            }
        } else if meta.is_dir() {
            // copy fallback on platforms without symlinks
            if !active.join("status.json").is_file() {
                out.push(Violation::ActiveInvalid {
                    detail: "active directory has no status.json".to_string(),
                });
            }
        } else {
            out.push(Violation::ActiveInvalid {
                detail: "must be a symlink or directory".to_string(),
            });
        }
    }

    fn scan_gated_dir(&self, root: &Path, out: &mut Vec<Violation>) -> Result<(), PolicyError> {
        let gated = root.join(&self.config.gated_dir);
        if !gated.is_dir() {
            return Ok(());
        }
        for entry in WalkDir::new(&gated)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
        {
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().and_then(|e| e.to_str()) != Some("lean") {
                continue;
            }
            let text = fs::read_to_string(entry.path())
                .map_err(|e| PolicyError::io(entry.path(), e))?;
            self.scan_proof_text(&rel(root, entry.path()), &text, out);
        }
        Ok(())
    }

    /// Scan proof text for placeholder tokens and escape hatches.
    ///
    /// Comments and string literals are blanked out first so prose like
    /// `-- no longer sorry` does not trip the gate.
    fn scan_proof_text(&self, rel_file: &Path, text: &str, out: &mut Vec<Violation>) {
        let stripped = strip_lean_comments(text);
        for (i, line) in stripped.lines().enumerate() {
            for token in &self.config.placeholder_tokens {
                if contains_word(line, token) {
                    out.push(Violation::PlaceholderToken {
                        file: rel_file.to_path_buf(),
                        line: i + 1,
                        token: token.clone(),
                    });
                }
            }
            if self.config.forbid_escape_hatches {
                let trimmed = line.trim_start();
                if trimmed == "axiom" || trimmed.starts_with("axiom ") {
                    out.push(Violation::EscapeHatch {
                        file: rel_file.to_path_buf(),
                        line: i + 1,
                    });
                }
            }
        }
    }
}

/// Problem directories under `problems/`, sorted by name.
///
/// `TEMPLATE` is the scaffolding source and `ACTIVE` aliases another
/// problem; both are excluded from per-problem validation.
fn sorted_problem_dirs(problems_dir: &Path) -> Result<Vec<PathBuf>, PolicyError> {
    let mut dirs = Vec::new();
    let entries = fs::read_dir(problems_dir).map_err(|e| PolicyError::io(problems_dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| PolicyError::io(problems_dir, e))?;
        let name = entry.file_name();
        if name == "TEMPLATE" || name == "ACTIVE" {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Repo-relative view of a path (falls back to the path itself).
fn rel(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

/// Resolve an evidence path against the repo root, then the problem
/// directory, rejecting anything that lexically escapes the root.
fn resolve_repo_path(root: &Path, base_dir: &Path, raw: &str) -> Option<PathBuf> {
    let path = Path::new(raw);
    let candidates: Vec<PathBuf> = if path.is_absolute() {
        vec![path.to_path_buf()]
    } else {
        vec![root.join(path), base_dir.join(path)]
    };
    for candidate in candidates {
        let normalized = normalize_lexical(&candidate);
        if normalized.starts_with(root) {
            return Some(normalized);
        }
    }
    None
}

/// Normalize `.` and `..` components without touching the filesystem.
fn normalize_lexical(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Blank out Lean comments (`--` line, nested `/- -/` block) and string
/// literals, preserving line structure so reported line numbers match the
/// source file.
fn strip_lean_comments(text: &str) -> String {
    #[derive(PartialEq)]
    enum State {
        Code,
        Str,
        LineComment,
        BlockComment(u32),
    }

    let mut state = State::Code;
    let mut out = String::with_capacity(text.len());
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        match state {
            State::Code => match (c, next) {
                ('-', Some('-')) => {
                    state = State::LineComment;
                    out.push_str("  ");
                    i += 2;
                }
                ('/', Some('-')) => {
                    state = State::BlockComment(1);
                    out.push_str("  ");
                    i += 2;
                }
                ('"', _) => {
                    state = State::Str;
                    out.push(' ');
                    i += 1;
                }
                _ => {
                    out.push(c);
                    i += 1;
                }
            },
            State::Str => match (c, next) {
                ('\\', Some(escaped)) => {
                    out.push(' ');
                    out.push(if escaped == '\n' { '\n' } else { ' ' });
                    i += 2;
                }
                ('"', _) => {
                    state = State::Code;
                    out.push(' ');
                    i += 1;
                }
                _ => {
                    out.push(if c == '\n' { '\n' } else { ' ' });
                    i += 1;
                }
            },
            State::LineComment => {
                if c == '\n' {
                    state = State::Code;
                    out.push('\n');
                } else {
                    out.push(' ');
                }
                i += 1;
            }
            State::BlockComment(depth) => match (c, next) {
                ('/', Some('-')) => {
                    state = State::BlockComment(depth + 1);
                    out.push_str("  ");
                    i += 2;
                }
                ('-', Some('/')) => {
                    state = if depth == 1 {
                        State::Code
                    } else {
                        State::BlockComment(depth - 1)
                    };
                    out.push_str("  ");
                    i += 2;
                }
                _ => {
                    out.push(if c == '\n' { '\n' } else { ' ' });
                    i += 1;
                }
            },
        }
    }
    out
}

/// Whole-word occurrence check (identifier boundaries on both sides).
fn contains_word(line: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    let is_ident = |c: char| c.is_alphanumeric() || c == '_';
    let mut start = 0;
    while let Some(pos) = line[start..].find(word) {
        let begin = start + pos;
        let end = begin + word.len();
        let before_ok = line[..begin].chars().next_back().map_or(true, |c| !is_ident(c));
        let after_ok = line[end..].chars().next().map_or(true, |c| !is_ident(c));
        if before_ok && after_ok {
            return true;
        }
        start = end;
    }
    false
}

/// Drop exact duplicate violations (a proof file named as evidence and also
/// living under the gated directory is scanned twice), keeping first-seen
/// order.
fn dedup_in_order(violations: &mut Vec<Violation>) {
    let mut seen = HashSet::new();
    violations.retain(|v| seen.insert(v.to_string()));
}
