//! Violation types reported by the policy checker

use std::fmt;
use std::path::PathBuf;

use erdoslab_domain::AuditStatus;

/// A single policy violation.
///
/// Paths are repo-relative so reports are stable across checkouts; line
/// numbers are 1-based where a specific line is known.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// `status.json` could not be parsed
    InvalidStatusJson {
        /// The status file
        file: PathBuf,
        /// Parser diagnostic
        detail: String,
    },

    /// A required `status.json` field is missing or empty
    MissingField {
        /// The status file
        file: PathBuf,
        /// Dotted field path (e.g. `claim.state`)
        field: String,
    },

    /// `claim.state` is not one of the allowed states
    InvalidClaimState {
        /// The status file
        file: PathBuf,
        /// The unrecognized value
        found: String,
    },

    /// A file the claimed state requires does not exist
    MissingRequiredFile {
        /// The status file making the claim
        status_file: PathBuf,
        /// The missing file
        required: PathBuf,
    },

    /// The evidence field is missing or not a list
    EvidenceListRequired {
        /// The status file
        file: PathBuf,
    },

    /// An evidence entry is structurally invalid
    InvalidEvidenceEntry {
        /// The status file
        file: PathBuf,
        /// Index into the evidence list
        index: usize,
        /// What is wrong with the entry
        detail: String,
    },

    /// No lean/certificate evidence backs a solved/disproved claim
    MissingProofEvidence {
        /// The status file
        file: PathBuf,
    },

    /// A lean evidence path escapes the repository or cannot be resolved
    EvidencePathInvalid {
        /// The status file
        file: PathBuf,
        /// Index into the evidence list
        index: usize,
        /// The offending path as written
        path: String,
    },

    /// A lean evidence file does not exist
    EvidenceFileMissing {
        /// The status file
        file: PathBuf,
        /// Index into the evidence list
        index: usize,
        /// The missing file as written
        path: String,
    },

    /// A lean evidence file does not mention its theorem
    TheoremNotMentioned {
        /// The proof file
        file: PathBuf,
        /// The theorem name that should appear
        theorem: String,
    },

    /// An unproven-placeholder token appears in gated proof code
    PlaceholderToken {
        /// The proof file
        file: PathBuf,
        /// 1-based line number
        line: usize,
        /// The matched token
        token: String,
    },

    /// A top-level `axiom` declaration appears in gated proof code
    EscapeHatch {
        /// The proof file
        file: PathBuf,
        /// 1-based line number
        line: usize,
    },

    /// The semantic audit file is missing for a solved/disproved claim
    AuditMissing {
        /// The expected audit file
        file: PathBuf,
    },

    /// The semantic audit is present but does not clear the claim
    AuditIncomplete {
        /// The audit file
        file: PathBuf,
        /// The status found in the file
        status: AuditStatus,
    },

    /// The active-problem slot is invalid
    ActiveInvalid {
        /// What is wrong with `problems/ACTIVE`
        detail: String,
    },
}

impl Violation {
    /// The repo-relative file this violation points at, when it has one.
    pub fn file(&self) -> Option<&PathBuf> {
        match self {
            Violation::InvalidStatusJson { file, .. }
            | Violation::MissingField { file, .. }
            | Violation::InvalidClaimState { file, .. }
            | Violation::EvidenceListRequired { file }
            | Violation::InvalidEvidenceEntry { file, .. }
            | Violation::MissingProofEvidence { file }
            | Violation::EvidencePathInvalid { file, .. }
            | Violation::EvidenceFileMissing { file, .. }
            | Violation::TheoremNotMentioned { file, .. }
            | Violation::PlaceholderToken { file, .. }
            | Violation::EscapeHatch { file, .. }
            | Violation::AuditMissing { file }
            | Violation::AuditIncomplete { file, .. } => Some(file),
            Violation::MissingRequiredFile { status_file, .. } => Some(status_file),
            Violation::ActiveInvalid { .. } => None,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::InvalidStatusJson { file, detail } => {
                write!(f, "{}: invalid JSON: {}", file.display(), detail)
            }
            Violation::MissingField { file, field } => {
                write!(f, "{}: {} is required", file.display(), field)
            }
            Violation::InvalidClaimState { file, found } => write!(
                f,
                "{}: claim.state {:?} is not an allowed state",
                file.display(),
                found
            ),
            Violation::MissingRequiredFile {
                status_file,
                required,
            } => write!(
                f,
                "{}: missing required file: {}",
                status_file.display(),
                required.display()
            ),
            Violation::EvidenceListRequired { file } => write!(
                f,
                "{}: evidence list is required for solved/disproved",
                file.display()
            ),
            Violation::InvalidEvidenceEntry {
                file,
                index,
                detail,
            } => write!(
                f,
                "{}: evidence[{}] {}",
                file.display(),
                index,
                detail
            ),
            Violation::MissingProofEvidence { file } => write!(
                f,
                "{}: evidence must include type lean or certificate",
                file.display()
            ),
            Violation::EvidencePathInvalid { file, index, path } => write!(
                f,
                "{}: evidence[{}].file path is invalid: {}",
                file.display(),
                index,
                path
            ),
            Violation::EvidenceFileMissing { file, index, path } => write!(
                f,
                "{}: evidence[{}].file does not exist: {}",
                file.display(),
                index,
                path
            ),
            Violation::TheoremNotMentioned { file, theorem } => write!(
                f,
                "{}: does not mention theorem name: {}",
                file.display(),
                theorem
            ),
            Violation::PlaceholderToken { file, line, token } => write!(
                f,
                "{}:{}: unproven placeholder {:?}",
                file.display(),
                line,
                token
            ),
            Violation::EscapeHatch { file, line } => write!(
                f,
                "{}:{}: global escape hatch (axiom declaration)",
                file.display(),
                line
            ),
            Violation::AuditMissing { file } => write!(
                f,
                "{}: semantic audit required for solved/disproved claims",
                file.display()
            ),
            Violation::AuditIncomplete { file, status } => write!(
                f,
                "{}: semantic audit status is {}, expected COMPLETE",
                file.display(),
                status
            ),
            Violation::ActiveInvalid { detail } => {
                write!(f, "problems/ACTIVE: {}", detail)
            }
        }
    }
}
