//! ErdosLab Domain Layer
//!
//! Core types shared by every other crate in the workspace: problem
//! identifiers, claim lifecycle states, the `status.json` record, evidence
//! entries, semantic audit statuses, and frozen statement handling.
//!
//! ## Key Concepts
//!
//! - **Problem**: a single Erdos problem, identified by `P`-prefixed id
//! - **Claim state**: lifecycle stage (partial -> solved/disproved/...)
//! - **Evidence**: what backs a claim (Lean proof, certificate, citation)
//! - **Semantic audit**: checklist confirming the formal statement matches
//!   the informal one; gates solved/disproved claims
//!
//! This crate holds pure data and parsing only. Filesystem traversal lives
//! in `erdoslab-policy` and `erdoslab-scaffold`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod audit;
pub mod evidence;
pub mod problem;
pub mod state;
pub mod statement;
pub mod status;

// Re-exports for convenience
pub use audit::AuditStatus;
pub use evidence::Evidence;
pub use problem::ProblemId;
pub use state::ClaimState;
pub use statement::extract_statement;
pub use status::{ClaimRecord, FrozenStatementRef, ProblemStatus};
