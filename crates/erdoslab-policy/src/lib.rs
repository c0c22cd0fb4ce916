//! ErdosLab Policy Checker
//!
//! Enforces the evidence-gating rules that decide whether a problem may be
//! claimed solved or disproved. The checker is the CI gate: it walks the
//! repository read-only, collects violations, and callers turn a non-empty
//! report into a non-zero exit code.
//!
//! The gate, in short:
//! - solved/disproved require a machine-checked proof artifact with no
//!   unproven placeholders and no global escape hatches
//! - solved/disproved require a COMPLETE (or grandfathered LEGACY)
//!   semantic audit
//! - literature/ambiguous claims require their writeup files
//! - at most one problem occupies the active slot
//!
//! # Examples
//!
//! ```no_run
//! use erdoslab_policy::{PolicyChecker, PolicyConfig};
//!
//! let checker = PolicyChecker::new(PolicyConfig::default());
//! let report = checker.check_repo(std::path::Path::new(".")).unwrap();
//! std::process::exit(if report.passed() { 0 } else { 1 });
//! ```

#![warn(missing_docs)]

mod checker;
mod config;
mod error;
mod violation;

pub use checker::{CheckReport, PolicyChecker};
pub use config::PolicyConfig;
pub use error::PolicyError;
pub use violation::Violation;
