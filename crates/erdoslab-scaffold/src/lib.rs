//! ErdosLab Scaffolder
//!
//! Creates and maintains the per-problem directory tree:
//!
//! ```text
//! problems/P0379/
//!   status.json
//!   blueprint.md
//!   statement/   frozen_v1.md, semantic_audit.md, ...
//!   literature/  scout_prompt.md, candidates.json, ...
//!   solver/      runs/<RUNID>/..., best/...
//!   report/      writeup.md
//! ```
//!
//! All writes are scaffolding-time and append-only in spirit: existing
//! artifacts (frozen statements, pasted responses) are never overwritten.
//! The policy checker in `erdoslab-policy` reads this tree back.

#![warn(missing_docs)]

pub mod active;
pub mod audit;
mod clock;
mod error;
pub mod freeze;
pub mod log;
pub mod runs;
pub mod template;

pub use active::{active_exists, set_active, ActiveMethod};
pub use clock::{now_iso, run_id_now};
pub use error::ScaffoldError;
