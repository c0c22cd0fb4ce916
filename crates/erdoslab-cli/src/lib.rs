//! ErdosLab CLI - scaffold problem attempts and enforce the evidence policy.
//!
//! The `erdoslab` binary ties the workspace together: problem creation,
//! the active slot, statement freezing, solver run scaffolding, semantic
//! audits, scout/planner prompt handling, and the CI policy gate.

#![warn(missing_docs)]

mod cli;
pub mod commands;
mod config;
mod error;
mod output;

pub use cli::{Cli, CliFormat, Command};
pub use config::{find_repo_root, Config, OutputFormat, PolicySettings, Settings};
pub use error::{CliError, Result};
pub use output::Formatter;
