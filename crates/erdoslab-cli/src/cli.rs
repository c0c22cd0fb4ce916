//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ErdosLab CLI - scaffold problem attempts and enforce the evidence policy.
#[derive(Debug, Parser)]
#[command(name = "erdoslab")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Repository root (default: nearest ancestor containing problems/)
    #[arg(long, global = true)]
    pub repo: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (minimal)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new problem directory from problems/TEMPLATE
    New(NewArgs),

    /// Point problems/ACTIVE at a problem
    Active(ActiveArgs),

    /// Freeze a problem statement with source provenance
    Freeze(FreezeArgs),

    /// Create solver run scaffolding and planner prompts
    Scaffold(ScaffoldArgs),

    /// Generate the semantic audit checklist
    Audit(AuditArgs),

    /// Literature scout prompts and response ingestion
    Scout(ScoutArgs),

    /// Solver plan validation and ingestion
    Plan(PlanArgs),

    /// Run the repository policy checker (CI gate)
    Check,

    /// Run the policy checker, then the proof-assistant build
    Ci(CiArgs),
}

/// Arguments for the new command.
#[derive(Debug, Parser)]
pub struct NewArgs {
    /// Problem id (e.g. 379 or P0379)
    pub id: String,

    /// Optional problem title
    pub title: Option<String>,
}

/// Arguments for the active command.
#[derive(Debug, Parser)]
pub struct ActiveArgs {
    /// Problem id (e.g. 379 or P0379)
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the freeze command.
#[derive(Debug, Parser)]
pub struct FreezeArgs {
    /// Problem id (e.g. 379 or P0379)
    pub id: String,

    /// File holding the statement text to freeze
    #[arg(long)]
    pub statement: PathBuf,

    /// Problem page URL override
    #[arg(long)]
    pub url: Option<String>,

    /// URL the snapshot was fetched from
    #[arg(long)]
    pub snapshot_url: Option<String>,

    /// Snapshot file to hash for provenance
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

/// Arguments for the scaffold command.
#[derive(Debug, Parser)]
pub struct ScaffoldArgs {
    /// Problem id (e.g. 379 or P0379)
    pub id: String,

    /// Optional problem title
    #[arg(long)]
    pub title: Option<String>,

    /// Force creation of a new run directory
    #[arg(long)]
    pub new_run: bool,
}

/// Arguments for the audit command.
#[derive(Debug, Parser)]
pub struct AuditArgs {
    /// Problem id (e.g. 379 or P0379)
    pub id: String,

    /// Lean file to inspect (relative to the repo root)
    #[arg(long)]
    pub lean_file: Option<String>,

    /// Solver run to inspect when no Lean file is given
    #[arg(long, default_value = "latest")]
    pub run: String,
}

/// Arguments for the scout command.
#[derive(Debug, Parser)]
pub struct ScoutArgs {
    #[command(subcommand)]
    pub action: ScoutAction,
}

/// Scout subcommands.
#[derive(Debug, Subcommand)]
pub enum ScoutAction {
    /// Write the literature scout prompt and response placeholder
    Prompt {
        /// Problem id (e.g. 379 or P0379)
        id: String,
    },

    /// Ingest a pasted scout response into candidates files
    Ingest {
        /// Problem id (e.g. 379 or P0379)
        id: String,

        /// Response file override (default: literature/scout_response.md)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Provider label recorded in provenance
        #[arg(long, default_value = "manual")]
        model: String,
    },
}

/// Arguments for the plan command.
#[derive(Debug, Parser)]
pub struct PlanArgs {
    #[command(subcommand)]
    pub action: PlanAction,
}

/// Plan subcommands.
#[derive(Debug, Subcommand)]
pub enum PlanAction {
    /// Validate a planner response against the schema
    Validate {
        /// Problem id (e.g. 379 or P0379)
        id: String,

        /// Run id to validate (default: latest)
        #[arg(long, default_value = "latest")]
        run: String,

        /// Response file override (relative to the repo root)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Maximum number of plans allowed
        #[arg(long)]
        max_plans: Option<usize>,
    },

    /// Normalize, rank, and store plans from a planner response
    Ingest {
        /// Problem id (e.g. 379 or P0379)
        id: String,

        /// Run id to ingest (default: latest)
        #[arg(long, default_value = "latest")]
        run: String,

        /// Response file override (relative to the repo root)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Source label stored in plan metadata
        #[arg(long)]
        source: Option<String>,
    },
}

/// Arguments for the ci command.
#[derive(Debug, Parser)]
pub struct CiArgs {
    /// Proof-assistant build command
    #[arg(long, default_value = "lake build")]
    pub build_cmd: String,

    /// Skip the proof-assistant build (policy check only)
    #[arg(long)]
    pub no_build: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_check_command() {
        let cli = Cli::parse_from(["erdoslab", "check"]);
        assert!(matches!(cli.command, Command::Check));
    }

    #[test]
    fn test_new_command_with_title() {
        let cli = Cli::parse_from(["erdoslab", "new", "379", "A title"]);
        match cli.command {
            Command::New(args) => {
                assert_eq!(args.id, "379");
                assert_eq!(args.title.as_deref(), Some("A title"));
            }
            _ => panic!("Expected New command"),
        }
    }

    #[test]
    fn test_active_yes_flag() {
        let cli = Cli::parse_from(["erdoslab", "active", "P0379", "-y"]);
        match cli.command {
            Command::Active(args) => assert!(args.yes),
            _ => panic!("Expected Active command"),
        }
    }

    #[test]
    fn test_plan_validate_defaults() {
        let cli = Cli::parse_from(["erdoslab", "plan", "validate", "379"]);
        match cli.command {
            Command::Plan(PlanArgs {
                action: PlanAction::Validate { run, max_plans, .. },
            }) => {
                assert_eq!(run, "latest");
                assert!(max_plans.is_none());
            }
            _ => panic!("Expected Plan Validate command"),
        }
    }

    #[test]
    fn test_ci_default_build_cmd() {
        let cli = Cli::parse_from(["erdoslab", "ci"]);
        match cli.command {
            Command::Ci(args) => assert_eq!(args.build_cmd, "lake build"),
            _ => panic!("Expected Ci command"),
        }
    }

    #[test]
    fn test_global_repo_flag() {
        let cli = Cli::parse_from(["erdoslab", "--repo", "/tmp/lab", "check"]);
        assert_eq!(cli.repo.as_deref(), Some(std::path::Path::new("/tmp/lab")));
    }
}
