//! ErdosLab CLI entry point.

use clap::Parser;
use erdoslab_cli::commands;
use erdoslab_cli::{find_repo_root, Cli, CliError, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let usage_error = e
                .downcast_ref::<CliError>()
                .is_some_and(|c| matches!(c, CliError::InvalidInput(_)));
            std::process::exit(if usage_error { 2 } else { 1 });
        }
    }
}

fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();

    let root = match &cli.repo {
        Some(repo) => repo.clone(),
        None => find_repo_root(&std::env::current_dir()?),
    };

    let config = Config::load(&root)?;
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let code = match &cli.command {
        Command::New(args) => commands::execute_new(args, &root),
        Command::Active(args) => commands::execute_active(args, &root),
        Command::Freeze(args) => commands::execute_freeze(args, &root),
        Command::Scaffold(args) => commands::execute_scaffold(args, &root, &config),
        Command::Audit(args) => commands::execute_audit(args, &root),
        Command::Scout(args) => commands::execute_scout(args, &root, &config, &formatter),
        Command::Plan(args) => commands::execute_plan(args, &root, &config),
        Command::Check => commands::execute_check(&root, &config, &formatter),
        Command::Ci(args) => commands::execute_ci(args, &root, &config, &formatter),
    }?;
    Ok(code)
}
