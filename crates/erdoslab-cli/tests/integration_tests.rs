//! End-to-end flow: create a problem, freeze it, audit it, and run the gate.

use std::fs;
use std::path::Path;

use erdoslab_cli::commands::{
    execute_audit, execute_check, execute_freeze, execute_new, execute_scaffold,
};
use erdoslab_cli::{Cli, Command, Config, Formatter, OutputFormat};
use clap::Parser;
use tempfile::TempDir;

fn formatter() -> Formatter {
    Formatter::new(OutputFormat::Quiet, false)
}

fn seed_repo(root: &Path) {
    let template = root.join("problems/TEMPLATE");
    fs::create_dir_all(template.join("compute/experiments")).unwrap();
    fs::write(
        template.join("status.json"),
        r#"{"claim": {"state": "partial"}}"#,
    )
    .unwrap();
}

fn parse(args: &[&str]) -> Command {
    Cli::parse_from(args).command
}

#[test]
fn test_full_problem_lifecycle() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    seed_repo(root);
    let config = Config::load(root).unwrap();

    // new
    let Command::New(args) = parse(&["erdoslab", "new", "379", "Divisor chains"]) else {
        panic!("expected new");
    };
    assert_eq!(execute_new(&args, root).unwrap(), 0);
    assert!(root.join("problems/P0379/status.json").is_file());

    // freeze
    let statement = root.join("statement.txt");
    fs::write(&statement, "Does every divisor chain terminate?\n").unwrap();
    let Command::Freeze(args) = parse(&[
        "erdoslab",
        "freeze",
        "379",
        "--statement",
        statement.to_str().unwrap(),
    ]) else {
        panic!("expected freeze");
    };
    assert_eq!(execute_freeze(&args, root).unwrap(), 0);
    let frozen = fs::read_to_string(root.join("problems/P0379/statement/frozen_v1.md")).unwrap();
    assert!(frozen.contains("Does every divisor chain terminate?"));

    // scaffold a solver run
    let Command::Scaffold(args) = parse(&["erdoslab", "scaffold", "379"]) else {
        panic!("expected scaffold");
    };
    assert_eq!(execute_scaffold(&args, root, &config).unwrap(), 0);
    assert!(root.join("problems/P0379/solver/best/plan.json").is_file());

    // audit
    let Command::Audit(args) = parse(&["erdoslab", "audit", "379"]) else {
        panic!("expected audit");
    };
    assert_eq!(execute_audit(&args, root).unwrap(), 0);
    let audit =
        fs::read_to_string(root.join("problems/P0379/statement/semantic_audit.md")).unwrap();
    assert!(audit.contains("Status: INCOMPLETE"));

    // the gate passes for a partial problem
    assert_eq!(execute_check(root, &config, &formatter()).unwrap(), 0);
}

#[test]
fn test_gate_blocks_unbacked_solved_claim() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    seed_repo(root);
    let config = Config::load(root).unwrap();

    let Command::New(args) = parse(&["erdoslab", "new", "42"]) else {
        panic!("expected new");
    };
    execute_new(&args, root).unwrap();

    // claim solved with no evidence, no writeup, no audit
    let status_path = root.join("problems/P0042/status.json");
    let mut status: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&status_path).unwrap()).unwrap();
    status["claim"]["state"] = serde_json::json!("solved");
    fs::write(&status_path, serde_json::to_string_pretty(&status).unwrap()).unwrap();

    assert_eq!(execute_check(root, &config, &formatter()).unwrap(), 1);
}

#[test]
fn test_gate_accepts_fully_backed_solved_claim() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    seed_repo(root);
    let config = Config::load(root).unwrap();

    let Command::New(args) = parse(&["erdoslab", "new", "7"]) else {
        panic!("expected new");
    };
    execute_new(&args, root).unwrap();

    let problem = root.join("problems/P0007");
    fs::create_dir_all(problem.join("report")).unwrap();
    fs::create_dir_all(problem.join("statement")).unwrap();
    fs::write(problem.join("statement/frozen_v1.md"), "## Statement\nx\n").unwrap();
    fs::write(problem.join("report/writeup.md"), "# Writeup\n").unwrap();
    fs::write(
        problem.join("statement/semantic_audit.md"),
        "Status: COMPLETE\n",
    )
    .unwrap();
    fs::create_dir_all(root.join("ErdosLab/Problems")).unwrap();
    fs::write(
        root.join("ErdosLab/Problems/P0007.lean"),
        "theorem erdos_7 : 1 + 1 = 2 := by rfl\n",
    )
    .unwrap();

    let status_path = problem.join("status.json");
    let mut status: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&status_path).unwrap()).unwrap();
    status["claim"]["state"] = serde_json::json!("solved");
    status["evidence"] = serde_json::json!([
        {"type": "lean", "file": "ErdosLab/Problems/P0007.lean", "theorem": "erdos_7"}
    ]);
    fs::write(&status_path, serde_json::to_string_pretty(&status).unwrap()).unwrap();

    assert_eq!(execute_check(root, &config, &formatter()).unwrap(), 0);

    // a placeholder sneaking into the proof flips the gate
    fs::write(
        root.join("ErdosLab/Problems/P0007.lean"),
        "theorem erdos_7 : 1 + 1 = 2 := by\n  sorry\n",
    )
    .unwrap();
    assert_eq!(execute_check(root, &config, &formatter()).unwrap(), 1);
}
