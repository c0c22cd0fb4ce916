//! Solver plan schema: validation, normalization, scoring

use std::fs;
use std::path::Path;

use serde_json::{json, Map, Value};

use crate::keywords::ascii_safe;
use crate::ScoutError;

/// Minimum number of plans a planner response must carry.
pub const MIN_PLANS: usize = 3;

/// Default maximum number of plans.
pub const DEFAULT_MAX_PLANS: usize = 8;

/// Allowed `checkability` values for key lemmas.
pub const ALLOWED_CHECKABILITY: [&str; 3] = ["easy", "medium", "hard"];

const LIST_FIELDS: [&str; 5] = [
    "definitions_needed",
    "risk_factors",
    "experiments",
    "formalization_path",
    "dependency_graph",
];

/// Validate a planner payload strictly, returning every schema violation.
///
/// This is the pre-ingest gate: an empty result means the response honors
/// the contract the planner prompt spells out.
pub fn validate_payload(payload: &Value, expected_problem_id: &str, max_plans: usize) -> Vec<String> {
    let mut errors = Vec::new();

    match payload.get("problem_id").and_then(Value::as_str) {
        Some(got) if got == expected_problem_id => {}
        got => errors.push(format!(
            "problem_id mismatch: expected {}, got {}",
            expected_problem_id,
            got.unwrap_or("nothing")
        )),
    }
    if !payload.get("generated_at").is_some_and(Value::is_string) {
        errors.push("generated_at must be a string (YYYY-MM-DD)".to_string());
    }
    if !payload.get("solver_used_scout").is_some_and(Value::is_boolean) {
        errors.push("solver_used_scout must be boolean".to_string());
    }

    let Some(plans) = payload.get("plans").and_then(Value::as_array) else {
        errors.push("plans must be a list".to_string());
        return errors;
    };
    if plans.len() < MIN_PLANS {
        errors.push(format!("plans must include at least {} entries", MIN_PLANS));
    }
    if plans.len() > max_plans {
        errors.push(format!("plans must include at most {} entries", max_plans));
    }
    for (index, plan) in plans.iter().enumerate() {
        validate_plan(plan, index, &mut errors);
    }
    errors
}

fn validate_plan(plan: &Value, index: usize, errors: &mut Vec<String>) {
    let Some(obj) = plan.as_object() else {
        errors.push(format!("plan[{}] must be an object", index));
        return;
    };

    for field in ["strategy_name", "high_level_idea"] {
        if !obj
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty())
        {
            errors.push(format!("plan[{}] missing {}", index, field));
        }
    }

    let lemmas = expect_list(obj, "key_lemmas", index, errors);
    for (lemma_idx, lemma) in lemmas.iter().enumerate() {
        let Some(lemma) = lemma.as_object() else {
            errors.push(format!(
                "plan[{}] key_lemmas[{}] must be an object",
                index, lemma_idx
            ));
            continue;
        };
        for field in ["statement", "why_needed"] {
            if !lemma
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| !s.is_empty())
            {
                errors.push(format!(
                    "plan[{}] key_lemmas[{}] missing {}",
                    index, lemma_idx, field
                ));
            }
        }
        if !lemma
            .get("likely_sources")
            .and_then(Value::as_array)
            .is_some_and(|l| !l.is_empty())
        {
            errors.push(format!(
                "plan[{}] key_lemmas[{}] missing likely_sources",
                index, lemma_idx
            ));
        }
        let checkability = lemma.get("checkability").and_then(Value::as_str);
        if !checkability.is_some_and(|c| ALLOWED_CHECKABILITY.contains(&c)) {
            errors.push(format!(
                "plan[{}] key_lemmas[{}] checkability must be easy|medium|hard",
                index, lemma_idx
            ));
        }
    }

    for field in LIST_FIELDS {
        let items = expect_list(obj, field, index, errors);
        if !items.is_empty() && !items.iter().all(|item| item.is_string()) {
            errors.push(format!("plan[{}] {} must contain strings", index, field));
        }
    }

    for field in ["expected_payoff", "difficulty"] {
        match obj.get(field).and_then(Value::as_f64) {
            None => errors.push(format!("plan[{}] {} must be a number", index, field)),
            Some(value) if !(0.0..=1.0).contains(&value) => {
                errors.push(format!("plan[{}] {} must be in [0,1]", index, field))
            }
            Some(_) => {}
        }
    }
}

fn expect_list<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
    index: usize,
    errors: &mut Vec<String>,
) -> Vec<&'a Value> {
    match obj.get(field).and_then(Value::as_array) {
        Some(list) => list.iter().collect(),
        None => {
            errors.push(format!("plan[{}] {} must be a list", index, field));
            Vec::new()
        }
    }
}

/// Normalize one raw plan for ingestion.
///
/// Ingestion is deliberately lenient where validation is strict: pasted
/// output that is close enough gets defaults and clamping instead of a
/// rejection, and every repair is recorded as a warning.
pub fn normalize_plan(
    raw: &Value,
    index: usize,
    source: &str,
    ingested_at: &str,
    warnings: &mut Vec<String>,
) -> Value {
    let mut plan = raw.as_object().cloned().unwrap_or_default();

    if !plan.get("strategy_name").is_some_and(Value::is_string) {
        warnings.push(format!("plan[{}] missing strategy_name", index));
        plan.insert(
            "strategy_name".to_string(),
            json!(format!("Plan {}", index + 1)),
        );
    }
    if !plan.get("high_level_idea").is_some_and(Value::is_string) {
        warnings.push(format!("plan[{}] missing high_level_idea", index));
        plan.insert("high_level_idea".to_string(), json!(""));
    }
    for field in ["key_lemmas"].into_iter().chain(LIST_FIELDS) {
        if !plan.get(field).is_some_and(Value::is_array) {
            plan.insert(field.to_string(), json!([]));
        }
    }
    for field in ["expected_payoff", "difficulty"] {
        let value = match plan.get(field).and_then(Value::as_f64) {
            Some(value) => value.clamp(0.0, 1.0),
            None => {
                warnings.push(format!("plan[{}] missing {}", index, field));
                0.5
            }
        };
        plan.insert(field.to_string(), json!(value));
    }
    plan.insert("status".to_string(), json!("NEEDS_REVIEW"));
    plan.insert("source".to_string(), json!(source));
    plan.insert("ingested_at".to_string(), json!(ingested_at));
    Value::Object(plan)
}

/// Ranking score: payoff discounted by half the difficulty.
pub fn plan_score(plan: &Value) -> f64 {
    let payoff = plan
        .get("expected_payoff")
        .and_then(Value::as_f64)
        .unwrap_or(0.5);
    let difficulty = plan
        .get("difficulty")
        .and_then(Value::as_f64)
        .unwrap_or(0.5);
    payoff - 0.5 * difficulty
}

/// Normalize, rank, and write `plan_NNN.json` files plus `index.json`.
///
/// Returns the ranked plans and the warnings accumulated while repairing
/// them.
pub fn ingest_plans(
    plans_dir: &Path,
    raw_plans: &[Value],
    source: &str,
    ingested_at: &str,
) -> Result<(Vec<Value>, Vec<String>), ScoutError> {
    let mut warnings = Vec::new();
    let mut plans = Vec::new();
    for (index, raw) in raw_plans.iter().enumerate() {
        if !raw.is_object() {
            warnings.push(format!("plan[{}] is not an object", index));
            continue;
        }
        plans.push(normalize_plan(raw, index, source, ingested_at, &mut warnings));
    }
    plans.sort_by(|a, b| {
        plan_score(b)
            .partial_cmp(&plan_score(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    fs::create_dir_all(plans_dir)?;
    for (idx, plan) in plans.iter().enumerate() {
        let path = plans_dir.join(format!("plan_{:03}.json", idx + 1));
        fs::write(path, serde_json::to_string_pretty(plan)? + "\n")?;
    }
    let index = json!({
        "generated_at": ingested_at,
        "source": source,
        "ranked": plans
            .iter()
            .enumerate()
            .map(|(idx, plan)| {
                json!({
                    "file": format!("plan_{:03}.json", idx + 1),
                    "strategy_name": plan.get("strategy_name"),
                    "score": plan_score(plan),
                })
            })
            .collect::<Vec<_>>(),
    });
    fs::write(
        plans_dir.join("index.json"),
        serde_json::to_string_pretty(&index)? + "\n",
    )?;
    Ok((plans, warnings))
}

/// Promote the top-ranked plan into `solver/best/`.
pub fn write_best(best_dir: &Path, best_plan: &Value, score: f64) -> Result<(), ScoutError> {
    fs::create_dir_all(best_dir)?;

    let mut payload = best_plan.as_object().cloned().unwrap_or_default();
    payload.insert("score".to_string(), json!(score));
    fs::write(
        best_dir.join("plan.json"),
        serde_json::to_string_pretty(&Value::Object(payload))? + "\n",
    )?;

    let strategy = best_plan
        .get("strategy_name")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    let idea = best_plan
        .get("high_level_idea")
        .and_then(Value::as_str)
        .unwrap_or("");
    let summary = format!(
        "# Solver Summary\n\nSelected plan: {}\nScore: {:.3}\n\nHigh-level idea:\n{}\n\nStatus: UNVERIFIED (manual review required).\n",
        strategy, score, idea
    );
    fs::write(best_dir.join("summary.md"), summary)?;

    let mut lines = vec![
        "# Next Actions".to_string(),
        String::new(),
        "Suggested experiments:".to_string(),
    ];
    let experiments: Vec<String> = best_plan
        .get("experiments")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(ascii_safe)
                .collect()
        })
        .unwrap_or_default();
    if experiments.is_empty() {
        lines.push("- TODO: define experiments.".to_string());
    } else {
        for item in experiments {
            lines.push(format!("- {}", item));
        }
    }
    fs::write(best_dir.join("next_actions.md"), lines.join("\n") + "\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn good_plan() -> Value {
        json!({
            "strategy_name": "Density increment",
            "high_level_idea": "Iterate a density increment argument.",
            "key_lemmas": [{
                "statement": "Every dense set contains a pattern.",
                "why_needed": "Drives the increment.",
                "likely_sources": ["Roth 1953"],
                "checkability": "medium"
            }],
            "definitions_needed": ["upper density"],
            "risk_factors": ["increment may stall"],
            "experiments": ["check small cases"],
            "formalization_path": ["state lemma", "prove lemma"],
            "dependency_graph": ["lemma1 -> theorem"],
            "expected_payoff": 0.6,
            "difficulty": 0.4
        })
    }

    fn good_payload(n: usize) -> Value {
        json!({
            "problem_id": "P0379",
            "generated_at": "2025-01-01",
            "solver_used_scout": false,
            "plans": vec![good_plan(); n],
        })
    }

    #[test]
    fn test_valid_payload_passes() {
        let errors = validate_payload(&good_payload(3), "P0379", DEFAULT_MAX_PLANS);
        assert!(errors.is_empty(), "errors: {:?}", errors);
    }

    #[test]
    fn test_too_few_plans() {
        let errors = validate_payload(&good_payload(2), "P0379", DEFAULT_MAX_PLANS);
        assert!(errors.iter().any(|e| e.contains("at least 3")));
    }

    #[test]
    fn test_too_many_plans() {
        let errors = validate_payload(&good_payload(9), "P0379", DEFAULT_MAX_PLANS);
        assert!(errors.iter().any(|e| e.contains("at most 8")));
    }

    #[test]
    fn test_problem_id_mismatch() {
        let errors = validate_payload(&good_payload(3), "P0001", DEFAULT_MAX_PLANS);
        assert!(errors.iter().any(|e| e.contains("mismatch")));
    }

    #[test]
    fn test_missing_plan_fields() {
        let mut payload = good_payload(3);
        payload["plans"][0] = json!({"strategy_name": "x"});
        let errors = validate_payload(&payload, "P0379", DEFAULT_MAX_PLANS);
        assert!(errors.iter().any(|e| e.contains("plan[0] missing high_level_idea")));
        assert!(errors.iter().any(|e| e.contains("plan[0] key_lemmas must be a list")));
        assert!(errors.iter().any(|e| e.contains("plan[0] expected_payoff must be a number")));
    }

    #[test]
    fn test_lemma_checkability_enforced() {
        let mut payload = good_payload(3);
        payload["plans"][1]["key_lemmas"][0]["checkability"] = json!("trivial");
        let errors = validate_payload(&payload, "P0379", DEFAULT_MAX_PLANS);
        assert!(errors
            .iter()
            .any(|e| e.contains("checkability must be easy|medium|hard")));
    }

    #[test]
    fn test_payoff_out_of_range() {
        let mut payload = good_payload(3);
        payload["plans"][0]["expected_payoff"] = json!(1.2);
        let errors = validate_payload(&payload, "P0379", DEFAULT_MAX_PLANS);
        assert!(errors.iter().any(|e| e.contains("must be in [0,1]")));
    }

    #[test]
    fn test_list_fields_must_hold_strings() {
        let mut payload = good_payload(3);
        payload["plans"][0]["experiments"] = json!([1, 2]);
        let errors = validate_payload(&payload, "P0379", DEFAULT_MAX_PLANS);
        assert!(errors
            .iter()
            .any(|e| e.contains("plan[0] experiments must contain strings")));
    }

    #[test]
    fn test_normalize_fills_defaults_and_clamps() {
        let mut warnings = Vec::new();
        let plan = normalize_plan(
            &json!({"expected_payoff": 1.7, "difficulty": -0.2}),
            0,
            "manual_llm",
            "2025-01-01T00:00:00Z",
            &mut warnings,
        );
        assert_eq!(plan["strategy_name"], "Plan 1");
        assert_eq!(plan["expected_payoff"], 1.0);
        assert_eq!(plan["difficulty"], 0.0);
        assert_eq!(plan["status"], "NEEDS_REVIEW");
        assert_eq!(plan["source"], "manual_llm");
        assert!(warnings.iter().any(|w| w.contains("missing strategy_name")));
    }

    #[test]
    fn test_normalize_preserves_unknown_fields() {
        let mut warnings = Vec::new();
        let plan = normalize_plan(
            &json!({"strategy_name": "s", "high_level_idea": "i", "expected_payoff": 0.5, "difficulty": 0.5, "aside": "kept"}),
            0,
            "src",
            "t",
            &mut warnings,
        );
        assert_eq!(plan["aside"], "kept");
    }

    #[test]
    fn test_plan_score() {
        let plan = json!({"expected_payoff": 0.8, "difficulty": 0.4});
        assert!((plan_score(&plan) - 0.6).abs() < 1e-9);
        // missing fields default to 0.5 each
        assert!((plan_score(&json!({})) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_ingest_writes_ranked_files() {
        let dir = TempDir::new().unwrap();
        let weak = json!({"strategy_name": "weak", "high_level_idea": "x", "expected_payoff": 0.2, "difficulty": 0.8});
        let strong = json!({"strategy_name": "strong", "high_level_idea": "y", "expected_payoff": 0.9, "difficulty": 0.1});
        let (plans, warnings) =
            ingest_plans(dir.path(), &[weak, strong], "manual_llm", "t").unwrap();
        assert_eq!(plans.len(), 2);
        assert!(warnings.is_empty());
        assert_eq!(plans[0]["strategy_name"], "strong");

        let first: Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("plan_001.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(first["strategy_name"], "strong");

        let index: Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("index.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(index["ranked"][0]["file"], "plan_001.json");
    }

    #[test]
    fn test_ingest_skips_non_objects_with_warning() {
        let dir = TempDir::new().unwrap();
        let (plans, warnings) =
            ingest_plans(dir.path(), &[json!("nope"), good_plan()], "s", "t").unwrap();
        assert_eq!(plans.len(), 1);
        assert!(warnings.iter().any(|w| w.contains("not an object")));
    }

    #[test]
    fn test_write_best_outputs() {
        let dir = TempDir::new().unwrap();
        let plan = good_plan();
        write_best(dir.path(), &plan, 0.4).unwrap();

        let best: Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("plan.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(best["score"], 0.4);

        let summary = std::fs::read_to_string(dir.path().join("summary.md")).unwrap();
        assert!(summary.contains("Density increment"));
        assert!(summary.contains("UNVERIFIED"));

        let actions = std::fs::read_to_string(dir.path().join("next_actions.md")).unwrap();
        assert!(actions.contains("- check small cases"));
    }
}
