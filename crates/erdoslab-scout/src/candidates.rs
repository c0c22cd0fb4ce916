//! Literature candidate schema and ingestion

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::keywords::{ascii_safe, normalize_title};
use crate::parser::extract_json_object;
use crate::ScoutError;

/// Review status every ingested candidate carries.
pub const NEEDS_REVIEW: &str = "NEEDS_REVIEW";

/// Identifier namespaces accepted for literature candidates.
///
/// Only verifiable identifiers are allowed; a candidate without one is
/// dropped at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdType {
    /// Digital Object Identifier
    Doi,
    /// arXiv identifier
    Arxiv,
    /// zbMATH document id
    Zbmath,
    /// OpenAlex work id
    Openalex,
}

impl IdType {
    /// The spelling used in candidate JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdType::Doi => "doi",
            IdType::Arxiv => "arxiv",
            IdType::Zbmath => "zbmath",
            IdType::Openalex => "openalex",
        }
    }
}

/// A single literature candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// The identifier (DOI, arXiv id, ...)
    pub id: String,

    /// Which namespace the identifier lives in
    pub id_type: IdType,

    /// Work title (ASCII-projected)
    pub title: String,

    /// Author names, truncated to the first five
    #[serde(default)]
    pub authors: Vec<String>,

    /// Publication year, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    /// Landing URL, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Relevance estimate in [0, 1]; never a verification
    pub confidence: f64,

    /// Why this candidate might be relevant
    #[serde(default)]
    pub reasons: Vec<String>,

    /// Always `NEEDS_REVIEW`; humans promote candidates elsewhere
    pub status: String,

    /// Where this candidate came from
    #[serde(default)]
    pub provenance: Vec<ProvenanceRecord>,
}

/// Provenance of one sighting of a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceRecord {
    /// Provider label (e.g. a model name)
    pub provider: String,

    /// The query or prompt that produced the sighting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// When the sighting was recorded (RFC3339 UTC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<String>,
}

/// The `literature/candidates.json` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatesFile {
    /// Canonical problem id
    pub problem_id: String,

    /// When this file was generated (RFC3339 UTC)
    pub generated_at: String,

    /// Whether network access was disabled during generation
    pub offline: bool,

    /// Whether the solver consumed these candidates
    pub solver_used_scout: bool,

    /// Queries issued (empty for manual ingestion)
    #[serde(default)]
    pub queries: Vec<Value>,

    /// Ranked candidates
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    /// Non-fatal issues observed during generation
    #[serde(default)]
    pub errors: Vec<String>,
}

impl CandidatesFile {
    /// Load `candidates.json`, if present and parseable.
    pub fn load(path: &Path) -> Option<Self> {
        let raw = fs::read_to_string(path).ok()?;
        serde_json::from_str(&raw).ok()
    }
}

/// Ingest a pasted scout response into a [`CandidatesFile`].
///
/// Invalid candidate entries are skipped with a warning and recorded in the
/// payload's `errors`, mirroring how careless model output is handled
/// everywhere else: salvage what validates, never fail the whole batch.
pub fn ingest_response(
    response: &str,
    problem_id: &str,
    provider: &str,
    generated_at: &str,
    max_candidates: usize,
) -> Result<CandidatesFile, ScoutError> {
    let payload = extract_json_object(response)?;
    let mut errors = Vec::new();

    if let Some(got) = payload.get("problem_id").and_then(Value::as_str) {
        if got != problem_id {
            errors.push(format!(
                "problem_id mismatch: expected {}, got {}",
                problem_id, got
            ));
        }
    }

    let raw_candidates = payload
        .get("candidates")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut candidates = Vec::new();
    for (idx, raw) in raw_candidates.iter().enumerate() {
        match parse_candidate(raw, provider, generated_at) {
            Ok(candidate) => candidates.push(candidate),
            Err(e) => {
                warn!(index = idx, error = %e, "skipping candidate");
                errors.push(format!("candidates[{}]: {}", idx, e));
            }
        }
    }

    if let Some(model_errors) = payload.get("errors").and_then(Value::as_array) {
        for err in model_errors {
            if let Some(text) = err.as_str() {
                errors.push(ascii_safe(text));
            }
        }
    }

    let mut candidates = dedupe(candidates);
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.year.cmp(&b.year))
    });
    candidates.truncate(max_candidates);

    Ok(CandidatesFile {
        problem_id: problem_id.to_string(),
        generated_at: generated_at.to_string(),
        offline: true,
        solver_used_scout: false,
        queries: Vec::new(),
        candidates,
        errors,
    })
}

fn parse_candidate(raw: &Value, provider: &str, fetched_at: &str) -> Result<Candidate, String> {
    let obj = raw.as_object().ok_or("must be an object")?;

    let id = obj
        .get("id")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or("missing identifier")?;
    let id_type: IdType = obj
        .get("id_type")
        .cloned()
        .ok_or("missing id_type")
        .and_then(|v| serde_json::from_value(v).map_err(|_| "unknown id_type"))?;
    let title = obj
        .get("title")
        .and_then(Value::as_str)
        .map(ascii_safe)
        .filter(|s| !s.trim().is_empty())
        .ok_or("missing title")?;

    let confidence = obj
        .get("confidence")
        .and_then(Value::as_f64)
        .ok_or("confidence must be a number")?;
    if !(0.0..=1.0).contains(&confidence) {
        return Err("confidence must be in [0,1]".to_string());
    }

    let authors: Vec<String> = obj
        .get("authors")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(ascii_safe)
                .filter(|a| !a.trim().is_empty())
                .take(5)
                .collect()
        })
        .unwrap_or_default();

    let reasons: Vec<String> = obj
        .get("reasons")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(ascii_safe)
                .filter(|r| !r.trim().is_empty())
                .collect()
        })
        .unwrap_or_default();
    if reasons.is_empty() {
        return Err("at least one reason is required".to_string());
    }

    Ok(Candidate {
        id: id.to_string(),
        id_type,
        title,
        authors,
        year: obj
            .get("year")
            .and_then(Value::as_str)
            .map(str::to_string),
        url: obj.get("url").and_then(Value::as_str).map(str::to_string),
        confidence,
        reasons,
        status: NEEDS_REVIEW.to_string(),
        provenance: vec![ProvenanceRecord {
            provider: provider.to_string(),
            query: None,
            fetched_at: Some(fetched_at.to_string()),
        }],
    })
}

/// Merge duplicate candidates.
///
/// Key is `id_type:id` lowercased, falling back to normalized
/// title/year/first-author for malformed ids. Merging unions provenance and
/// keeps the higher-confidence entry's score and reasons.
pub fn dedupe(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut keys: Vec<String> = Vec::new();
    let mut merged: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        let key = dedupe_key(&candidate);
        match keys.iter().position(|k| *k == key) {
            Some(i) => {
                let existing = &mut merged[i];
                for record in &candidate.provenance {
                    if !existing.provenance.contains(record) {
                        existing.provenance.push(record.clone());
                    }
                }
                if candidate.confidence > existing.confidence {
                    existing.confidence = candidate.confidence;
                    existing.reasons = candidate.reasons.clone();
                }
            }
            None => {
                keys.push(key);
                merged.push(candidate);
            }
        }
    }
    merged
}

fn dedupe_key(candidate: &Candidate) -> String {
    let id = candidate.id.trim();
    if id.is_empty() {
        format!(
            "title:{}:{}:{}",
            normalize_title(&candidate.title),
            candidate.year.as_deref().unwrap_or(""),
            normalize_title(candidate.authors.first().map(String::as_str).unwrap_or(""))
        )
    } else {
        format!("{}:{}", candidate.id_type.as_str(), id.to_lowercase())
    }
}

/// Render the human-readable `candidates.md`.
pub fn render_markdown(file: &CandidatesFile) -> String {
    let mut lines = vec![
        "# Literature Candidates (UNVERIFIED)".to_string(),
        String::new(),
        format!("Generated: {}", file.generated_at),
        format!("Offline: {}", if file.offline { "yes" } else { "no" }),
        "Status: discovery-only; NO results are verified.".to_string(),
        String::new(),
    ];
    if file.candidates.is_empty() {
        lines.push("No candidates returned.".to_string());
    } else {
        lines.push("Candidates (ranked):".to_string());
        for (idx, cand) in file.candidates.iter().enumerate() {
            lines.push(format!(
                "{}. {} ({})",
                idx + 1,
                cand.title,
                cand.year.as_deref().unwrap_or("unknown year")
            ));
            if let Some(url) = &cand.url {
                lines.push(format!("   url: {}", url));
            }
            lines.push(format!("   id: {}:{}", cand.id_type.as_str(), cand.id));
            lines.push(format!("   confidence: {:.2}", cand.confidence));
            if !cand.reasons.is_empty() {
                lines.push(format!("   reasons: {}", cand.reasons.join(", ")));
            }
            lines.push(format!("   status: {}", cand.status));
        }
    }
    if !file.errors.is_empty() {
        lines.push(String::new());
        lines.push("Errors:".to_string());
        for err in &file.errors {
            lines.push(format!("- {}", err));
        }
    }
    lines.join("\n") + "\n"
}

/// Render the `triage.md` checklist.
pub fn render_triage(file: &CandidatesFile) -> String {
    let mut lines = vec![
        "# Literature Triage".to_string(),
        String::new(),
        format!("Generated: {}", file.generated_at),
        String::new(),
    ];
    if file.candidates.is_empty() {
        lines.push("No candidates to triage.".to_string());
    } else {
        for cand in &file.candidates {
            lines.push(format!(
                "- [ ] {}:{} ({}) - {} [{}]",
                cand.id_type.as_str(),
                cand.id,
                cand.year.as_deref().unwrap_or("unknown year"),
                cand.title,
                cand.status
            ));
        }
    }
    lines.join("\n") + "\n"
}

/// Write `candidates.json`, `candidates.md`, and `triage.md` under the
/// problem's `literature/` directory.
pub fn write_outputs(literature_dir: &Path, file: &CandidatesFile) -> Result<(), ScoutError> {
    fs::create_dir_all(literature_dir)?;
    let json = serde_json::to_string_pretty(file)? + "\n";
    fs::write(literature_dir.join("candidates.json"), json)?;
    fs::write(literature_dir.join("candidates.md"), render_markdown(file))?;
    fs::write(literature_dir.join("triage.md"), render_triage(file))?;
    Ok(())
}

/// Render the candidates block appended to planner prompts.
pub fn render_prompt_block(file: Option<&CandidatesFile>, max_items: usize) -> String {
    let Some(file) = file else {
        return "- none (missing candidates.json)".to_string();
    };
    if file.candidates.is_empty() {
        return "- none (no candidates listed)".to_string();
    }
    let mut lines = Vec::new();
    for (idx, cand) in file.candidates.iter().take(max_items).enumerate() {
        let authors = if cand.authors.is_empty() {
            "unknown authors".to_string()
        } else {
            cand.authors.join(", ")
        };
        let mut line = format!(
            "- [{}] {} ({}), {}. {}: {}. confidence: {:.2}. status: {}.",
            idx + 1,
            if cand.title.trim().is_empty() {
                "untitled"
            } else {
                cand.title.trim()
            },
            cand.year.as_deref().unwrap_or("n.d."),
            authors,
            cand.id_type.as_str(),
            cand.id,
            cand.confidence,
            cand.status
        );
        if let Some(url) = &cand.url {
            line.push_str(&format!(" url: {}.", url));
        }
        let reasons: Vec<&str> = cand.reasons.iter().take(3).map(String::as_str).collect();
        if !reasons.is_empty() {
            line.push_str(&format!(" reasons: {}.", reasons.join("; ")));
        }
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(candidates: Value) -> String {
        format!(
            "```json\n{}\n```",
            json!({
                "problem_id": "P0379",
                "generated_at": "2025-01-01",
                "solver_used_scout": false,
                "candidates": candidates,
            })
        )
    }

    fn good_candidate() -> Value {
        json!({
            "id": "10.1234/abcd",
            "id_type": "doi",
            "title": "On sums of divisors",
            "authors": ["A. Author"],
            "year": "1975",
            "url": "https://doi.org/10.1234/abcd",
            "confidence": 0.7,
            "reasons": ["keyword match: divisors"],
            "status": "NEEDS_REVIEW"
        })
    }

    #[test]
    fn test_ingest_valid_candidate() {
        let file = ingest_response(
            &response(json!([good_candidate()])),
            "P0379",
            "gpt-5.2-pro",
            "2025-01-01T00:00:00Z",
            20,
        )
        .unwrap();
        assert_eq!(file.candidates.len(), 1);
        assert!(file.errors.is_empty());
        let cand = &file.candidates[0];
        assert_eq!(cand.status, NEEDS_REVIEW);
        assert_eq!(cand.provenance[0].provider, "gpt-5.2-pro");
    }

    #[test]
    fn test_ingest_skips_invalid_entries() {
        let mut no_reason = good_candidate();
        no_reason["reasons"] = json!([]);
        let mut bad_type = good_candidate();
        bad_type["id_type"] = json!("wikipedia");
        let file = ingest_response(
            &response(json!([good_candidate(), no_reason, bad_type, "not an object"])),
            "P0379",
            "m",
            "t",
            20,
        )
        .unwrap();
        assert_eq!(file.candidates.len(), 1);
        assert_eq!(file.errors.len(), 3);
    }

    #[test]
    fn test_ingest_records_problem_id_mismatch() {
        let file = ingest_response(&response(json!([])), "P0001", "m", "t", 20).unwrap();
        assert!(file.errors.iter().any(|e| e.contains("mismatch")));
    }

    #[test]
    fn test_confidence_out_of_range_rejected() {
        let mut cand = good_candidate();
        cand["confidence"] = json!(1.5);
        let file = ingest_response(&response(json!([cand])), "P0379", "m", "t", 20).unwrap();
        assert!(file.candidates.is_empty());
    }

    #[test]
    fn test_dedupe_merges_provenance_and_keeps_best_confidence() {
        let mut a = parse_candidate(&good_candidate(), "model-a", "t1").unwrap();
        a.confidence = 0.5;
        let mut b = parse_candidate(&good_candidate(), "model-b", "t2").unwrap();
        b.confidence = 0.9;
        b.reasons = vec!["stronger match".to_string()];

        let merged = dedupe(vec![a, b]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].confidence, 0.9);
        assert_eq!(merged[0].reasons, vec!["stronger match".to_string()]);
        assert_eq!(merged[0].provenance.len(), 2);
    }

    #[test]
    fn test_dedupe_key_is_case_insensitive() {
        let a = parse_candidate(&good_candidate(), "m", "t").unwrap();
        let mut b = a.clone();
        b.id = "10.1234/ABCD".to_string();
        assert_eq!(dedupe(vec![a, b]).len(), 1);
    }

    #[test]
    fn test_ranked_and_truncated() {
        let mut low = good_candidate();
        low["id"] = json!("10.1/low");
        low["confidence"] = json!(0.2);
        let mut high = good_candidate();
        high["id"] = json!("10.1/high");
        high["confidence"] = json!(0.9);
        let file = ingest_response(&response(json!([low, high])), "P0379", "m", "t", 1).unwrap();
        assert_eq!(file.candidates.len(), 1);
        assert_eq!(file.candidates[0].id, "10.1/high");
    }

    #[test]
    fn test_render_markdown_mentions_unverified() {
        let file = ingest_response(&response(json!([good_candidate()])), "P0379", "m", "t", 20)
            .unwrap();
        let md = render_markdown(&file);
        assert!(md.contains("UNVERIFIED"));
        assert!(md.contains("doi:10.1234/abcd"));
        assert!(md.contains("confidence: 0.70"));
    }

    #[test]
    fn test_render_triage_checkboxes() {
        let file = ingest_response(&response(json!([good_candidate()])), "P0379", "m", "t", 20)
            .unwrap();
        let triage = render_triage(&file);
        assert!(triage.contains("- [ ] doi:10.1234/abcd"));
        assert!(triage.contains("[NEEDS_REVIEW]"));
    }

    #[test]
    fn test_prompt_block_missing_file() {
        assert!(render_prompt_block(None, 8).contains("missing candidates.json"));
    }

    #[test]
    fn test_write_outputs_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = ingest_response(&response(json!([good_candidate()])), "P0379", "m", "t", 20)
            .unwrap();
        write_outputs(dir.path(), &file).unwrap();
        let loaded = CandidatesFile::load(&dir.path().join("candidates.json")).unwrap();
        assert_eq!(loaded.candidates, file.candidates);
        assert!(dir.path().join("candidates.md").is_file());
        assert!(dir.path().join("triage.md").is_file());
    }
}
