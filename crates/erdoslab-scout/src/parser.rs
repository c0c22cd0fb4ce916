//! Extract JSON from pasted model responses

use serde_json::Value;

use crate::ScoutError;

/// Extract the JSON object from a pasted model response.
///
/// Models are instructed to answer with exactly one object in a single
/// ```json fence, but pasted output drifts: the fence may be unlabeled or
/// missing entirely. Tried in order: the first ```json fence, the first
/// bare ``` fence, the raw text.
pub fn extract_json_object(response: &str) -> Result<Value, ScoutError> {
    let candidates = [
        fenced_block(response, "```json"),
        fenced_block(response, "```"),
        Some(response.trim()),
    ];
    for blob in candidates.into_iter().flatten() {
        if let Ok(value) = serde_json::from_str::<Value>(blob) {
            if value.is_object() {
                return Ok(value);
            }
        }
    }
    Err(ScoutError::NoJson(summarize(response)))
}

/// The contents of the first fence opened by `marker`, if any.
fn fenced_block<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let start = find_ci(text, marker)? + marker.len();
    let rest = &text[start..];
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}

/// Case-insensitive find, so ```JSON fences also match.
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())
}

fn summarize(response: &str) -> String {
    let trimmed = response.trim();
    let mut summary: String = trimmed.chars().take(60).collect();
    if trimmed.chars().count() > 60 {
        summary.push_str("...");
    }
    summary
}
