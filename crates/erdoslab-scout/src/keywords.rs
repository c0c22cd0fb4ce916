//! Keyword extraction from frozen statements

use std::collections::HashMap;

/// Words too common to be useful search keywords.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "in", "is", "it",
    "its", "of", "on", "or", "that", "the", "their", "this", "to", "was", "were", "with",
    "without", "true",
];

/// Extract ranked keywords from a statement.
///
/// TeX math spans (`$...$`) and commands (`\frac`, ...) are stripped before
/// tokenizing; tokens shorter than four characters and stopwords are
/// dropped; the rest are ranked by frequency, ties broken alphabetically.
pub fn extract_keywords(text: &str, limit: usize) -> Vec<String> {
    let cleaned = strip_tex(text);
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in tokenize(&cleaned) {
        if token.len() < 4 {
            continue;
        }
        *counts.entry(token).or_insert(0) += 1;
    }
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().take(limit).map(|(t, _)| t).collect()
}

/// Lowercase alphanumeric tokens with stopwords removed.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if c.is_alphanumeric() {
            current.extend(c.to_lowercase());
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens.retain(|t| !STOPWORDS.contains(&t.as_str()));
    tokens
}

/// Remove `$...$` spans and `\command` sequences.
fn strip_tex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_math = false;
    while let Some(c) = chars.next() {
        match c {
            '$' => {
                in_math = !in_math;
                out.push(' ');
            }
            _ if in_math => out.push(' '),
            '\\' => {
                while chars.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
                    chars.next();
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }
    out
}

/// Best-effort ASCII projection of a string (drops other characters).
pub fn ascii_safe(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}

/// Normalize a title for dedup keys: lowercase alphanumerics only.
pub fn normalize_title(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_ranked_by_frequency() {
        let text = "divisor sums and divisor chains over primes, divisor chains again";
        let keywords = extract_keywords(text, 3);
        assert_eq!(keywords[0], "divisor");
        assert_eq!(keywords[1], "chains");
    }

    #[test]
    fn test_short_tokens_and_stopwords_dropped() {
        let keywords = extract_keywords("is it true that the sum of n is odd", 10);
        assert!(!keywords.iter().any(|k| k == "the" || k == "is" || k == "sum"));
    }

    #[test]
    fn test_tex_stripped() {
        let keywords = extract_keywords(r"let $\sum_{i} a_i$ diverge for every sequence", 10);
        assert!(keywords.contains(&"diverge".to_string()));
        assert!(keywords.contains(&"sequence".to_string()));
        assert!(!keywords.iter().any(|k| k.contains("sum_")));
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_keywords("", 5).is_empty());
    }

    #[test]
    fn test_ascii_safe() {
        assert_eq!(ascii_safe("Erdős"), "Erds");
        assert_eq!(ascii_safe("plain"), "plain");
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(
            normalize_title("On a Problem of Erdős (1950)"),
            "onaproblemoferds1950"
        );
    }
}
