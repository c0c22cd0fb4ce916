//! Frozen statement handling

/// Extract the statement body from a frozen statement document.
///
/// The frozen file is markdown with a `## Statement` section; this returns
/// the text between that heading and the next `## ` heading. When the
/// marker is absent the whole document is returned trimmed, so callers can
/// feed partially written files through without special-casing.
pub fn extract_statement(frozen_text: &str) -> String {
    const MARKER: &str = "## Statement";
    let Some(pos) = frozen_text.find(MARKER) else {
        return frozen_text.trim().to_string();
    };
    let tail = frozen_text[pos + MARKER.len()..].trim();
    match tail.find("## ") {
        Some(end) => tail[..end].trim().to_string(),
        None => tail.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_statement_section() {
        let doc = "# Erdos Problem #379 (frozen_v1)\n\n## Source\n- somewhere\n\n## Statement\nIs it true that every large set works?\n\n## Edge cases\n- None.\n";
        assert_eq!(
            extract_statement(doc),
            "Is it true that every large set works?"
        );
    }

    #[test]
    fn test_statement_at_end() {
        let doc = "## Statement\nFinal section text.";
        assert_eq!(extract_statement(doc), "Final section text.");
    }

    #[test]
    fn test_no_marker_returns_whole_text() {
        assert_eq!(extract_statement("  just prose  "), "just prose");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(extract_statement(""), "");
    }
}
