//! Timestamp helpers

use chrono::Utc;

/// RFC3339 UTC timestamp with second precision (`2025-01-01T12:00:00Z`).
pub fn now_iso() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Compact UTC run id (`20250101T120000Z`).
pub fn run_id_now() -> String {
    Utc::now().format("%Y%m%dT%H%M%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_iso_shape() {
        let ts = now_iso();
        assert_eq!(ts.len(), 20);
        assert!(ts.ends_with('Z'));
        assert_eq!(&ts[4..5], "-");
    }

    #[test]
    fn test_run_id_shape() {
        let id = run_id_now();
        assert_eq!(id.len(), 16);
        assert!(id.ends_with('Z'));
        assert!(id.contains('T'));
    }
}
