//! JSON renderer
//!
//! Serializes the full `ReportArtifacts` for external frontends; the `--json`
//! flag routes here instead of the terminal renderer.

use crate::report::ReportArtifacts;

pub fn format_report_json(artifacts: &ReportArtifacts) -> String {
    serde_json::to_string_pretty(artifacts)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}
