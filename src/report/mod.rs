//! Report rendering — the only layer that turns a score into bytes
//!
//! Text is the contract format: the final score with exactly two decimal
//! places and a single trailing newline, nothing else, so downstream
//! tooling can parse it blind. Json is the diagnostic format: the whole
//! [`Breakdown`], pretty-printed, for inspecting what the filter and the
//! aligner actually saw.

use std::fs;
use std::path::Path;

use crate::engine::Breakdown;
use crate::MimesisResult;

/// Output format for a comparison report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// The bare score: two decimals, one trailing newline.
    Text,
    /// The full breakdown as pretty-printed JSON.
    Json,
}

/// Renders one breakdown in the requested format.
pub fn render_report(breakdown: &Breakdown, format: ReportFormat) -> MimesisResult<String> {
    match format {
        ReportFormat::Text => Ok(format!("{:.2}\n", breakdown.score)),
        ReportFormat::Json => {
            let mut rendered = serde_json::to_string_pretty(breakdown)?;
            rendered.push('\n');
            Ok(rendered)
        }
    }
}

/// Renders one breakdown and writes it to `path`, replacing whatever was
/// there.
pub fn write_report(
    breakdown: &Breakdown,
    format: ReportFormat,
    path: &Path,
) -> MimesisResult<()> {
    let rendered = render_report(breakdown, format)?;
    fs::write(path, rendered)?;
    Ok(())
}

// ─── Tests ─────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(score: f64) -> Breakdown {
        Breakdown {
            reference_tokens: 9,
            candidate_tokens: 9,
            estimate: 0.875,
            admitted: true,
            lcs_length: Some(42),
            candidate_chars: 48,
            score,
            elapsed_ms: 3,
        }
    }

    #[test]
    fn test_text_format_is_two_decimals_and_a_newline() {
        let cases = [(100.0, "100.00\n"), (0.0, "0.00\n"), (200.0 / 3.0, "66.67\n")];
        for (score, expected) in cases {
            assert_eq!(
                render_report(&breakdown(score), ReportFormat::Text).unwrap(),
                expected
            );
        }
    }

    #[test]
    fn test_json_format_carries_the_full_breakdown() {
        let rendered = render_report(&breakdown(87.5), ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["score"], 87.5);
        assert_eq!(value["estimate"], 0.875);
        assert_eq!(value["lcs_length"], 42);
        assert_eq!(value["admitted"], true);
        assert!(rendered.ends_with('\n'));
    }

    #[test]
    fn test_json_reports_a_skipped_alignment_as_null() {
        let mut skipped = breakdown(0.0);
        skipped.admitted = false;
        skipped.lcs_length = None;
        let rendered = render_report(&skipped, ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert!(value["lcs_length"].is_null());
    }

    #[test]
    fn test_write_report_replaces_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("score.txt");
        fs::write(&path, "stale").unwrap();
        write_report(&breakdown(12.5), ReportFormat::Text, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "12.50\n");
    }
}
