//! Post-run output checks and the placeholder report.
//!
//! Nothing here is fatal. A missing result file is reported; a missing
//! report is replaced with a placeholder. An existing report is never
//! touched.

use std::path::Path;

use chrono::{DateTime, Utc};
use tokio::fs;

use crate::paths::{ProjectPaths, NOTEBOOKS_DIR, NOTEBOOK_FILE, OUTPUTS_DIR, RESULT_FILE};
use crate::preconditions::is_file;

/// State of the report file after verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStatus {
    /// The notebook (or an earlier run) left a report in place.
    Present,
    /// No report was found and a placeholder was written.
    Created,
    /// No report was found and writing the placeholder failed.
    WriteFailed(String),
}

/// Outcome of the post-run checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputCheck {
    pub result_present: bool,
    pub report: ReportStatus,
}

/// Check the result file and the report file, writing a placeholder report
/// if none exists.
pub async fn verify_outputs(paths: &ProjectPaths) -> OutputCheck {
    let result_present = is_file(&paths.result_path).await;
    if result_present {
        tracing::info!(path = %paths.result_path.display(), "Found top3 results");
    } else {
        tracing::warn!(
            path = %paths.result_path.display(),
            "top3 file not found; if the notebook should produce it, check the cell that writes {OUTPUTS_DIR}/{RESULT_FILE}",
        );
    }

    let report = if is_file(&paths.report_path).await {
        tracing::info!(path = %paths.report_path.display(), "README found in outputs");
        ReportStatus::Present
    } else {
        tracing::warn!(
            path = %paths.report_path.display(),
            "README not found; creating a default README now",
        );
        match write_default_report(&paths.report_path, Utc::now()).await {
            Ok(()) => {
                tracing::info!(path = %paths.report_path.display(), "Default README written");
                ReportStatus::Created
            }
            Err(e) => {
                tracing::error!(
                    path = %paths.report_path.display(),
                    error = %e,
                    "Could not create default README",
                );
                ReportStatus::WriteFailed(e.to_string())
            }
        }
    };

    OutputCheck {
        result_present,
        report,
    }
}

/// Write the placeholder report to `path`.
pub async fn write_default_report(
    path: &Path,
    generated_at: DateTime<Utc>,
) -> std::io::Result<()> {
    fs::write(path, default_report_text(generated_at)).await
}

/// Placeholder report body.
pub fn default_report_text(generated_at: DateTime<Utc>) -> String {
    format!(
        "# README - Task B (placeholder)\n\
         \n\
         > This file was generated automatically by `nbrun` because the notebook\n\
         > did not write a README to `{OUTPUTS_DIR}/`. Replace it with the real write-up.\n\
         \n\
         - Notebook: `{NOTEBOOKS_DIR}/{NOTEBOOK_FILE}`\n\
         - Expected results: `{OUTPUTS_DIR}/{RESULT_FILE}`\n\
         - Generated: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fs as std_fs;

    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use super::*;

    fn outputs_only() -> (tempfile::TempDir, ProjectPaths) {
        let root = tempfile::tempdir().expect("create temp dir");
        let paths = ProjectPaths::resolve(root.path());
        std_fs::create_dir(&paths.outputs_dir).expect("mkdir outputs");
        (root, paths)
    }

    #[test]
    fn placeholder_is_labelled_and_names_artifacts() {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        let text = default_report_text(at);

        assert!(text.starts_with("# README - Task B (placeholder)\n"));
        assert!(text.contains("notebooks/taskB_RFQ_similarity.ipynb"));
        assert!(text.contains("outputs/top3.csv"));
        assert!(text.contains("Generated: 2026-03-14 09:26:53 UTC"));
    }

    #[tokio::test]
    async fn missing_report_gets_placeholder() {
        let (_root, paths) = outputs_only();

        let check = verify_outputs(&paths).await;

        assert!(!check.result_present);
        assert_eq!(check.report, ReportStatus::Created);
        let written = std_fs::read_to_string(&paths.report_path).expect("read report");
        assert!(written.contains("placeholder"));
    }

    #[tokio::test]
    async fn existing_report_is_left_untouched() {
        let (_root, paths) = outputs_only();
        let original = b"# Findings\n\nHand-written \xe2\x9c\x85\n";
        std_fs::write(&paths.report_path, original).expect("write report");
        std_fs::write(&paths.result_path, "rfq_id,match\n").expect("write result");

        let check = verify_outputs(&paths).await;

        assert!(check.result_present);
        assert_eq!(check.report, ReportStatus::Present);
        assert_eq!(std_fs::read(&paths.report_path).expect("read"), original);
    }

    #[tokio::test]
    async fn write_failure_is_reported_not_raised() {
        let root = tempfile::tempdir().expect("create temp dir");
        // No outputs/ directory, so the placeholder cannot be written.
        let paths = ProjectPaths::resolve(root.path());

        let check = verify_outputs(&paths).await;

        assert_matches!(check.report, ReportStatus::WriteFailed(_));
        assert!(!paths.report_path.exists());
    }
}
