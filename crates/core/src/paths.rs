//! Project layout resolution.
//!
//! The runner works against a fixed directory layout rooted at the
//! project directory:
//!
//! ```text
//! <root>/
//!   data/
//!   notebooks/
//!     taskB_RFQ_similarity.ipynb
//!   outputs/
//!     top3.csv
//!     README-Task B.md
//! ```

use std::path::{Path, PathBuf};

/// Directory expected to hold the notebook's input files.
pub const DATA_DIR: &str = "data";

/// Directory expected to hold the notebook.
pub const NOTEBOOKS_DIR: &str = "notebooks";

/// File name of the notebook that gets executed.
pub const NOTEBOOK_FILE: &str = "taskB_RFQ_similarity.ipynb";

/// Directory where the notebook writes its artifacts.
pub const OUTPUTS_DIR: &str = "outputs";

/// Result artifact written by the notebook. Never produced by the runner.
pub const RESULT_FILE: &str = "top3.csv";

/// Report artifact. A placeholder is written when the notebook leaves none.
pub const REPORT_FILE: &str = "README-Task B.md";

/// Every path the runner touches, derived once from the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub project_dir: PathBuf,
    pub data_dir: PathBuf,
    pub notebooks_dir: PathBuf,
    pub notebook_path: PathBuf,
    pub outputs_dir: PathBuf,
    pub result_path: PathBuf,
    pub report_path: PathBuf,
}

impl ProjectPaths {
    /// Derive the layout from `project_dir`. Pure path joining; never fails.
    pub fn resolve(project_dir: impl AsRef<Path>) -> Self {
        let project_dir = project_dir.as_ref().to_path_buf();
        let notebooks_dir = project_dir.join(NOTEBOOKS_DIR);
        let outputs_dir = project_dir.join(OUTPUTS_DIR);

        Self {
            data_dir: project_dir.join(DATA_DIR),
            notebook_path: notebooks_dir.join(NOTEBOOK_FILE),
            result_path: outputs_dir.join(RESULT_FILE),
            report_path: outputs_dir.join(REPORT_FILE),
            notebooks_dir,
            outputs_dir,
            project_dir,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
