//! Checks that run before the notebook is executed.
//!
//! The outputs directory is created first, then the data directory,
//! notebooks directory and notebook file are checked in that order. Only
//! the last two are fatal.

use std::path::Path;

use tokio::fs;

use crate::error::PreconditionError;
use crate::paths::{ProjectPaths, NOTEBOOK_FILE};

/// What the checks observed on a run that may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreconditionReport {
    /// The outputs directory did not exist and was created.
    pub outputs_created: bool,
    /// The data directory exists.
    pub data_dir_present: bool,
}

/// Run every precondition in order, stopping at the first fatal one.
pub async fn check_preconditions(
    paths: &ProjectPaths,
) -> Result<PreconditionReport, PreconditionError> {
    let outputs_created = ensure_outputs_dir(&paths.outputs_dir).await?;

    let data_dir_present = is_dir(&paths.data_dir).await;
    if data_dir_present {
        tracing::info!(path = %paths.data_dir.display(), "Found data/ directory");
    } else {
        tracing::warn!(
            path = %paths.data_dir.display(),
            "data/ directory not found at expected location",
        );
    }

    if !is_dir(&paths.notebooks_dir).await {
        tracing::error!(
            path = %paths.notebooks_dir.display(),
            "notebooks/ directory not found; ensure your notebook is in notebooks/ and retry",
        );
        return Err(PreconditionError::NotebooksDirMissing(
            paths.notebooks_dir.clone(),
        ));
    }

    if !is_file(&paths.notebook_path).await {
        tracing::error!(
            path = %paths.notebook_path.display(),
            expected_name = NOTEBOOK_FILE,
            "Notebook not found; make sure the file name matches the expected notebook name",
        );
        return Err(PreconditionError::NotebookMissing(
            paths.notebook_path.clone(),
        ));
    }

    Ok(PreconditionReport {
        outputs_created,
        data_dir_present,
    })
}

/// Create `outputs_dir` (and parents) if missing. Returns `true` when it
/// was created by this call.
pub async fn ensure_outputs_dir(outputs_dir: &Path) -> Result<bool, PreconditionError> {
    if is_dir(outputs_dir).await {
        return Ok(false);
    }

    fs::create_dir_all(outputs_dir)
        .await
        .map_err(|source| PreconditionError::OutputsDir {
            path: outputs_dir.to_path_buf(),
            source,
        })?;
    tracing::info!(path = %outputs_dir.display(), "Created outputs directory");
    Ok(true)
}

pub(crate) async fn is_dir(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

pub(crate) async fn is_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fs as std_fs;

    use assert_matches::assert_matches;

    use super::*;

    fn layout(with_data: bool, with_notebooks: bool, with_notebook: bool) -> tempfile::TempDir {
        let root = tempfile::tempdir().expect("create temp dir");
        let paths = ProjectPaths::resolve(root.path());
        if with_data {
            std_fs::create_dir(&paths.data_dir).expect("mkdir data");
        }
        if with_notebooks {
            std_fs::create_dir(&paths.notebooks_dir).expect("mkdir notebooks");
        }
        if with_notebook {
            std_fs::write(&paths.notebook_path, "{}").expect("write notebook");
        }
        root
    }

    #[tokio::test]
    async fn all_present_passes() {
        let root = layout(true, true, true);
        let paths = ProjectPaths::resolve(root.path());

        let report = check_preconditions(&paths).await.expect("preconditions");

        assert!(report.outputs_created);
        assert!(report.data_dir_present);
        assert!(paths.outputs_dir.is_dir());
    }

    #[tokio::test]
    async fn existing_outputs_dir_is_not_recreated() {
        let root = layout(true, true, true);
        let paths = ProjectPaths::resolve(root.path());
        std_fs::create_dir(&paths.outputs_dir).expect("mkdir outputs");
        std_fs::write(&paths.result_path, "a,b\n").expect("write result");

        let report = check_preconditions(&paths).await.expect("preconditions");

        assert!(!report.outputs_created);
        assert_eq!(
            std_fs::read_to_string(&paths.result_path).expect("read"),
            "a,b\n"
        );
    }

    #[tokio::test]
    async fn missing_data_dir_is_only_a_warning() {
        let root = layout(false, true, true);
        let paths = ProjectPaths::resolve(root.path());

        let report = check_preconditions(&paths).await.expect("preconditions");

        assert!(!report.data_dir_present);
    }

    #[tokio::test]
    async fn missing_notebooks_dir_is_fatal_after_outputs_creation() {
        let root = layout(true, false, false);
        let paths = ProjectPaths::resolve(root.path());

        let result = check_preconditions(&paths).await;

        assert_matches!(result, Err(PreconditionError::NotebooksDirMissing(ref p)) if *p == paths.notebooks_dir);
        assert!(paths.outputs_dir.is_dir());
    }

    #[tokio::test]
    async fn missing_notebook_file_is_fatal() {
        let root = layout(true, true, false);
        let paths = ProjectPaths::resolve(root.path());

        let result = check_preconditions(&paths).await;

        assert_matches!(result, Err(PreconditionError::NotebookMissing(ref p)) if *p == paths.notebook_path);
    }

    #[tokio::test]
    async fn notebook_path_that_is_a_directory_counts_as_missing() {
        let root = layout(true, true, false);
        let paths = ProjectPaths::resolve(root.path());
        std_fs::create_dir(&paths.notebook_path).expect("mkdir in place of notebook");

        let result = check_preconditions(&paths).await;

        assert_matches!(result, Err(PreconditionError::NotebookMissing(_)));
    }

    #[tokio::test]
    async fn file_in_place_of_outputs_dir_is_fatal() {
        let root = layout(true, true, true);
        let paths = ProjectPaths::resolve(root.path());
        std_fs::write(&paths.outputs_dir, "not a directory").expect("write file");

        let result = check_preconditions(&paths).await;

        assert_matches!(result, Err(PreconditionError::OutputsDir { .. }));
    }
}
