use std::path::PathBuf;

use crate::execution::runner::ExecError;

/// Process exit code for every fatal outcome.
pub const EXIT_FAILURE: u8 = 1;

/// Fatal conditions found before the notebook is executed.
#[derive(Debug, thiserror::Error)]
pub enum PreconditionError {
    #[error("could not create outputs directory {}: {source}", .path.display())]
    OutputsDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("notebooks/ directory not found at expected location: {}", .0.display())]
    NotebooksDirMissing(PathBuf),

    #[error("notebook not found: {}", .0.display())]
    NotebookMissing(PathBuf),
}

/// Any condition that terminates a run early.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error("notebook execution failed: {0}")]
    Execution(#[from] ExecError),
}

impl RunError {
    /// Exit code the process should terminate with.
    pub fn exit_code(&self) -> u8 {
        EXIT_FAILURE
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
