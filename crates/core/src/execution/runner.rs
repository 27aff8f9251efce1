//! The "execute external tool" seam.
//!
//! Defines [`ToolRunner`], implemented by [`super::subprocess::ProcessRunner`]
//! for real runs and by fakes in tests, along with [`ToolOutput`] and
//! [`ExecError`].

use super::invocation::Invocation;

/// Captured output of a tool that exited successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Why an external tool run did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The process ran and exited non-zero (`-1` when killed by a signal).
    #[error("tool exited with code {exit_code}: {stderr}")]
    NonZeroExit { exit_code: i32, stderr: String },

    /// The process could not be started or waited on.
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// No invocation strategy could be used on this machine.
    #[error("no notebook execution tool is available")]
    Unavailable,
}

/// Runs an [`Invocation`] to completion.
pub trait ToolRunner: Send + Sync {
    /// Run `invocation`, returning its output on a zero exit status.
    fn run(
        &self,
        invocation: &Invocation,
    ) -> impl std::future::Future<Output = Result<ToolOutput, ExecError>> + Send;
}

impl<T: ToolRunner + ?Sized> ToolRunner for &T {
    fn run(
        &self,
        invocation: &Invocation,
    ) -> impl std::future::Future<Output = Result<ToolOutput, ExecError>> + Send {
        (**self).run(invocation)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
