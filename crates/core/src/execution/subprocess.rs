//! Process-backed [`ToolRunner`].
//!
//! Spawns the invocation with stdin closed, captures stdout/stderr and
//! waits for the child to exit. There is no timeout: a notebook runs for as
//! long as it needs.

use std::process::Stdio;
use std::time::Instant;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use super::invocation::Invocation;
use super::runner::{ExecError, ToolOutput, ToolRunner};

/// Maximum stdout or stderr size captured per stream (10 MiB).
const MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// Runs tools as child processes of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ToolOutput, ExecError> {
        let launch_error = |source| ExecError::Launch {
            program: invocation.program.display().to_string(),
            source,
        };

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let start = Instant::now();
        let mut child = cmd.spawn().map_err(launch_error)?;

        // Drain both pipes concurrently so a chatty child cannot block on a
        // full pipe while we wait on it.
        let stdout_task = tokio::spawn(read_stream(child.stdout.take()));
        let stderr_task = tokio::spawn(read_stream(child.stderr.take()));

        let status = child.wait().await.map_err(launch_error)?;
        let duration_ms = start.elapsed().as_millis() as u64;

        let stdout_bytes = stdout_task.await.unwrap_or_default();
        let stderr_bytes = stderr_task.await.unwrap_or_default();
        let stdout = String::from_utf8_lossy(&stdout_bytes).into_owned();
        let stderr = String::from_utf8_lossy(&stderr_bytes).into_owned();

        if !status.success() {
            return Err(ExecError::NonZeroExit {
                exit_code: status.code().unwrap_or(-1),
                stderr,
            });
        }

        Ok(ToolOutput {
            stdout,
            stderr,
            duration_ms,
        })
    }
}

/// Read an entire output stream into a byte buffer, capped at [`MAX_OUTPUT_BYTES`].
async fn read_stream<R: AsyncRead + Unpin>(handle: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut h) = handle {
        let _ = (&mut h)
            .take(MAX_OUTPUT_BYTES as u64)
            .read_to_end(&mut buf)
            .await;
    }
    buf
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(all(test, unix))]
mod tests {
    use std::ffi::OsString;
    use std::path::PathBuf;

    use assert_matches::assert_matches;

    use super::*;

    /// Helper to create a temporary shell script from the given body.
    fn write_temp_script(body: &str) -> tempfile::NamedTempFile {
        use std::io::Write;
        let mut f = tempfile::Builder::new()
            .suffix(".sh")
            .tempfile()
            .expect("create temp file");
        writeln!(f, "#!/bin/bash").expect("write shebang");
        write!(f, "{body}").expect("write body");
        f
    }

    fn bash(script: &tempfile::NamedTempFile, extra: &[&str]) -> Invocation {
        let mut args = vec![OsString::from(script.path())];
        args.extend(extra.iter().map(OsString::from));
        Invocation {
            program: PathBuf::from("bash"),
            args,
        }
    }

    #[tokio::test]
    async fn captures_output_on_success() {
        let script = write_temp_script("echo converted\necho progress >&2\n");
        let output = ProcessRunner
            .run(&bash(&script, &[]))
            .await
            .expect("run");

        assert_eq!(output.stdout.trim(), "converted");
        assert_eq!(output.stderr.trim(), "progress");
    }

    #[tokio::test]
    async fn passes_arguments_through() {
        let script = write_temp_script("echo \"$1|$2\"\n");
        let output = ProcessRunner
            .run(&bash(&script, &["--inplace", "Task B.ipynb"]))
            .await
            .expect("run");

        assert_eq!(output.stdout.trim(), "--inplace|Task B.ipynb");
    }

    #[tokio::test]
    async fn non_zero_exit_is_an_error_with_stderr() {
        let script = write_temp_script("echo 'CellExecutionError' >&2\nexit 42\n");
        let result = ProcessRunner.run(&bash(&script, &[])).await;

        assert_matches!(
            result,
            Err(ExecError::NonZeroExit { exit_code: 42, ref stderr }) if stderr.contains("CellExecutionError")
        );
    }

    #[tokio::test]
    async fn missing_program_is_a_launch_error() {
        let invocation = Invocation {
            program: PathBuf::from("/nonexistent/jupyter"),
            args: vec![],
        };
        let result = ProcessRunner.run(&invocation).await;

        assert_matches!(result, Err(ExecError::Launch { ref program, .. }) if program == "/nonexistent/jupyter");
    }

    #[tokio::test]
    async fn stdin_is_closed() {
        // `cat` would block forever on an inherited terminal.
        let script = write_temp_script("cat\necho done\n");
        let output = ProcessRunner
            .run(&bash(&script, &[]))
            .await
            .expect("run");

        assert_eq!(output.stdout.trim(), "done");
    }
}
