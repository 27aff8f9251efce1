//! The notebook run, start to finish.

use crate::error::RunError;
use crate::execution::invocation::{select_invocation, Invocation, InvocationStrategy};
use crate::execution::locator::ToolLocator;
use crate::execution::runner::{ExecError, ToolRunner};
use crate::outputs::{verify_outputs, OutputCheck};
use crate::paths::ProjectPaths;
use crate::preconditions::{check_preconditions, PreconditionReport};

/// Everything observed on a run that reached the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub preconditions: PreconditionReport,
    pub invocation: Invocation,
    pub outputs: OutputCheck,
}

/// Runs the notebook and checks its outputs.
///
/// Steps, in order:
/// 1. Ensure `outputs/` exists and check the input layout.
/// 2. Pick the first available `nbconvert` invocation.
/// 3. Execute the notebook in place.
/// 4. Verify the outputs, writing a placeholder report if needed.
///
/// Steps 1 and 3 can end the run; nothing is retried.
pub struct NotebookOrchestrator<L, R> {
    paths: ProjectPaths,
    strategies: Vec<InvocationStrategy>,
    locator: L,
    runner: R,
}

impl<L, R> NotebookOrchestrator<L, R>
where
    L: ToolLocator,
    R: ToolRunner,
{
    pub fn new(
        paths: ProjectPaths,
        strategies: Vec<InvocationStrategy>,
        locator: L,
        runner: R,
    ) -> Self {
        Self {
            paths,
            strategies,
            locator,
            runner,
        }
    }

    pub async fn run(&self) -> Result<RunSummary, RunError> {
        tracing::info!(path = %self.paths.project_dir.display(), "Project dir");

        // 1. Preconditions.
        let preconditions = check_preconditions(&self.paths).await?;

        // 2. Tool discovery.
        let Some(invocation) =
            select_invocation(&self.strategies, &self.locator, &self.paths.notebook_path)
        else {
            tracing::error!("No notebook execution tool is available");
            return Err(ExecError::Unavailable.into());
        };

        // 3. Execution.
        tracing::info!(command = %invocation, "Executing notebook");
        match self.runner.run(&invocation).await {
            Ok(output) => {
                tracing::info!(duration_ms = output.duration_ms, "Notebook executed successfully");
                if !output.stderr.trim().is_empty() {
                    tracing::debug!(stderr = %output.stderr.trim(), "Notebook tool diagnostics");
                }
            }
            Err(e) => {
                match &e {
                    ExecError::NonZeroExit { exit_code, stderr } => tracing::error!(
                        exit_code,
                        stderr = %stderr.trim(),
                        "Notebook execution failed; command returned non-zero exit status",
                    ),
                    ExecError::Launch { program, source } => tracing::error!(
                        program = %program,
                        error = %source,
                        "Unexpected error while running notebook",
                    ),
                    ExecError::Unavailable => {}
                }
                return Err(e.into());
            }
        }

        // 4. Output verification.
        let outputs = verify_outputs(&self.paths).await;

        tracing::info!("All done. Check the outputs/ folder for results");
        tracing::info!(
            "If anything is missing, open the notebook, run the cells manually and inspect the cells that save files"
        );

        Ok(RunSummary {
            preconditions,
            invocation,
            outputs,
        })
    }
}
