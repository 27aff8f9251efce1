//! `nbrun` -- runs the Task B notebook and checks its outputs.
//!
//! Takes no arguments. The project layout is resolved next to the
//! executable (or under `NBRUN_PROJECT_DIR`); see
//! [`nbrun_core::config`] for the environment variables.
//!
//! Exits with `0` when the run completes, warnings included, and `1` when a
//! precondition fails or the notebook cannot be executed.

use std::process::ExitCode;

use nbrun_core::execution::locator::SearchPathLocator;
use nbrun_core::execution::subprocess::ProcessRunner;
use nbrun_core::{NotebookOrchestrator, ProjectPaths, RunnerConfig};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nbrun=info,nbrun_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match RunnerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    tracing::debug!(
        launcher = %config.launcher,
        python = %config.python,
        "Notebook tool configuration",
    );

    let orchestrator = NotebookOrchestrator::new(
        ProjectPaths::resolve(&config.project_dir),
        config.strategies(),
        SearchPathLocator::from_env(),
        ProcessRunner,
    );

    match orchestrator.run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Run aborted");
            ExitCode::from(e.exit_code())
        }
    }
}
