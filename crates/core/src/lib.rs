//! `nbrun` core library.
//!
//! Executes the Task B analysis notebook through `nbconvert` and checks
//! the artifacts it is expected to leave in `outputs/`. The binary entry
//! point lives in the `nbrun` crate; everything it drives is here so it can
//! be tested against fake tools.

pub mod config;
pub mod error;
pub mod execution;
pub mod orchestrator;
pub mod outputs;
pub mod paths;
pub mod preconditions;

pub use config::RunnerConfig;
pub use error::{PreconditionError, RunError};
pub use orchestrator::{NotebookOrchestrator, RunSummary};
pub use paths::ProjectPaths;
