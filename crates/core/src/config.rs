//! Runner configuration loaded from environment variables.
//!
//! | Variable            | Default                       | Description                              |
//! |---------------------|-------------------------------|------------------------------------------|
//! | `NBRUN_PROJECT_DIR` | directory of the executable   | Project root containing `notebooks/` etc. |
//! | `NBRUN_LAUNCHER`    | `jupyter`                     | Launcher looked up on `PATH`             |
//! | `NBRUN_PYTHON`      | `python3`                     | Interpreter used for `-m nbconvert`      |
//!
//! Empty values are treated as unset.

use std::path::PathBuf;

use crate::execution::invocation::InvocationStrategy;

pub const ENV_PROJECT_DIR: &str = "NBRUN_PROJECT_DIR";
pub const ENV_LAUNCHER: &str = "NBRUN_LAUNCHER";
pub const ENV_PYTHON: &str = "NBRUN_PYTHON";

/// Launcher tried first when it can be found on the search path.
pub const DEFAULT_LAUNCHER: &str = "jupyter";

/// Interpreter used when the launcher is not installed.
pub const DEFAULT_PYTHON: &str = "python3";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot determine the runner's install location: {0}")]
    ExecutableLocation(#[source] std::io::Error),

    #[error("executable path has no parent directory: {0}")]
    NoParentDirectory(PathBuf),
}

/// Settings for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub project_dir: PathBuf,
    pub launcher: String,
    pub python: String,
}

impl RunnerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let project_dir = match get(ENV_PROJECT_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => executable_dir()?,
        };

        Ok(Self {
            project_dir,
            launcher: get(ENV_LAUNCHER).unwrap_or_else(|| DEFAULT_LAUNCHER.to_string()),
            python: get(ENV_PYTHON).unwrap_or_else(|| DEFAULT_PYTHON.to_string()),
        })
    }

    /// Invocation strategies in the order they should be tried.
    pub fn strategies(&self) -> Vec<InvocationStrategy> {
        vec![
            InvocationStrategy::Launcher {
                program: self.launcher.clone(),
            },
            InvocationStrategy::InterpreterModule {
                interpreter: self.python.clone(),
            },
        ]
    }
}

/// Directory containing the running executable.
fn executable_dir() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(ConfigError::ExecutableLocation)?;
    exe.parent()
        .map(PathBuf::from)
        .ok_or(ConfigError::NoParentDirectory(exe))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
