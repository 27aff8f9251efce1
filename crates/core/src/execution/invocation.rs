//! Command lines for running `nbconvert`, and the order they are tried in.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use super::locator::ToolLocator;

/// `nbconvert` options requesting in-place execution with no format change.
pub const NBCONVERT_OPTIONS: [&str; 4] = ["--to", "notebook", "--execute", "--inplace"];

/// A fully resolved program plus arguments, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// One way of reaching `nbconvert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationStrategy {
    /// `<launcher> nbconvert ...`, usable only when the launcher is on the
    /// search path.
    Launcher { program: String },
    /// `<interpreter> -m nbconvert ...`. Always usable.
    InterpreterModule { interpreter: String },
}

impl InvocationStrategy {
    /// Build the command for `notebook`, or `None` if this strategy is not
    /// available on this machine.
    pub fn prepare<L>(&self, locator: &L, notebook: &Path) -> Option<Invocation>
    where
        L: ToolLocator + ?Sized,
    {
        match self {
            Self::Launcher { program } => {
                let launcher = locator.locate(program)?;
                let mut args = vec![OsString::from("nbconvert")];
                args.extend(nbconvert_args(notebook));
                Some(Invocation {
                    program: launcher,
                    args,
                })
            }
            Self::InterpreterModule { interpreter } => {
                // Fall back to the bare name and let the OS resolve it at spawn.
                let program = locator
                    .locate(interpreter)
                    .unwrap_or_else(|| PathBuf::from(interpreter));
                let mut args = vec![OsString::from("-m"), OsString::from("nbconvert")];
                args.extend(nbconvert_args(notebook));
                Some(Invocation { program, args })
            }
        }
    }
}

/// Pick the first available strategy. Availability is checked once per
/// strategy; nothing is executed here.
pub fn select_invocation<L>(
    strategies: &[InvocationStrategy],
    locator: &L,
    notebook: &Path,
) -> Option<Invocation>
where
    L: ToolLocator + ?Sized,
{
    strategies.iter().find_map(|strategy| {
        let invocation = strategy.prepare(locator, notebook);
        if invocation.is_none() {
            tracing::debug!(?strategy, "Notebook tool strategy unavailable");
        }
        invocation
    })
}

fn nbconvert_args(notebook: &Path) -> impl Iterator<Item = OsString> + '_ {
    NBCONVERT_OPTIONS
        .into_iter()
        .map(OsString::from)
        .chain(std::iter::once(notebook.as_os_str().to_os_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
