//! Error types for graft

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for graft operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for graft operations
#[derive(Error, Debug)]
pub enum Error {
    /// An external program exited unsuccessfully or could not be launched
    #[error(transparent)]
    ExternalTool(Box<ExternalToolError>),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The fixed scratch directory is already present on disk
    #[error(
        "Scratch directory {} already exists. A previous run may have been interrupted; remove it and try again.",
        .0.display()
    )]
    ScratchDirOccupied(PathBuf),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Interactive prompt error
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// A repository offered no branches to choose from
    #[error("Repository {0} has no branches to import")]
    NoBranches(String),

    /// The operation succeeded but releasing a temporary resource failed
    #[error("Operation completed, but cleanup failed: {0}")]
    Cleanup(Box<Error>),

    /// The operation failed and releasing a temporary resource failed as well
    #[error("{primary} (cleanup also failed: {cleanup})")]
    CleanupAfterFailure {
        /// The error raised by the operation itself
        primary: Box<Error>,
        /// The error raised while releasing the resource
        cleanup: Box<Error>,
    },
}

impl Error {
    /// Whether this error (ignoring cleanup wrappers) came from an external tool
    pub fn is_external_tool(&self) -> bool {
        matches!(self.primary(), Error::ExternalTool(_))
    }

    /// The operation's own error, unwrapping cleanup reconciliation.
    ///
    /// For [`Error::Cleanup`] the operation itself succeeded, so the cleanup
    /// error is returned.
    pub fn primary(&self) -> &Error {
        match self {
            Error::CleanupAfterFailure { primary, .. } => primary.primary(),
            Error::Cleanup(cleanup) => cleanup.primary(),
            other => other,
        }
    }
}

impl From<ExternalToolError> for Error {
    fn from(err: ExternalToolError) -> Self {
        Error::ExternalTool(Box::new(err))
    }
}

/// Failure details of an external program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalToolError {
    /// Program that was run
    pub program: String,
    /// Arguments passed to the program
    pub args: Vec<String>,
    /// Exit code, if the program exited normally
    pub code: Option<i32>,
    /// Terminating signal, if the program was killed
    pub signal: Option<i32>,
    /// Captured standard error output
    pub stderr: String,
    /// Why the program could not be started, if it never ran
    pub launch_error: Option<String>,
}

impl ExternalToolError {
    /// The command line as a single display string
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ExternalToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let command = self.command_line();

        if let Some(ref launch) = self.launch_error {
            return write!(f, "Failed to run `{}`: {}", command, launch);
        }

        match (self.code, self.signal) {
            (Some(code), _) => write!(f, "`{}` exited with status {}", command, code)?,
            (None, Some(signal)) => write!(f, "`{}` was terminated by signal {}", command, signal)?,
            (None, None) => write!(f, "`{}` failed", command)?,
        }

        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            write!(f, ": {}", stderr)?;
        }

        Ok(())
    }
}

impl std::error::Error for ExternalToolError {}

/// Combine an operation's result with the result of releasing its resources.
///
/// Neither error is dropped: a failed release after a failed operation keeps
/// both, and a failed release after a successful operation is reported as
/// [`Error::Cleanup`] so callers can tell the two apart.
pub(crate) fn with_cleanup<T>(outcome: Result<T>, cleanup: Result<()>) -> Result<T> {
    match (outcome, cleanup) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(cleanup)) => Err(Error::Cleanup(Box::new(cleanup))),
        (Err(primary), Ok(())) => Err(primary),
        (Err(primary), Err(cleanup)) => Err(Error::CleanupAfterFailure {
            primary: Box::new(primary),
            cleanup: Box::new(cleanup),
        }),
    }
}
