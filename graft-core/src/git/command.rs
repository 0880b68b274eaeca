//! Running the git executable as an external process

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::{ExternalToolError, Result};

/// Captured output of a successful git invocation
#[derive(Debug, Clone, Default)]
pub struct GitOutput {
    /// Standard output with trailing whitespace removed
    pub stdout: String,
}

/// Handle for running git commands in a fixed working directory
///
/// Every invocation blocks until the process exits, is attempted exactly
/// once, and turns any unsuccessful exit into an [`ExternalToolError`].
#[derive(Debug, Clone)]
pub struct Git {
    program: String,
    workdir: PathBuf,
    envs: Vec<(OsString, OsString)>,
}

impl Git {
    /// Create a handle running `program` inside `workdir`
    pub fn new(program: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            workdir: workdir.into(),
            envs: Vec::new(),
        }
    }

    /// Set an extra environment variable for every invocation
    pub fn with_env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// The working directory commands run in
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run git with the given arguments
    pub fn run<I, S>(&self, args: I) -> Result<GitOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
        tracing::debug!(workdir = %self.workdir.display(), "git {}", args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ExternalToolError {
                program: self.program.clone(),
                args: args.clone(),
                code: None,
                signal: None,
                stderr: String::new(),
                launch_error: Some(e.to_string()),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(ExternalToolError {
                program: self.program.clone(),
                args,
                code: output.status.code(),
                signal: exit_signal(&output.status),
                stderr,
                launch_error: None,
            }
            .into());
        }

        if !stderr.trim().is_empty() {
            tracing::trace!("git {}: {}", args.join(" "), stderr.trim());
        }

        Ok(GitOutput { stdout })
    }

    /// Run git and report only whether it succeeded
    pub fn succeeds<I, S>(&self, args: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.run(args) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("probe failed: {}", e);
                false
            }
        }
    }
}

#[cfg(unix)]
fn exit_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: &ExitStatus) -> Option<i32> {
    None
}
