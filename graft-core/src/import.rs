//! Importing a template branch into the working tree
//!
//! The working directory is initialized as a repository if needed, the
//! template repository is registered as a temporary remote, and its branch is
//! brought in with one of two strategies:
//!
//! - **fresh checkout** when the working directory has no history yet: the
//!   branch is pulled straight into the current branch, without a merge
//!   commit
//! - **merge** otherwise: the branch is merged with unrelated histories
//!   allowed, keeping the existing commits as ancestors
//!
//! The temporary remote is removed whatever the outcome.

use crate::config::Config;
use crate::error::with_cleanup;
use crate::git::{Git, TemporaryRemote};
use crate::selection::TemplateSelection;
use crate::Result;

/// Strategy used to bring the template into the working tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStrategy {
    /// History was empty; the branch was pulled into `into_branch`
    FreshCheckout {
        /// Branch of the working directory that received the template
        into_branch: String,
    },
    /// History existed; a merge commit was created
    Merge {
        /// Message of the merge commit
        message: String,
    },
}

/// Result of a successful import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    /// What was imported
    pub selection: TemplateSelection,
    /// How it was imported
    pub strategy: ImportStrategy,
}

/// Imports template branches into a working directory
#[derive(Debug, Clone)]
pub struct Importer {
    git: Git,
    remote_prefix: String,
}

impl Importer {
    /// Create an importer operating on the git handle's working directory
    pub fn new(git: Git, remote_prefix: impl Into<String>) -> Self {
        Self {
            git,
            remote_prefix: remote_prefix.into(),
        }
    }

    /// Build an importer from configuration
    pub fn from_config(git: Git, config: &Config) -> Self {
        Self::new(git, config.import.remote_prefix.clone())
    }

    /// Import `selection` into the working directory
    pub fn import(&self, selection: &TemplateSelection) -> Result<ImportOutcome> {
        tracing::info!(
            repository = %selection.repository,
            branch = %selection.branch,
            "Importing template"
        );

        self.git.run(["init"])?;

        let remote = TemporaryRemote::add(
            &self.git,
            &self.remote_prefix,
            &selection.repository,
            &selection.branch,
        )?;
        let outcome = self.bring_in(&remote, selection);
        let strategy = with_cleanup(outcome, remote.remove())?;

        tracing::info!(
            "Template {} imported. See the project's README for next steps.",
            selection.branch
        );

        Ok(ImportOutcome {
            selection: selection.clone(),
            strategy,
        })
    }

    /// Whether the working directory has no commits
    ///
    /// Any failure to read the log counts as empty history, so a corrupt or
    /// unreadable repository is treated the same way as a fresh one.
    pub fn history_is_empty(&self) -> bool {
        !self.git.succeeds(["--no-pager", "log", "--max-count=1"])
    }

    fn bring_in(&self, remote: &TemporaryRemote, selection: &TemplateSelection) -> Result<ImportStrategy> {
        self.git.run(["fetch", "--all"])?;

        if self.history_is_empty() {
            let current = self.git.run(["branch", "--show-current"])?.stdout;
            let refspec = format!("{}:{}", selection.branch, current.trim());

            tracing::debug!(into = %current, "Empty history, pulling template directly");
            self.git.run([
                "pull",
                "--no-commit",
                "--depth",
                "1",
                remote.alias(),
                refspec.as_str(),
            ])?;

            return Ok(ImportStrategy::FreshCheckout {
                into_branch: current.trim().to_string(),
            });
        }

        let message = merge_message(selection);
        let tracking = remote.tracking_ref(&selection.branch);

        tracing::debug!(tracking = %tracking, "Existing history, merging template");
        self.git.run([
            "merge",
            tracking.as_str(),
            "--allow-unrelated-histories",
            "--autostash",
            "-m",
            message.as_str(),
            "--no-stat",
        ])?;

        Ok(ImportStrategy::Merge { message })
    }
}

/// Commit message of the merge that brings a template into existing history
pub fn merge_message(selection: &TemplateSelection) -> String {
    format!(
        "Merge template branch '{}' from {}",
        selection.branch, selection.repository
    )
}
