//! Temporary remote registration

use super::command::Git;
use crate::Result;

/// A git remote that exists only for the duration of an import
///
/// Call [`TemporaryRemote::remove`] to release it and observe failures. If the
/// guard is dropped without being released (early return or panic), removal
/// is attempted on drop and a failure is logged.
#[derive(Debug)]
pub struct TemporaryRemote {
    git: Git,
    alias: String,
    released: bool,
}

impl TemporaryRemote {
    /// Register `repository` under a unique alias, tracking only `branch`
    pub fn add(git: &Git, prefix: &str, repository: &str, branch: &str) -> Result<Self> {
        let alias = format!("{}-{}", prefix, uuid::Uuid::new_v4().simple());

        git.run(["remote", "add", "-t", branch, alias.as_str(), repository])?;
        tracing::debug!(alias = %alias, repository = %repository, branch = %branch, "Registered temporary remote");

        Ok(Self {
            git: git.clone(),
            alias,
            released: false,
        })
    }

    /// The local alias of the remote
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Remote-tracking reference for `branch` (e.g. `alias/feature`)
    pub fn tracking_ref(&self, branch: &str) -> String {
        format!("{}/{}", self.alias, branch)
    }

    /// Remove the remote from the repository configuration
    pub fn remove(mut self) -> Result<()> {
        self.released = true;
        self.git.run(["remote", "remove", self.alias.as_str()])?;
        tracing::debug!(alias = %self.alias, "Removed temporary remote");
        Ok(())
    }
}

impl Drop for TemporaryRemote {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        if let Err(e) = self.git.run(["remote", "remove", self.alias.as_str()]) {
            tracing::warn!("Failed to remove temporary remote {}: {}", self.alias, e);
        }
    }
}
