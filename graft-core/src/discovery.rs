//! Template branch discovery
//!
//! Branches are enumerated from a bare clone materialized in a scratch
//! directory under the working directory. The scratch directory is removed
//! again on every exit path.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::with_cleanup;
use crate::git::Git;
use crate::{Error, Result};

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// A branch that is never offered as a template for one specific repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedBranch {
    /// Repository location the rule applies to (compared verbatim)
    pub repository: String,
    /// Branch name to hide
    pub branch: String,
}

/// Lists the branches of a repository through a temporary bare clone
#[derive(Debug, Clone)]
pub struct BranchDiscovery {
    git: Git,
    scratch_dir: PathBuf,
    unique_scratch_dir: bool,
    reserved: Option<ReservedBranch>,
}

impl BranchDiscovery {
    /// Create a discovery using `scratch_dir` (relative paths resolve against
    /// the git working directory)
    pub fn new(git: Git, scratch_dir: impl AsRef<Path>) -> Self {
        let scratch_dir = git.workdir().join(scratch_dir);
        Self {
            git,
            scratch_dir,
            unique_scratch_dir: false,
            reserved: None,
        }
    }

    /// Build a discovery from configuration
    pub fn from_config(git: Git, config: &Config) -> Self {
        Self::new(git, &config.discovery.scratch_dir)
            .with_unique_scratch_dir(config.discovery.unique_scratch_dir)
            .with_reserved(ReservedBranch {
                repository: config.template.repository.clone(),
                branch: config.template.reserved_branch.clone(),
            })
    }

    /// Hide `reserved.branch` whenever `reserved.repository` is discovered
    pub fn with_reserved(mut self, reserved: ReservedBranch) -> Self {
        self.reserved = Some(reserved);
        self
    }

    /// Use a fresh scratch directory name per discovery
    pub fn with_unique_scratch_dir(mut self, unique: bool) -> Self {
        self.unique_scratch_dir = unique;
        self
    }

    /// The reserved-branch rule, if any
    pub fn reserved(&self) -> Option<&ReservedBranch> {
        self.reserved.as_ref()
    }

    /// List the template branches of `repository`
    ///
    /// The reserved branch is removed when `repository` is the reserved
    /// rule's repository.
    pub fn discover(&self, repository: &str) -> Result<Vec<String>> {
        let mut branches = self.discover_all(repository)?;

        if let Some(ref reserved) = self.reserved {
            if reserved.repository == repository {
                branches.retain(|b| *b != reserved.branch);
            }
        }

        Ok(branches)
    }

    /// List every branch of `repository` without applying the reserved rule
    pub fn discover_all(&self, repository: &str) -> Result<Vec<String>> {
        let scratch = ScratchDir::create(self.scratch_path())?;
        let outcome = self.list_branches(repository, scratch.path());
        let branches = with_cleanup(outcome, scratch.remove())?;

        tracing::debug!(repository = %repository, count = branches.len(), "Discovered branches");
        Ok(branches)
    }

    fn scratch_path(&self) -> PathBuf {
        if !self.unique_scratch_dir {
            return self.scratch_dir.clone();
        }

        let mut name = self.scratch_dir.clone().into_os_string();
        name.push(format!("-{}", uuid::Uuid::new_v4().simple()));
        PathBuf::from(name)
    }

    fn list_branches(&self, repository: &str, clone_dir: &Path) -> Result<Vec<String>> {
        let clone_dir = clone_dir.to_string_lossy();

        self.git.run(["clone", "--bare", repository, &*clone_dir])?;

        let git_dir = format!("--git-dir={}", clone_dir);
        let output = self
            .git
            .run([git_dir.as_str(), "branch", "-l", "--format=%(refname)"])?;

        Ok(parse_branch_listing(&output.stdout))
    }
}

/// Normalize raw `branch --format=%(refname)` output into bare branch names
///
/// Quote characters left over from shell-style format arguments are
/// stripped, blank lines are skipped and each name is returned once.
pub fn parse_branch_listing(raw: &str) -> Vec<String> {
    let mut branches: Vec<String> = Vec::new();

    for line in raw.lines() {
        let refname = line.trim().trim_matches(|c: char| c == '\'' || c == '"').trim();
        if refname.is_empty() {
            continue;
        }

        let name = refname.strip_prefix(BRANCH_REF_PREFIX).unwrap_or(refname);
        if !name.is_empty() && !branches.iter().any(|b| b == name) {
            branches.push(name.to_string());
        }
    }

    branches
}

/// Scratch directory owned by a single discovery
#[derive(Debug)]
struct ScratchDir {
    path: PathBuf,
    /// Outermost directory created for `path`; removing it removes nothing
    /// that existed before
    root: PathBuf,
    released: bool,
}

impl ScratchDir {
    /// Create the directory; an existing directory is never reused
    fn create(path: PathBuf) -> Result<Self> {
        let root = first_missing_ancestor(&path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if let Err(e) = std::fs::create_dir(&path) {
            if root != path {
                remove_quietly(&root);
            }
            return Err(if e.kind() == std::io::ErrorKind::AlreadyExists {
                Error::ScratchDirOccupied(path)
            } else {
                Error::Io(e)
            });
        }

        Ok(Self {
            path,
            root,
            released: false,
        })
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn remove(mut self) -> Result<()> {
        self.released = true;
        match std::fs::remove_dir_all(&self.root) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if !self.released {
            remove_quietly(&self.root);
        }
    }
}

/// The outermost ancestor of `path` (or `path` itself) that does not exist yet
fn first_missing_ancestor(path: &Path) -> PathBuf {
    let mut root = path;
    while let Some(parent) = root.parent() {
        if parent.as_os_str().is_empty() || parent.exists() {
            break;
        }
        root = parent;
    }
    root.to_path_buf()
}

fn remove_quietly(path: &Path) {
    if let Err(e) = std::fs::remove_dir_all(path) {
        tracing::warn!("Failed to remove scratch directory {}: {}", path.display(), e);
    }
}
