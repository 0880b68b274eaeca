//! Fixture repositories for integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use graft_core::Git;
use tempfile::TempDir;

const IDENTITY: [(&str, &str); 4] = [
    ("GIT_AUTHOR_NAME", "Graft Tests"),
    ("GIT_AUTHOR_EMAIL", "tests@graft.invalid"),
    ("GIT_COMMITTER_NAME", "Graft Tests"),
    ("GIT_COMMITTER_EMAIL", "tests@graft.invalid"),
];

/// Run git in `dir`, panicking on failure, and return trimmed stdout
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .envs(IDENTITY)
        .current_dir(dir)
        .output()
        .expect("failed to run git");

    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A [`Git`] handle for `dir` with a fixed commit identity
pub fn git_handle(dir: &Path) -> Git {
    git_handle_with_program("git", dir)
}

/// Like [`git_handle`], running `program` instead of `git`
pub fn git_handle_with_program(program: &str, dir: &Path) -> Git {
    IDENTITY
        .iter()
        .fold(Git::new(program, dir), |git, &(key, value)| git.with_env(key, value))
}

/// Write `contents` to `dir/name`, creating parent directories
pub fn write(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

/// Stage everything in `dir` and commit it
pub fn commit_all(dir: &Path, message: &str) {
    git(dir, &["add", "-A"]);
    git(dir, &["-c", "commit.gpgsign=false", "commit", "-q", "-m", message]);
}

/// A template repository with branches `main`, `feature` and `dev`
pub struct TemplateRepo {
    dir: TempDir,
}

impl TemplateRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path();

        git(path, &["init", "-q"]);
        git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        write(path, "runner.txt", "tool code, not a template\n");
        commit_all(path, "Add runner");

        git(path, &["checkout", "-q", "-b", "feature"]);
        git(path, &["rm", "-q", "runner.txt"]);
        write(path, "README.md", "# Feature template\n");
        write(path, "src/lib.rs", "pub fn hello() {}\n");
        commit_all(path, "Feature template");

        git(path, &["checkout", "-q", "main"]);
        git(path, &["checkout", "-q", "-b", "dev"]);
        write(path, "DEV.md", "dev template\n");
        commit_all(path, "Dev template");

        git(path, &["checkout", "-q", "main"]);

        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Location string as a user would pass it to git
    pub fn url(&self) -> String {
        format!("file://{}", self.dir.path().display())
    }

    /// Tree id of `branch`
    pub fn tree_of(&self, branch: &str) -> String {
        git(self.path(), &["rev-parse", &format!("{}^{{tree}}", branch)])
    }
}

/// An empty directory to import into
pub fn workdir() -> TempDir {
    TempDir::new().unwrap()
}

/// A working directory that already has one commit
pub fn workdir_with_history() -> TempDir {
    let dir = workdir();
    git(dir.path(), &["init", "-q"]);
    write(dir.path(), "local.txt", "existing project\n");
    write(dir.path(), "notes.txt", "original notes\n");
    commit_all(dir.path(), "Existing work");
    dir
}

/// Names of the remotes configured in `dir`
pub fn remotes(dir: &Path) -> Vec<String> {
    let repo = git2::Repository::open(dir).unwrap();
    let remotes = repo.remotes().unwrap();
    remotes.iter().flatten().map(|r| r.to_string()).collect()
}

/// A location that git cannot fetch from
pub fn missing_repo_url() -> String {
    let path: PathBuf = std::env::temp_dir().join("graft-tests-missing-repo-4f1c");
    format!("file://{}", path.display())
}
