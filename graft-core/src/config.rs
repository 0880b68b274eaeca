//! Configuration management for graft
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (GRAFT_*)
//! 3. Config file (~/.config/graft/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Repository that distributes the built-in templates
pub const DEFAULT_TEMPLATE_REPOSITORY: &str = "https://github.com/graft-templates/graft.git";

/// Template source settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Repository offered by default in the template prompt
    pub repository: String,

    /// Branch of the default repository that never holds a template
    pub reserved_branch: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            repository: DEFAULT_TEMPLATE_REPOSITORY.to_string(),
            reserved_branch: "main".to_string(),
        }
    }
}

/// Git executable settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitConfig {
    /// Path to the git executable
    pub program: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

/// Branch discovery settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Scratch directory for the bare clone, relative to the working directory
    pub scratch_dir: PathBuf,

    /// Append a random suffix to the scratch directory on every run
    pub unique_scratch_dir: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            scratch_dir: PathBuf::from(".graft-branches"),
            unique_scratch_dir: false,
        }
    }
}

/// Import settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Prefix of the temporary remote alias
    pub remote_prefix: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            remote_prefix: "graft-template".to_string(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Template source configuration
    pub template: TemplateConfig,

    /// Git configuration
    pub git: GitConfig,

    /// Discovery configuration
    pub discovery: DiscoveryConfig,

    /// Import configuration
    pub import: ImportConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/graft/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("graft").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - GRAFT_REPOSITORY: Default template repository
    /// - GRAFT_GIT_PATH: Path to git executable
    pub fn with_env_overrides(self) -> Self {
        self.with_cli_overrides(
            std::env::var("GRAFT_REPOSITORY").ok(),
            std::env::var("GRAFT_GIT_PATH").ok(),
        )
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, repository: Option<String>, git_path: Option<String>) -> Self {
        if let Some(repo) = repository {
            self.template.repository = repo;
        }

        if let Some(path) = git_path {
            self.git.program = path;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(repository: Option<String>, git_path: Option<String>) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(repository, git_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.template.repository, DEFAULT_TEMPLATE_REPOSITORY);
        assert_eq!(config.template.reserved_branch, "main");
        assert_eq!(config.git.program, "git");
        assert_eq!(config.discovery.scratch_dir, PathBuf::from(".graft-branches"));
        assert!(!config.discovery.unique_scratch_dir);
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::default().with_cli_overrides(
            Some("git@example.com:me/templates.git".to_string()),
            Some("/opt/git/bin/git".to_string()),
        );

        assert_eq!(config.template.repository, "git@example.com:me/templates.git");
        assert_eq!(config.git.program, "/opt/git/bin/git");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[template]
repository = "/srv/templates"
reserved_branch = "trunk"

[discovery]
scratch_dir = "tmp/branches"
unique_scratch_dir = true

[import]
remote_prefix = "starter"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.template.repository, "/srv/templates");
        assert_eq!(config.template.reserved_branch, "trunk");
        assert_eq!(config.discovery.scratch_dir, PathBuf::from("tmp/branches"));
        assert!(config.discovery.unique_scratch_dir);
        assert_eq!(config.import.remote_prefix, "starter");
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
[git]
program = "/usr/local/bin/git"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        // template settings should use defaults
        assert_eq!(config.template.repository, DEFAULT_TEMPLATE_REPOSITORY);
        assert_eq!(config.git.program, "/usr/local/bin/git");
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = Config::load_from_file(Path::new("/nonexistent/graft/config.toml"));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
