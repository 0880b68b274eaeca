//! List command - Show the branches a repository offers as templates

use clap::Args;
use graft_core::{BranchDiscovery, Config, Git};

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository to list (defaults to the configured template repository)
    #[arg(value_name = "REPOSITORY")]
    pub source: Option<String>,
}

impl ListArgs {
    /// Execute the list command
    pub fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let workdir = std::env::current_dir()?;
        let git = Git::new(config.git.program.clone(), &workdir);
        let discovery = BranchDiscovery::from_config(git, config);

        let repository = self
            .source
            .as_deref()
            .unwrap_or(&config.template.repository);

        if verbose {
            tracing::info!(repository = %repository, "Listing template branches");
        }

        let branches = discovery.discover(repository)?;
        if branches.is_empty() {
            println!("No templates found in {}", repository);
            return Ok(());
        }

        println!("Templates in {}:", repository);
        for branch in branches {
            println!("  {}", branch);
        }

        Ok(())
    }
}
