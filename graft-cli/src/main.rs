//! Graft CLI - Command line interface for graft
//!
//! Bootstraps a project by importing a template branch into the current
//! git working tree.

mod commands;
mod prompt;

use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use graft_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::ListArgs;

/// Graft: import a project template into the current repository
#[derive(Parser, Debug)]
#[command(name = "graft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Ask which template to import (pass `false` to skip the prompts)
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    guided: bool,

    /// Template repository to offer (overrides config and env)
    #[arg(long, global = true, env = "GRAFT_REPOSITORY")]
    repository: Option<String>,

    /// Path to git executable (overrides config and env)
    #[arg(long, global = true, env = "GRAFT_GIT_PATH")]
    git_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// List the templates a repository offers
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show current configuration
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.repository.clone(), cli.git_path.clone())?;

    if cli.verbose {
        tracing::info!(
            repository = %config.template.repository,
            git = %config.git.program,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("graft {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::List(args)) => {
            args.execute(cli.verbose, &config)?;
        }
        Some(Commands::Config) => {
            println!("Graft Configuration");
            println!("===================");
            println!();
            println!("Template Settings:");
            println!("  repository: {}", config.template.repository);
            println!("  reserved_branch: {}", config.template.reserved_branch);
            println!();
            println!("Git Settings:");
            println!("  program: {}", config.git.program);
            println!();
            println!("Discovery Settings:");
            println!("  scratch_dir: {}", config.discovery.scratch_dir.display());
            println!("  unique_scratch_dir: {}", config.discovery.unique_scratch_dir);
            println!();
            println!("Import Settings:");
            println!("  remote_prefix: {}", config.import.remote_prefix);
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None if cli.guided => {
            commands::import::guided(cli.verbose, &config)?;
        }
        None => {
            tracing::warn!("Non-guided mode is not implemented yet; nothing to do");
        }
    }

    Ok(())
}
