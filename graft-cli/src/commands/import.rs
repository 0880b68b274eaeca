//! Guided import - pick a template interactively and import it

use console::style;
use graft_core::{resolve_selection, BranchDiscovery, Config, Git, ImportOutcome, ImportStrategy, Importer};

use crate::prompt::TerminalPrompter;

/// Run the interactive template import in the current directory
pub fn guided(verbose: bool, config: &Config) -> anyhow::Result<()> {
    let workdir = std::env::current_dir()?;
    let git = Git::new(config.git.program.clone(), &workdir);

    if verbose {
        tracing::info!(
            workdir = %workdir.display(),
            repository = %config.template.repository,
            "Starting guided import"
        );
    }

    let discovery = BranchDiscovery::from_config(git.clone(), config);
    let mut prompter = TerminalPrompter::new();
    let selection = resolve_selection(&mut prompter, &discovery)?;

    let importer = Importer::from_config(git, config);
    let outcome = importer.import(&selection)?;

    print_success(&outcome);
    Ok(())
}

/// Print the completion notice with next steps
fn print_success(outcome: &ImportOutcome) {
    println!();
    println!(
        "{} {}",
        style("✓ Imported template").green().bold(),
        style(&outcome.selection.branch).cyan().bold()
    );
    match outcome.strategy {
        ImportStrategy::FreshCheckout { ref into_branch } => {
            println!("  Checked out into branch {}", style(into_branch).cyan());
        }
        ImportStrategy::Merge { ref message } => {
            println!("  Merged with commit \"{}\"", style(message).dim());
        }
    }
    println!();
    println!(
        "{}",
        style("Read the template's README for next steps.").bold()
    );
}
