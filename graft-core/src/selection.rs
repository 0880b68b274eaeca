//! Resolving discovery results and user choices into a template selection

use std::fmt;

use crate::discovery::BranchDiscovery;
use crate::{Error, Result};

/// Choice appended to the template list for importing from another repository
pub const CUSTOM_CHOICE: &str = "custom";

/// A concrete branch of a concrete repository to import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSelection {
    /// Repository location, passed to git unchanged
    pub repository: String,
    /// Branch to import
    pub branch: String,
}

impl TemplateSelection {
    /// Create a new selection
    pub fn new(repository: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            branch: branch.into(),
        }
    }
}

impl fmt::Display for TemplateSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.branch, self.repository)
    }
}

/// Interactive input collaborator
pub trait Prompter {
    /// Offer `items` and return the index of the chosen one
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize>;

    /// Ask for a line of free text
    fn input(&mut self, prompt: &str) -> Result<String>;
}

/// Where template branches come from
pub trait BranchSource {
    /// Repository offered by default
    fn default_repository(&self) -> Result<&str>;

    /// Template branches of `repository`, with reserved branches hidden
    fn discover(&self, repository: &str) -> Result<Vec<String>>;

    /// Every branch of `repository`
    fn discover_all(&self, repository: &str) -> Result<Vec<String>>;
}

impl BranchSource for BranchDiscovery {
    fn default_repository(&self) -> Result<&str> {
        self.reserved()
            .map(|r| r.repository.as_str())
            .filter(|repo| !repo.trim().is_empty())
            .ok_or_else(|| Error::Config("No default template repository configured".to_string()))
    }

    fn discover(&self, repository: &str) -> Result<Vec<String>> {
        BranchDiscovery::discover(self, repository)
    }

    fn discover_all(&self, repository: &str) -> Result<Vec<String>> {
        BranchDiscovery::discover_all(self, repository)
    }
}

/// Ask the user which template to import
///
/// The default repository's templates are offered together with a trailing
/// [`CUSTOM_CHOICE`]. Choosing it asks for a repository location and then
/// for one of that repository's branches.
pub fn resolve_selection<P, S>(prompter: &mut P, source: &S) -> Result<TemplateSelection>
where
    P: Prompter + ?Sized,
    S: BranchSource + ?Sized,
{
    let default_repo = source.default_repository()?.to_string();
    let mut choices = source.discover(&default_repo)?;
    let custom_index = choices.len();
    choices.push(CUSTOM_CHOICE.to_string());

    let chosen = prompter.select("Which template would you like to use?", &choices)?;
    if chosen < custom_index {
        let branch = choices.swap_remove(chosen);
        return Ok(TemplateSelection::new(default_repo, branch));
    }
    if chosen > custom_index {
        return Err(Error::Prompt(format!("Choice {} is out of range", chosen)));
    }

    let repository = prompter
        .input("Which repository would you like to use?")?
        .trim()
        .to_string();
    tracing::debug!(repository = %repository, "Using custom template repository");

    let mut branches = source.discover_all(&repository)?;
    if branches.is_empty() {
        return Err(Error::NoBranches(repository));
    }

    let chosen = prompter.select("Which branch would you like to use?", &branches)?;
    if chosen >= branches.len() {
        return Err(Error::Prompt(format!("Choice {} is out of range", chosen)));
    }

    let branch = branches.swap_remove(chosen);
    Ok(TemplateSelection::new(repository, branch))
}
