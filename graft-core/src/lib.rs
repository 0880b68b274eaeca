//! Graft Core - Import a template repository branch into a git working tree
//!
//! The import runs in three steps: the branches of a template repository are
//! discovered, the user picks one of them, and the chosen branch is brought
//! into the working directory's history.

pub mod config;
pub mod discovery;
pub mod error;
pub mod git;
pub mod import;
pub mod selection;

pub use config::Config;
pub use discovery::{parse_branch_listing, BranchDiscovery, ReservedBranch};
pub use error::{Error, ExternalToolError, Result};
pub use git::{Git, GitOutput, TemporaryRemote};
pub use import::{merge_message, ImportOutcome, ImportStrategy, Importer};
pub use selection::{resolve_selection, BranchSource, Prompter, TemplateSelection, CUSTOM_CHOICE};
