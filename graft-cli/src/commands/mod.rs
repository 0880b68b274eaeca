//! CLI command implementations

pub mod import;
pub mod list;

pub use list::ListArgs;
