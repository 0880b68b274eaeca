//! Git operations for graft
//!
//! All repository work goes through the `git` executable; this module wraps
//! process execution and the temporary remote registration used by imports.

mod command;
mod remote;

pub use command::{Git, GitOutput};
pub use remote::TemporaryRemote;
