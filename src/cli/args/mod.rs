//! Shared CLI argument types
//!
//! Reusable argument structs that are flattened into commands with
//! `#[command(flatten)]`.

mod global;
mod target;

pub use global::GlobalOptions;
pub use target::{OwnerArg, RepoArg, TargetArg};
