//! Display model implementations for table output
//!
//! Display models turn API resources into table rows. JSON output serializes
//! the API resources directly, so missing statuses stay empty there.

mod alert;
mod common;
mod org;
mod repo;

pub use alert::{BypassDisplay, CodeScanningDisplay, DependabotDisplay, SecretScanningDisplay};
pub use org::{OrgDisplay, org_detail_rows};
pub use repo::{DetailRow, RepoDisplay, repo_detail_rows};
