//! Display models for CLI output

pub mod display;

pub use display::{
    BypassDisplay, CodeScanningDisplay, DependabotDisplay, DetailRow, OrgDisplay, RepoDisplay,
    SecretScanningDisplay, org_detail_rows, repo_detail_rows,
};
