//! Positional target arguments
//!
//! Targets are optional on the command line; a missing one is prompted for.

use clap::Args;

/// `owner/repo`
#[derive(Args, Debug, Clone, Default)]
pub struct RepoArg {
    /// Repository as owner/repo
    #[arg(value_name = "OWNER/REPO")]
    pub repo: Option<String>,
}

/// Organization (or user) name
#[derive(Args, Debug, Clone, Default)]
pub struct OwnerArg {
    /// Organization name (falls back to default_org from the config file)
    #[arg(value_name = "ORG")]
    pub owner: Option<String>,
}

/// Organization or `owner/repo`
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArg {
    /// Organization name for every repository, or owner/repo for one
    #[arg(value_name = "ORG|OWNER/REPO")]
    pub target: Option<String>,
}
