//! Command targets: a single repository or an owner scope

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// What an enforcement command acts on.
///
/// `owner/name` selects one repository; a bare name selects every repository
/// of that organization (or user). The organization-wide endpoints only exist
/// for organizations, so a user account needs per-repository enforcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Repo { owner: String, name: String },
    Owner(String),
}

impl Target {
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::MissingInput("target".to_string()));
        }

        match raw.split_once('/') {
            None => Ok(Target::Owner(raw.to_string())),
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Target::Repo {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            Some(_) => Err(Error::InvalidTarget(raw.to_string())),
        }
    }

    /// Parse a target that must name a repository.
    pub fn parse_repo(raw: &str) -> Result<(String, String), Error> {
        match Self::parse(raw)? {
            Target::Repo { owner, name } => Ok((owner, name)),
            Target::Owner(_) => Err(Error::InvalidTarget(raw.trim().to_string())),
        }
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Repo { owner, name } => write!(f, "{owner}/{name}"),
            Target::Owner(owner) => write!(f, "{owner}"),
        }
    }
}
