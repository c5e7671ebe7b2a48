//! Security feature enforcement
//!
//! - [`repo`]: the requests that switch a feature on one repository
//! - [`bulk`]: the same action across many repositories with bounded workers
//! - [`org`]: organization-wide toggles plus the new-repository policy

use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use colored::Colorize;

use crate::config::{DEFAULT_DELAY_MS, DEFAULT_WORKERS, Settings};
use crate::error::{Error, Result};

pub mod bulk;
pub mod org;
pub mod repo;
pub mod target;

pub use bulk::enforce_org_repos;
pub use org::{OrgPlan, apply_org_plan};
pub use repo::apply_to_repo;
pub use target::Target;

/// A toggleable security feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Feature {
    #[value(alias = "ss")]
    SecretScanning,
    #[value(alias = "pp")]
    PushProtection,
    #[value(alias = "npp")]
    NonProviderPatterns,
    #[value(alias = "dep")]
    Dependabot,
}

impl Feature {
    pub fn label(self) -> &'static str {
        match self {
            Feature::SecretScanning => "Secret Scanning",
            Feature::PushProtection => "Push Protection",
            Feature::NonProviderPatterns => "Secret Scanning Non-Provider Patterns",
            Feature::Dependabot => "Dependabot",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Desired end state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Enable,
    Disable,
}

impl Toggle {
    /// Value of a `security_and_analysis` status
    pub fn status(self) -> &'static str {
        match self {
            Toggle::Enable => "enabled",
            Toggle::Disable => "disabled",
        }
    }

    /// Path segment of the organization enablement endpoint
    pub fn enablement(self) -> &'static str {
        match self {
            Toggle::Enable => "enable_all",
            Toggle::Disable => "disable_all",
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            Toggle::Enable => "enable",
            Toggle::Disable => "disable",
        }
    }

    pub fn is_enable(self) -> bool {
        self == Toggle::Enable
    }
}

/// Worker pool settings for bulk enforcement
#[derive(Debug, Clone, Copy)]
pub struct EnforceOptions {
    pub workers: usize,
    /// Pause each worker takes after finishing a repository
    pub pause: Duration,
}

impl Default for EnforceOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            pause: Duration::from_millis(DEFAULT_DELAY_MS),
        }
    }
}

impl From<&Settings> for EnforceOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            workers: settings.workers,
            pause: settings.delay,
        }
    }
}

/// Result of enforcing a feature on one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoOutcome {
    /// Already in the desired state; no request was sent
    AlreadySatisfied { repo: String },
    Applied { repo: String },
    Failed { repo: String, reason: String },
}

impl RepoOutcome {
    pub fn repo(&self) -> &str {
        match self {
            RepoOutcome::AlreadySatisfied { repo }
            | RepoOutcome::Applied { repo }
            | RepoOutcome::Failed { repo, .. } => repo,
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            RepoOutcome::AlreadySatisfied { .. } => "=",
            RepoOutcome::Applied { .. } => "✓",
            RepoOutcome::Failed { .. } => "✗",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, RepoOutcome::Failed { .. })
    }

    /// Colored console line for this outcome.
    pub fn colored_line(&self) -> String {
        let line = self.to_string();
        match self {
            RepoOutcome::AlreadySatisfied { .. } => line.dimmed().to_string(),
            RepoOutcome::Applied { .. } => line.green().to_string(),
            RepoOutcome::Failed { .. } => line.red().to_string(),
        }
    }
}

impl fmt::Display for RepoOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoOutcome::AlreadySatisfied { repo } => {
                write!(f, "{} {}: already in desired state", self.marker(), repo)
            }
            RepoOutcome::Applied { repo } => write!(f, "{} {}: done", self.marker(), repo),
            RepoOutcome::Failed { repo, reason } => {
                write!(f, "{} {}: {}", self.marker(), repo, reason)
            }
        }
    }
}

/// Counts over a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkSummary {
    pub total: usize,
    pub applied: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl BulkSummary {
    pub fn tally(outcomes: &[RepoOutcome]) -> Self {
        outcomes.iter().fold(
            Self {
                total: outcomes.len(),
                ..Self::default()
            },
            |mut acc, outcome| {
                match outcome {
                    RepoOutcome::AlreadySatisfied { .. } => acc.unchanged += 1,
                    RepoOutcome::Applied { .. } => acc.applied += 1,
                    RepoOutcome::Failed { .. } => acc.failed += 1,
                }
                acc
            },
        )
    }

    pub fn succeeded(&self) -> usize {
        self.applied + self.unchanged
    }

    /// `Err(BatchFailed)` when `strict` is set and anything failed.
    pub fn check(&self, strict: bool) -> Result<()> {
        if strict && self.failed > 0 {
            return Err(Error::BatchFailed {
                failed: self.failed,
                total: self.total,
            });
        }
        Ok(())
    }
}

impl fmt::Display for BulkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} succeeded ({} changed, {} already set), {} failed, {} total",
            self.succeeded(),
            self.applied,
            self.unchanged,
            self.failed,
            self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcomes() -> Vec<RepoOutcome> {
        vec![
            RepoOutcome::Applied { repo: "a/one".into() },
            RepoOutcome::AlreadySatisfied { repo: "a/two".into() },
            RepoOutcome::Failed {
                repo: "a/three".into(),
                reason: "403".into(),
            },
            RepoOutcome::Applied { repo: "a/four".into() },
        ]
    }

    #[test]
    fn test_tally_counts_each_variant() {
        let summary = BulkSummary::tally(&outcomes());
        assert_eq!(
            summary,
            BulkSummary {
                total: 4,
                applied: 2,
                unchanged: 1,
                failed: 1
            }
        );
        assert_eq!(summary.succeeded(), 3);
    }

    #[test]
    fn test_check_is_lenient_unless_strict() {
        let summary = BulkSummary::tally(&outcomes());
        assert!(summary.check(false).is_ok());
        assert!(matches!(
            summary.check(true),
            Err(Error::BatchFailed { failed: 1, total: 4 })
        ));
        assert!(BulkSummary::default().check(true).is_ok());
    }

    #[test]
    fn test_outcome_lines_lead_with_marker() {
        let lines: Vec<String> = outcomes().iter().map(|o| o.to_string()).collect();
        assert!(lines[0].starts_with("✓ a/one"));
        assert!(lines[1].starts_with("= a/two"));
        assert!(lines[2].starts_with("✗ a/three"));
        assert!(lines[2].ends_with("403"));
    }

    #[test]
    fn test_toggle_strings() {
        assert_eq!(Toggle::Enable.status(), "enabled");
        assert_eq!(Toggle::Disable.enablement(), "disable_all");
    }
}
