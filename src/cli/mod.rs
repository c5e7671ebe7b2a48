//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
pub use clap_complete::Shell;

pub mod alert;
pub mod args;
pub mod completions;
pub mod context;
pub mod dependency;
pub mod enforce;
pub mod handlers;
pub mod org;
pub mod repo;
pub mod report;
pub mod sarif;

pub use args::{GlobalOptions, OwnerArg, RepoArg, TargetArg};
pub use context::CommandContext;

use crate::enforce::Feature;
use crate::report::ReportKind;

/// Manage GitHub Advanced Security features across repositories and organizations
#[derive(Parser, Debug)]
#[command(name = "gh-advanced-security")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output JSON instead of tables
    #[arg(long, short = 'j', global = true, env = "GHAS_JSON", hide_env = true)]
    pub json: bool,

    /// Rows per page (default: terminal height)
    #[arg(
        long,
        short = 'p',
        visible_alias = "page",
        global = true,
        env = "GHAS_PAGE_SIZE",
        hide_env = true
    )]
    pub page_size: Option<usize>,

    /// Print every page without pausing
    #[arg(
        long,
        short = 'a',
        visible_alias = "all",
        global = true,
        env = "GHAS_FETCH_ALL",
        hide_env = true
    )]
    pub fetch_all: bool,

    /// API base URL
    #[arg(long, global = true, env = "GHAS_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Concurrent workers for bulk operations
    #[arg(long, global = true, env = "GHAS_WORKERS", hide_env = true)]
    pub workers: Option<usize>,

    /// Exit with status 3 when any repository in a batch fails
    #[arg(long, global = true, env = "GHAS_STRICT", hide_env = true)]
    pub strict: bool,

    /// Override config file location
    #[arg(long, global = true, env = "GHAS_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "GHAS_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List organizations, repositories, alerts and bypasses
    #[command(subcommand, visible_alias = "ls")]
    List(ListCommands),

    /// Show one repository or organization
    #[command(subcommand)]
    Show(ShowCommands),

    /// Enable a security feature
    #[command(visible_alias = "en")]
    Enable(FeatureArgs),

    /// Disable a security feature
    #[command(visible_alias = "dis")]
    Disable(FeatureArgs),

    /// Export alerts of every repository in an organization to CSV
    Report(ReportArgs),

    /// Dependency graph exports and alerts
    #[command(subcommand, visible_alias = "dg")]
    DependencyGraph(DependencyCommands),

    /// Upload a SARIF file to code scanning
    UploadSarif(UploadSarifArgs),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   gh-advanced-security completion bash > /etc/bash_completion.d/gh-advanced-security
  zsh:    gh-advanced-security completion zsh > \"${fpath[1]}/_gh-advanced-security\"
  fish:   gh-advanced-security completion fish > ~/.config/fish/completions/gh-advanced-security.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
    /// Organizations you belong to
    #[command(visible_alias = "organizations")]
    Orgs,

    /// Repositories of an organization (or user with --user)
    #[command(visible_alias = "repositories")]
    Repos {
        #[command(flatten)]
        owner: OwnerArg,

        /// Treat the name as a user account
        #[arg(long, short = 'u')]
        user: bool,
    },

    /// Security alerts of a repository
    Alerts {
        /// Alert type
        #[arg(value_enum)]
        kind: ReportKind,

        #[command(flatten)]
        repo: RepoArg,
    },

    /// Push protection bypasses of a repository
    Bypasses {
        #[command(flatten)]
        repo: RepoArg,
    },
}

#[derive(Subcommand, Debug)]
pub enum ShowCommands {
    /// Security settings of a repository
    #[command(visible_alias = "repository")]
    Repo {
        #[command(flatten)]
        repo: RepoArg,
    },

    /// New-repository defaults of an organization
    #[command(visible_alias = "organization")]
    Org {
        #[command(flatten)]
        owner: OwnerArg,
    },
}

/// Feature plus target for `enable`/`disable`
#[derive(Args, Debug)]
pub struct FeatureArgs {
    /// Feature to change
    #[arg(value_enum)]
    pub feature: Feature,

    #[command(flatten)]
    pub target: TargetArg,

    /// For an organization, change each repository individually instead of
    /// using the organization-wide endpoints
    #[arg(long)]
    pub per_repo: bool,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Alert type
    #[arg(value_enum)]
    pub kind: ReportKind,

    #[command(flatten)]
    pub owner: OwnerArg,

    /// CSV file to write (default: {org}-{kind}-report.csv)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum DependencyCommands {
    /// Export the SPDX SBOM of a repository (always JSON)
    Sbom {
        #[command(flatten)]
        repo: RepoArg,
    },

    /// Dependabot alerts of a repository
    #[command(visible_alias = "list-alerts")]
    Alerts {
        #[command(flatten)]
        repo: RepoArg,
    },
}

#[derive(Args, Debug)]
pub struct UploadSarifArgs {
    #[command(flatten)]
    pub repo: RepoArg,

    /// SARIF file to upload
    #[arg(long, short = 'f')]
    pub file: PathBuf,

    /// Commit SHA the analysis belongs to
    #[arg(long, short = 'c')]
    pub commit: String,

    /// Git ref, e.g. refs/heads/main
    #[arg(long = "ref", short = 'r')]
    pub git_ref: String,

    /// Root of the checkout the SARIF paths are relative to
    #[arg(long)]
    pub checkout_uri: Option<String>,

    /// Tool name to associate with the analysis
    #[arg(long, short = 't')]
    pub tool: Option<String>,

    /// Validate the SARIF without creating an analysis
    #[arg(long)]
    pub validate: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_enable_parses_feature_alias_and_target() {
        let cli = Cli::try_parse_from([
            "gh-advanced-security",
            "enable",
            "pp",
            "acme/api",
            "--strict",
        ])
        .unwrap();

        assert!(cli.strict);
        match cli.command {
            Commands::Enable(args) => {
                assert_eq!(args.feature, Feature::PushProtection);
                assert_eq!(args.target.target.as_deref(), Some("acme/api"));
                assert!(!args.per_repo);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "gh-advanced-security",
            "list",
            "repos",
            "acme",
            "--json",
            "--page-size",
            "25",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.page_size, Some(25));
    }

    #[test]
    fn test_report_kind_and_output() {
        let cli = Cli::try_parse_from([
            "gh-advanced-security",
            "report",
            "secret-scanning",
            "acme",
            "-o",
            "out.csv",
        ])
        .unwrap();

        match cli.command {
            Commands::Report(args) => {
                assert_eq!(args.kind, ReportKind::SecretScanning);
                assert_eq!(args.owner.owner.as_deref(), Some("acme"));
                assert_eq!(args.output, Some(PathBuf::from("out.csv")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_upload_sarif_requires_commit_and_ref() {
        let result = Cli::try_parse_from([
            "gh-advanced-security",
            "upload-sarif",
            "acme/api",
            "--file",
            "results.sarif",
        ]);
        assert!(result.is_err());
    }
}
