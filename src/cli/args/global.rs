//! Global CLI options shared across all commands
//!
//! One struct carries every global flag so handler signatures stay short.

use crate::cli::Cli;
use crate::config::Overrides;
use crate::output::OutputMode;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct holds
/// the flag/env layer; the config file is merged in `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Print one JSON document instead of tables
    pub json: bool,

    /// Rows per page (defaults to the terminal height)
    pub page_size: Option<usize>,

    /// Print every page without asking
    pub fetch_all: bool,

    /// API base URL (GitHub Enterprise Server or a test server)
    pub api_url: Option<String>,

    /// Concurrent workers for bulk operations
    pub workers: Option<usize>,

    /// Exit with status 3 when any repository in a batch fails
    pub strict: bool,

    /// Custom config file path (defaults to ~/.gh-advanced-security.yaml)
    pub config: Option<String>,
}

impl GlobalOptions {
    /// Called once in main.rs after parsing.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json: cli.json,
            page_size: cli.page_size,
            fetch_all: cli.fetch_all,
            api_url: cli.api_url.clone(),
            workers: cli.workers,
            strict: cli.strict,
            config: cli.config.clone(),
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn mode(&self) -> OutputMode {
        OutputMode::from_flags(self.json, self.fetch_all)
    }

    /// The flag/env layer for settings resolution.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            page_size: self.page_size,
            api_url: self.api_url.clone(),
            workers: self.workers,
            strict: self.strict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_and_overrides() {
        let opts = GlobalOptions {
            json: true,
            page_size: Some(30),
            workers: Some(2),
            strict: true,
            api_url: Some("http://localhost:8080".to_string()),
            ..GlobalOptions::default()
        };

        assert_eq!(opts.mode(), OutputMode::Json);
        let overrides = opts.overrides();
        assert_eq!(overrides.page_size, Some(30));
        assert_eq!(overrides.workers, Some(2));
        assert!(overrides.strict);
        assert_eq!(overrides.api_url.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn test_defaults_are_interactive() {
        let opts = GlobalOptions::default();
        assert_eq!(opts.mode(), OutputMode::Interactive);
        assert_eq!(opts.config_ref(), None);
    }
}
