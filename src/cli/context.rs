//! Command execution context
//!
//! Builds the resolved settings, the API client and the console once, so
//! handlers receive everything they need in one value.

use std::sync::Arc;

use crate::cli::args::GlobalOptions;
use crate::client::{GitHubApi, GitHubClient, with_per_page};
use crate::config::{Config, MAX_PAGE_SIZE, Settings};
use crate::error::Result;
use crate::output::{Console, OutputMode, StdConsole};

/// Context for command execution.
///
/// The client sits behind `Arc<dyn GitHubApi>` so bulk operations can share it
/// across worker tasks and tests can swap in a mock.
pub struct CommandContext {
    /// Flags, environment and config file merged
    pub settings: Settings,
    pub client: Arc<dyn GitHubApi>,
    pub console: Arc<dyn Console>,
    pub mode: OutputMode,
}

impl CommandContext {
    /// Load config, resolve the token and build the HTTP client.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or no token is set.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?;
        let settings = Settings::resolve(config, opts.overrides())?;
        let client = GitHubClient::new(&settings)?;

        Ok(Self::with_parts(
            settings,
            Arc::new(client),
            Arc::new(StdConsole),
            opts.mode(),
        ))
    }

    pub fn with_parts(
        settings: Settings,
        client: Arc<dyn GitHubApi>,
        console: Arc<dyn Console>,
        mode: OutputMode,
    ) -> Self {
        Self {
            settings,
            client,
            console,
            mode,
        }
    }

    pub fn api(&self) -> &dyn GitHubApi {
        self.client.as_ref()
    }

    pub fn print(&self, text: &str) {
        self.console.print(text);
    }

    /// Page size for listings.
    ///
    /// An explicit size always wins. Otherwise interactive paging fills the
    /// terminal and the non-interactive modes use the API maximum.
    pub fn page_size(&self) -> usize {
        match (self.mode, self.settings.page_size) {
            (OutputMode::Interactive, _) | (_, Some(_)) => self.settings.effective_page_size(),
            _ => MAX_PAGE_SIZE,
        }
    }

    /// `path` with the listing page size applied.
    pub fn page_path(&self, path: &str) -> String {
        with_per_page(path, self.page_size())
    }

    /// The given value, or ask for it.
    pub fn require(&self, value: Option<String>, prompt: &str) -> Result<String> {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(v) => Ok(v),
            None => self.console.prompt_input(prompt),
        }
    }

    /// The given organization, the configured default, or ask for it.
    pub fn org_or_default(&self, value: Option<String>) -> Result<String> {
        let value = value.or_else(|| self.settings.default_org.clone());
        self.require(value, "Organization")
    }
}
