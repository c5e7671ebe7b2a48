//! Configuration management for gh-advanced-security
//!
//! Settings come from `~/.gh-advanced-security.yaml` (optional), environment
//! variables and CLI flags. The file only supplies defaults; flags and `GHAS_*`
//! variables are resolved by clap before they reach [`Settings::resolve`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// GitHub REST API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Largest `per_page` GitHub accepts
pub const MAX_PAGE_SIZE: usize = 100;

/// Page size used when neither a flag nor the terminal gives us one
pub const FALLBACK_PAGE_SIZE: usize = 20;

/// Worker count for bulk operations
pub const DEFAULT_WORKERS: usize = 5;

/// Pause each worker takes after finishing an item
pub const DEFAULT_DELAY_MS: u64 = 100;

/// Per-request HTTP timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONFIG_FILE_NAME: &str = ".gh-advanced-security.yaml";

/// On-disk configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Organization used when a command needs one and none was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_org: Option<String>,

    /// Default page size for paginated listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,

    /// API base URL (GitHub Enterprise Server installs use `https://HOST/api/v3`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Token fallback when GH_TOKEN/GITHUB_TOKEN are unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Concurrent workers for bulk operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,

    /// Pause (ms) after each item a worker processes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,

    /// HTTP timeout per request in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Exit non-zero when any repository in a batch fails
    #[serde(default)]
    pub strict: bool,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from an explicit path or the default location.
    ///
    /// A missing file at the default location yields the default config; a
    /// missing file at an explicit path is an error.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(Path::new(p)),
            None => {
                let default = Self::default_path()?;
                if default.exists() {
                    Self::load_from(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::Invalid(format!(
                "Config file not found: {}",
                path.display()
            ))
            .into());
        }

        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        Ok(config)
    }
}

/// CLI/env layer handed to [`Settings::resolve`]
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub page_size: Option<usize>,
    pub api_url: Option<String>,
    pub workers: Option<usize>,
    pub strict: bool,
}

/// Fully resolved runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub token: String,
    pub default_org: Option<String>,
    /// `None` means "size pages to the terminal"
    pub page_size: Option<usize>,
    pub workers: usize,
    pub delay: Duration,
    pub timeout: Duration,
    pub strict: bool,
}

impl Settings {
    /// Merge flags, environment and file config. Flags win.
    pub fn resolve(config: Config, overrides: Overrides) -> Result<Self> {
        let token = token_from_env()
            .or(config.token)
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let workers = overrides
            .workers
            .or(config.workers)
            .unwrap_or(DEFAULT_WORKERS);
        if workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".to_string()).into());
        }

        Ok(Self {
            api_url: overrides
                .api_url
                .or(config.api_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            token,
            default_org: config.default_org,
            page_size: overrides.page_size.or(config.page_size),
            workers,
            delay: Duration::from_millis(config.delay_ms.unwrap_or(DEFAULT_DELAY_MS)),
            timeout: Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            strict: overrides.strict || config.strict,
        })
    }

    /// Page size for the next listing: explicit setting or terminal height.
    pub fn effective_page_size(&self) -> usize {
        optimal_page_size(self.page_size, terminal_height())
    }
}

fn token_from_env() -> Option<String> {
    ["GH_TOKEN", "GITHUB_TOKEN"]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|v| !v.trim().is_empty())
}

fn terminal_height() -> Option<usize> {
    console::Term::stdout()
        .size_checked()
        .map(|(rows, _cols)| rows as usize)
}

/// Pick a page size from the user's request or the terminal height.
///
/// Requested sizes are clamped to `1..=MAX_PAGE_SIZE`. Without a request the
/// page fills the terminal minus two lines for the header and prompt.
pub fn optimal_page_size(requested: Option<usize>, terminal_rows: Option<usize>) -> usize {
    if let Some(size) = requested.filter(|s| *s > 0) {
        return size.min(MAX_PAGE_SIZE);
    }

    match terminal_rows {
        Some(rows) if rows > 2 => (rows - 2).min(MAX_PAGE_SIZE),
        Some(_) => 10,
        None => FALLBACK_PAGE_SIZE,
    }
}
