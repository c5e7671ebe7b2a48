//! Error types for gh-advanced-security

use std::time::Duration;
use thiserror::Error;

/// Result type alias for gh-advanced-security operations
pub type Result<T> = std::result::Result<T, Error>;

/// Exit code of a strict batch run in which some items failed
pub const EXIT_BATCH_FAILED: i32 = 3;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A target argument that is neither `owner/repo` nor a bare owner name
    #[error("Invalid target '{0}'. Use 'owner/repo' for a repository or 'name' for an organization")]
    InvalidTarget(String),

    #[error("Missing required input: {0}")]
    MissingInput(String),

    /// One step of an ordered sequence failed; the remaining steps were not attempted
    #[error("Failed to {step}: {source}")]
    Step {
        step: String,
        #[source]
        source: Box<Error>,
    },

    /// A batch completed but some items failed and strict exit codes were requested
    #[error("{failed} of {total} repositories failed")]
    BatchFailed { failed: usize, total: usize },
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

impl Error {
    /// Wrap an error with the name of the step that produced it.
    pub fn in_step(self, step: impl Into<String>) -> Self {
        Error::Step {
            step: step.into(),
            source: Box::new(self),
        }
    }

    /// Process exit code for this error.
    ///
    /// 2 is left to clap for usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::BatchFailed { .. } => EXIT_BATCH_FAILED,
            _ => 1,
        }
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed (401). Check GH_TOKEN or GITHUB_TOKEN: {0}")]
    Unauthorized(String),

    #[error("Access denied (403): {0}")]
    Forbidden(String),

    #[error("Resource not found (404): {0}")]
    NotFound(String),

    #[error("Request rejected (422): {0}")]
    Unprocessable(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimited(Duration),

    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Build the error for a non-2xx response.
    pub fn from_status(status: u16, body: String, retry_after: Option<Duration>) -> Self {
        match (status, retry_after) {
            (401, _) => ApiError::Unauthorized(body),
            // GitHub reports secondary rate limits as 403 with Retry-After
            (403, Some(wait)) => ApiError::RateLimited(wait),
            (403, None) => ApiError::Forbidden(body),
            (404, _) => ApiError::NotFound(body),
            (422, _) => ApiError::Unprocessable(body),
            (429, wait) => ApiError::RateLimited(wait.unwrap_or(Duration::from_secs(60))),
            (500..=599, _) => ApiError::Server { status, body },
            _ => ApiError::Status { status, body },
        }
    }

    /// HTTP status carried by this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Unprocessable(_) => Some(422),
            ApiError::RateLimited(_) => Some(429),
            ApiError::Server { status, .. } | ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(_) | ApiError::InvalidResponse(_) => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No GitHub token found. Set GH_TOKEN or GITHUB_TOKEN, or add `token` to the config file.")]
    MissingToken,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
