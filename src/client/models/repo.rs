//! Repository models and security-setting payloads

use serde::{Deserialize, Serialize};

/// Owner (user or organization) embedded in repository responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Owner {
    /// Login name
    pub login: String,

    /// Numeric ID
    pub id: u64,

    /// "User" or "Organization"
    #[serde(rename = "type")]
    pub kind: String,
}

/// Repository as returned by `GET repos/{owner}/{repo}` and the repo listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub id: u64,
    pub node_id: String,
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    pub private: bool,
    pub html_url: String,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub archived: bool,
    pub disabled: bool,
    pub visibility: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,

    /// Security feature statuses. GitHub omits this block for callers without
    /// admin rights and for features the plan does not include; every status
    /// then deserializes as empty ("not available").
    pub security_and_analysis: SecurityAndAnalysis,
}

impl Repository {
    /// Owner login, falling back to the `owner/` prefix of `full_name`.
    pub fn owner_login(&self) -> &str {
        if !self.owner.login.is_empty() {
            return &self.owner.login;
        }
        self.full_name
            .split_once('/')
            .map(|(owner, _)| owner)
            .unwrap_or_default()
    }

    /// `owner/name`, built from parts when `full_name` is missing.
    pub fn slug(&self) -> String {
        if self.full_name.is_empty() {
            format!("{}/{}", self.owner_login(), self.name)
        } else {
            self.full_name.clone()
        }
    }
}

/// Status wrapper used by every `security_and_analysis` entry.
///
/// An empty string means the API did not report the feature. It is kept as
/// an empty string in JSON output and shown as a placeholder in tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Status {
    pub status: String,
}

impl Status {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }

    pub fn state(&self) -> FeatureState {
        FeatureState::parse(&self.status)
    }
}

/// Tri-state view of a feature status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureState {
    Enabled,
    Disabled,
    /// Absent from the response
    NotAvailable,
    /// Anything else GitHub reports verbatim
    Other(String),
}

impl FeatureState {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" => FeatureState::NotAvailable,
            s if s.eq_ignore_ascii_case("enabled") => FeatureState::Enabled,
            s if s.eq_ignore_ascii_case("disabled") => FeatureState::Disabled,
            s => FeatureState::Other(s.to_string()),
        }
    }

    /// Table text for this state, using `missing` for [`FeatureState::NotAvailable`].
    pub fn label_or<'a>(&'a self, missing: &'a str) -> &'a str {
        match self {
            FeatureState::Enabled => "enabled",
            FeatureState::Disabled => "disabled",
            FeatureState::NotAvailable => missing,
            FeatureState::Other(s) => s,
        }
    }
}

/// `security_and_analysis` block of a repository
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityAndAnalysis {
    pub advanced_security: Status,
    pub secret_scanning: Status,
    pub secret_scanning_non_provider_patterns: Status,
    pub secret_scanning_validity_checks: Status,
    pub secret_scanning_push_protection: Status,
    pub dependabot_security_updates: Status,
}

/// Body of `PATCH repos/{owner}/{repo}` for security settings
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepoUpdateRequest {
    pub security_and_analysis: SecurityAndAnalysisUpdate,
}

/// Only the features set to `Some` are sent
#[derive(Debug, Clone, Default, Serialize)]
pub struct SecurityAndAnalysisUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advanced_security: Option<Status>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_scanning: Option<Status>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_scanning_non_provider_patterns: Option<Status>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_scanning_push_protection: Option<Status>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependabot_security_updates: Option<Status>,
}
