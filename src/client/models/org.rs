//! Organization models

use serde::{Deserialize, Serialize};

/// Organization resource.
///
/// `user/orgs` returns a summary without the `*_for_new_repositories` flags;
/// `GET orgs/{org}` returns the full record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    pub login: String,
    pub id: u64,
    pub url: String,
    pub description: Option<String>,
    pub dependency_graph_enabled_for_new_repositories: bool,
    pub dependabot_alerts_enabled_for_new_repositories: bool,
    pub dependabot_security_updates_enabled_for_new_repositories: bool,
    pub advanced_security_enabled_for_new_repositories: bool,
    pub secret_scanning_enabled_for_new_repositories: bool,
    pub secret_scanning_push_protection_enabled_for_new_repositories: bool,
    pub secret_scanning_push_protection_custom_link: Option<String>,
    pub secret_scanning_push_protection_custom_link_enabled: bool,
}

/// Body of `PATCH orgs/{org}`: defaults applied to repositories created later.
///
/// `None` leaves a setting untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrgPolicyUpdate {
    #[serde(
        rename = "advanced_security_enabled_for_new_repositories",
        skip_serializing_if = "Option::is_none"
    )]
    pub advanced_security: Option<bool>,

    #[serde(
        rename = "secret_scanning_enabled_for_new_repositories",
        skip_serializing_if = "Option::is_none"
    )]
    pub secret_scanning: Option<bool>,

    #[serde(
        rename = "secret_scanning_push_protection_enabled_for_new_repositories",
        skip_serializing_if = "Option::is_none"
    )]
    pub secret_scanning_push_protection: Option<bool>,

    #[serde(
        rename = "dependabot_alerts_enabled_for_new_repositories",
        skip_serializing_if = "Option::is_none"
    )]
    pub dependabot_alerts: Option<bool>,

    #[serde(
        rename = "dependabot_security_updates_enabled_for_new_repositories",
        skip_serializing_if = "Option::is_none"
    )]
    pub dependabot_security_updates: Option<bool>,

    #[serde(
        rename = "dependency_graph_enabled_for_new_repositories",
        skip_serializing_if = "Option::is_none"
    )]
    pub dependency_graph: Option<bool>,
}

impl OrgPolicyUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
