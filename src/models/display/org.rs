//! Organization display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{or_dash, truncate_string, yes_no};
use super::repo::DetailRow;
use crate::client::models::Organization;

/// Organization row for list output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct OrgDisplay {
    #[tabled(rename = "ORGANIZATION")]
    pub login: String,

    #[tabled(rename = "SECRET SCAN (NEW)")]
    pub secret_scanning: String,

    #[tabled(rename = "PUSH PROT (NEW)")]
    pub push_protection: String,

    #[tabled(rename = "DEPENDABOT (NEW)")]
    pub dependabot_alerts: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl From<&Organization> for OrgDisplay {
    fn from(org: &Organization) -> Self {
        Self {
            login: org.login.clone(),
            secret_scanning: yes_no(org.secret_scanning_enabled_for_new_repositories),
            push_protection: yes_no(
                org.secret_scanning_push_protection_enabled_for_new_repositories,
            ),
            dependabot_alerts: yes_no(org.dependabot_alerts_enabled_for_new_repositories),
            description: truncate_string(&or_dash(org.description.as_deref()), 40),
        }
    }
}

/// Key/value rows for `show org`.
pub fn org_detail_rows(org: &Organization) -> Vec<DetailRow> {
    vec![
        DetailRow::new("Organization", org.login.clone()),
        DetailRow::new("Description", or_dash(org.description.as_deref())),
        DetailRow::new(
            "Advanced Security (new repos)",
            yes_no(org.advanced_security_enabled_for_new_repositories),
        ),
        DetailRow::new(
            "Secret Scanning (new repos)",
            yes_no(org.secret_scanning_enabled_for_new_repositories),
        ),
        DetailRow::new(
            "Push Protection (new repos)",
            yes_no(org.secret_scanning_push_protection_enabled_for_new_repositories),
        ),
        DetailRow::new(
            "Push Protection Custom Link",
            if org.secret_scanning_push_protection_custom_link_enabled {
                or_dash(org.secret_scanning_push_protection_custom_link.as_deref())
            } else {
                "--".to_string()
            },
        ),
        DetailRow::new(
            "Dependency Graph (new repos)",
            yes_no(org.dependency_graph_enabled_for_new_repositories),
        ),
        DetailRow::new(
            "Dependabot Alerts (new repos)",
            yes_no(org.dependabot_alerts_enabled_for_new_repositories),
        ),
        DetailRow::new(
            "Dependabot Security Updates (new repos)",
            yes_no(org.dependabot_security_updates_enabled_for_new_repositories),
        ),
    ]
}
