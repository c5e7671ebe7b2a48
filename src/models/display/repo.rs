//! Repository display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{NOT_AVAILABLE_LONG, or_dash, status_or_na, truncate_string, yes_no};
use crate::client::models::{Repository, Status};

/// Repository row for list output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RepoDisplay {
    #[tabled(rename = "REPOSITORY")]
    pub full_name: String,

    #[tabled(rename = "PRIVATE")]
    pub private: String,

    #[tabled(rename = "LANGUAGE")]
    pub language: String,

    #[tabled(rename = "GHAS")]
    pub advanced_security: String,

    #[tabled(rename = "SECRET SCAN")]
    pub secret_scanning: String,

    #[tabled(rename = "NON-PROVIDER")]
    pub non_provider_patterns: String,

    #[tabled(rename = "VALIDITY")]
    pub validity_checks: String,

    #[tabled(rename = "PUSH PROT")]
    pub push_protection: String,

    #[tabled(rename = "DEPENDABOT UPD")]
    pub dependabot_security_updates: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl From<&Repository> for RepoDisplay {
    fn from(repo: &Repository) -> Self {
        let sa = &repo.security_and_analysis;
        Self {
            full_name: repo.slug(),
            private: yes_no(repo.private),
            language: or_dash(repo.language.as_deref()),
            advanced_security: status_or_na(&sa.advanced_security),
            secret_scanning: status_or_na(&sa.secret_scanning),
            non_provider_patterns: status_or_na(&sa.secret_scanning_non_provider_patterns),
            validity_checks: status_or_na(&sa.secret_scanning_validity_checks),
            push_protection: status_or_na(&sa.secret_scanning_push_protection),
            dependabot_security_updates: status_or_na(&sa.dependabot_security_updates),
            description: truncate_string(&or_dash(repo.description.as_deref()), 40),
        }
    }
}

/// Label/value pair for single-resource views
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct DetailRow {
    #[tabled(rename = "SETTING")]
    pub label: String,

    #[tabled(rename = "VALUE")]
    pub value: String,
}

impl DetailRow {
    pub fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

fn status_long(status: &Status) -> String {
    status.state().label_or(NOT_AVAILABLE_LONG).to_string()
}

/// Key/value rows for `show repo`.
pub fn repo_detail_rows(repo: &Repository) -> Vec<DetailRow> {
    let sa = &repo.security_and_analysis;
    vec![
        DetailRow::new("Repository", repo.slug()),
        DetailRow::new("Visibility", or_dash(Some(repo.visibility.as_str()))),
        DetailRow::new("URL", or_dash(Some(repo.html_url.as_str()))),
        DetailRow::new("Archived", yes_no(repo.archived)),
        DetailRow::new("Advanced Security", status_long(&sa.advanced_security)),
        DetailRow::new("Secret Scanning", status_long(&sa.secret_scanning)),
        DetailRow::new(
            "Non-Provider Patterns",
            status_long(&sa.secret_scanning_non_provider_patterns),
        ),
        DetailRow::new(
            "Validity Checks",
            status_long(&sa.secret_scanning_validity_checks),
        ),
        DetailRow::new(
            "Push Protection",
            status_long(&sa.secret_scanning_push_protection),
        ),
        DetailRow::new(
            "Dependabot Security Updates",
            status_long(&sa.dependabot_security_updates),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::SecurityAndAnalysis;

    #[test]
    fn test_missing_statuses_render_placeholder() {
        let repo = Repository {
            full_name: "acme/api".to_string(),
            security_and_analysis: SecurityAndAnalysis {
                secret_scanning: Status::new("disabled"),
                ..Default::default()
            },
            ..Repository::default()
        };

        let row = RepoDisplay::from(&repo);
        assert_eq!(row.secret_scanning, "disabled");
        assert_eq!(row.push_protection, "N/A");
        assert_eq!(row.language, "--");
    }

    #[test]
    fn test_detail_rows_use_long_placeholder() {
        let repo = Repository {
            full_name: "acme/api".to_string(),
            visibility: "private".to_string(),
            ..Repository::default()
        };
        let rows = repo_detail_rows(&repo);
        let pp = rows.iter().find(|r| r.label == "Push Protection").unwrap();
        assert_eq!(pp.value, "disabled/not available");
        assert_eq!(rows[1].value, "private");
    }
}
