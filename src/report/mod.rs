//! Organization-wide alert reports in CSV
//!
//! Every repository of the organization is enumerated first (fail-fast), then
//! its alerts are fetched on a bounded worker pool. Callers enumerate before
//! opening the output so a failed listing leaves no file behind. A repository whose alerts
//! cannot be read contributes no rows and the report carries on.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::ValueEnum;
use log::{debug, warn};

use crate::client::models::{CodeScanningAlert, DependabotAlert, Repository, SecretScanningAlert};
use crate::client::{GitHubApi, fetch_all, spawn_bounded, with_per_page};
use crate::config::{DEFAULT_DELAY_MS, DEFAULT_WORKERS, MAX_PAGE_SIZE, Settings};
use crate::error::Result;

/// Rows between progress callbacks
pub const DEFAULT_PROGRESS_EVERY: usize = 100;

/// Alert family a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    #[value(alias = "cs")]
    CodeScanning,
    #[value(alias = "ss")]
    SecretScanning,
    #[value(alias = "dep")]
    Dependabot,
}

impl ReportKind {
    pub fn slug(self) -> &'static str {
        match self {
            ReportKind::CodeScanning => "code-scanning",
            ReportKind::SecretScanning => "secret-scanning",
            ReportKind::Dependabot => "dependabot",
        }
    }

    pub fn headers(self) -> &'static [&'static str] {
        match self {
            ReportKind::CodeScanning => &[
                "Repository",
                "Tool",
                "Rule",
                "Severity",
                "State",
                "Created At",
                "URL",
            ],
            ReportKind::SecretScanning => &[
                "Repository",
                "Secret Type",
                "Secret",
                "State",
                "Resolution",
                "Created At",
                "URL",
            ],
            ReportKind::Dependabot => &[
                "Repository",
                "Package",
                "Severity",
                "State",
                "CVE/GHSA",
                "Vulnerable Version",
                "Created At",
                "URL",
            ],
        }
    }

    /// Alerts collection of `owner/name` for this kind
    pub fn alerts_path(self, owner: &str, name: &str) -> String {
        let path = format!("repos/{owner}/{name}/{}/alerts", self.slug());
        with_per_page(&path, MAX_PAGE_SIZE)
    }

    /// Default output file for `org`
    pub fn default_filename(self, org: &str) -> String {
        format!("{org}-{}-report.csv", self.slug())
    }
}

/// Worker pool and progress settings
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub workers: usize,
    pub pause: Duration,
    pub progress_every: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            pause: Duration::from_millis(DEFAULT_DELAY_MS),
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }
}

impl From<&Settings> for ReportOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            workers: settings.workers,
            pause: settings.delay,
            ..Self::default()
        }
    }
}

/// What a finished report contains
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub repositories: usize,
    pub rows: usize,
    /// Repositories skipped because their alerts could not be read
    pub skipped: Vec<String>,
}

pub fn code_scanning_row(repo: &str, alert: &CodeScanningAlert) -> Vec<String> {
    vec![
        repo.to_string(),
        alert.tool.name.clone(),
        alert.rule.id.clone(),
        alert.rule.effective_severity().to_string(),
        alert.state.clone(),
        alert.created_at.clone(),
        alert.html_url.clone(),
    ]
}

pub fn secret_scanning_row(repo: &str, alert: &SecretScanningAlert) -> Vec<String> {
    vec![
        repo.to_string(),
        alert.secret_type.clone(),
        alert.secret.clone(),
        alert.state.clone(),
        alert.resolution.clone().unwrap_or_default(),
        alert.created_at.clone(),
        alert.html_url.clone(),
    ]
}

pub fn dependabot_row(repo: &str, alert: &DependabotAlert) -> Vec<String> {
    vec![
        repo.to_string(),
        alert.dependency.package.name.clone(),
        alert.security_advisory.severity.clone(),
        alert.state.clone(),
        alert.advisory_id().to_string(),
        alert.security_vulnerability.vulnerable_version_range.clone(),
        alert.created_at.clone(),
        alert.html_url.clone(),
    ]
}

/// Fetch every alert of `kind` for one repository as CSV rows.
pub async fn repo_rows(api: &dyn GitHubApi, repo: &Repository, kind: ReportKind) -> Result<Vec<Vec<String>>> {
    let path = kind.alerts_path(repo.owner_login(), &repo.name);
    let name = repo.name.as_str();

    let rows: Vec<Vec<String>> = match kind {
        ReportKind::CodeScanning => fetch_all::<CodeScanningAlert>(api, &path)
            .await?
            .iter()
            .map(|a| code_scanning_row(name, a))
            .collect(),
        ReportKind::SecretScanning => fetch_all::<SecretScanningAlert>(api, &path)
            .await?
            .iter()
            .map(|a| secret_scanning_row(name, a))
            .collect(),
        ReportKind::Dependabot => fetch_all::<DependabotAlert>(api, &path)
            .await?
            .iter()
            .map(|a| dependabot_row(name, a))
            .collect(),
    };
    Ok(rows)
}

/// Every repository of `org`. The first failed page aborts.
pub async fn list_repositories(api: &dyn GitHubApi, org: &str) -> Result<Vec<Repository>> {
    fetch_all(api, &with_per_page(&format!("orgs/{org}/repos"), MAX_PAGE_SIZE)).await
}

/// Write a `kind` report over `repos` into `writer`.
///
/// `progress` receives the running row count every `options.progress_every`
/// rows. Rows from different repositories interleave in completion order.
pub async fn generate<W, P>(
    api: Arc<dyn GitHubApi>,
    repos: Vec<Repository>,
    kind: ReportKind,
    options: ReportOptions,
    writer: &mut csv::Writer<W>,
    mut progress: P,
) -> Result<ReportSummary>
where
    W: Write,
    P: FnMut(usize),
{
    debug!("Building {} report over {} repositories", kind.slug(), repos.len());

    writer.write_record(kind.headers())?;

    let mut summary = ReportSummary {
        repositories: repos.len(),
        ..ReportSummary::default()
    };

    let mut results = spawn_bounded(repos, options.workers, options.pause, move |repo: Repository| {
        let api = Arc::clone(&api);
        async move {
            let rows = repo_rows(api.as_ref(), &repo, kind).await;
            (repo.slug(), rows)
        }
    });

    let every = options.progress_every.max(1);
    while let Some((repo, rows)) = results.recv().await {
        match rows {
            Ok(rows) => {
                for row in rows {
                    writer.write_record(&row)?;
                    summary.rows += 1;
                    if summary.rows % every == 0 {
                        progress(summary.rows);
                    }
                }
            }
            Err(e) => {
                warn!("Skipping {}: {}", repo, e);
                summary.skipped.push(repo);
            }
        }
    }

    writer.flush()?;
    summary.skipped.sort();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockGitHubClient;
    use serde_json::json;

    fn repo(name: &str) -> serde_json::Value {
        json!({ "name": name, "full_name": format!("acme/{name}"), "owner": { "login": "acme" } })
    }

    fn code_alert(rule: &str) -> serde_json::Value {
        json!({
            "number": 1,
            "state": "open",
            "created_at": "2024-01-02T03:04:05Z",
            "html_url": format!("https://github.com/acme/x/security/code-scanning/{rule}"),
            "rule": { "id": rule, "severity": "error" },
            "tool": { "name": "CodeQL" }
        })
    }

    fn options() -> ReportOptions {
        ReportOptions {
            workers: 2,
            pause: Duration::ZERO,
            progress_every: 2,
        }
    }

    fn read_rows(buf: Vec<u8>) -> Vec<Vec<String>> {
        csv::Reader::from_reader(buf.as_slice())
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_headers_and_filename() {
        assert_eq!(ReportKind::CodeScanning.headers().len(), 7);
        assert_eq!(ReportKind::Dependabot.headers()[4], "CVE/GHSA");
        assert_eq!(
            ReportKind::SecretScanning.default_filename("acme"),
            "acme-secret-scanning-report.csv"
        );
        assert_eq!(
            ReportKind::Dependabot.alerts_path("acme", "api"),
            "repos/acme/api/dependabot/alerts?per_page=100"
        );
    }

    #[tokio::test]
    async fn test_failed_repository_contributes_no_rows() {
        let mock = Arc::new(
            MockGitHubClient::new()
                .exact_targets()
                .with_page(
                    "orgs/acme/repos?per_page=100",
                    vec![repo("api"), repo("broken"), repo("web")],
                    None,
                )
                .with_page(
                    "repos/acme/api/code-scanning/alerts?per_page=100",
                    vec![code_alert("js/xss"), code_alert("js/sqli")],
                    None,
                )
                .with_failure("repos/acme/broken/code-scanning/alerts?per_page=100", 403)
                .with_page(
                    "repos/acme/web/code-scanning/alerts?per_page=100",
                    vec![code_alert("js/redos")],
                    None,
                ),
        );

        let repos = list_repositories(mock.as_ref(), "acme").await.unwrap();
        let mut writer = csv::Writer::from_writer(Vec::new());
        let mut ticks = Vec::new();
        let summary = generate(
            mock,
            repos,
            ReportKind::CodeScanning,
            options(),
            &mut writer,
            |n| ticks.push(n),
        )
        .await
        .unwrap();

        assert_eq!(summary.repositories, 3);
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.skipped, vec!["acme/broken".to_string()]);
        assert_eq!(ticks, vec![2]);

        let rows = read_rows(writer.into_inner().unwrap());
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r[0] != "broken"));
        assert!(rows.iter().any(|r| r[0] == "api" && r[2] == "js/xss"));
        assert!(rows.iter().any(|r| r[0] == "web" && r[1] == "CodeQL"));
    }

    #[tokio::test]
    async fn test_repository_listing_failure_aborts() {
        let mock = MockGitHubClient::new()
            .exact_targets()
            .with_failure("orgs/acme/repos?per_page=100", 404);
        let result = list_repositories(&mock, "acme").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_no_repositories_writes_header_only() {
        let mock = Arc::new(MockGitHubClient::new());
        let mut writer = csv::Writer::from_writer(Vec::new());
        let summary = generate(
            mock,
            Vec::new(),
            ReportKind::Dependabot,
            options(),
            &mut writer,
            |_| {},
        )
        .await
        .unwrap();

        assert_eq!(summary, ReportSummary::default());
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert!(text.starts_with("Repository,Package,Severity"));
    }

    #[test]
    fn test_dependabot_row_uses_advisory_fallback() {
        let alert: DependabotAlert = serde_json::from_value(json!({
            "state": "fixed",
            "created_at": "2024-01-01T00:00:00Z",
            "html_url": "https://github.com/acme/api/security/dependabot/4",
            "dependency": { "package": { "ecosystem": "pip", "name": "django" } },
            "security_advisory": { "ghsa_id": "GHSA-abcd", "severity": "critical" },
            "security_vulnerability": { "vulnerable_version_range": ">= 4.0, < 4.2.1" }
        }))
        .unwrap();

        let row = dependabot_row("api", &alert);
        assert_eq!(row.len(), ReportKind::Dependabot.headers().len());
        assert_eq!(row[1], "django");
        assert_eq!(row[4], "GHSA-abcd");
        assert_eq!(row[5], ">= 4.0, < 4.2.1");
    }

    #[test]
    fn test_secret_row_blank_resolution() {
        let alert = SecretScanningAlert {
            secret_type: "aws_access_key_id".to_string(),
            state: "open".to_string(),
            ..Default::default()
        };
        let row = secret_scanning_row("api", &alert);
        assert_eq!(row.len(), 7);
        assert_eq!(row[4], "");
    }
}
