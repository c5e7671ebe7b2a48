//! Single-repository feature changes

use log::debug;
use reqwest::Method;

use super::{Feature, Toggle};
use crate::client::models::{
    FeatureState, RepoUpdateRequest, Repository, SecurityAndAnalysisUpdate, Status,
};
use crate::client::{GitHubApi, mutate};
use crate::error::Result;

/// One request in a repository change
#[derive(Debug, Clone)]
pub struct RepoStep {
    pub description: String,
    pub method: Method,
    pub path: String,
    pub body: Option<RepoUpdateRequest>,
}

impl RepoStep {
    fn patch(owner: &str, name: &str, description: &str, update: SecurityAndAnalysisUpdate) -> Self {
        Self {
            description: description.to_string(),
            method: Method::PATCH,
            path: format!("repos/{owner}/{name}"),
            body: Some(RepoUpdateRequest {
                security_and_analysis: update,
            }),
        }
    }

    fn vulnerability_alerts(owner: &str, name: &str, toggle: Toggle) -> Self {
        let method = match toggle {
            Toggle::Enable => Method::PUT,
            Toggle::Disable => Method::DELETE,
        };
        Self {
            description: format!("{} Dependabot alerts", toggle.verb()),
            method,
            path: format!("repos/{owner}/{name}/vulnerability-alerts"),
            body: None,
        }
    }
}

/// The ordered requests that move `owner/name` to the desired state.
///
/// Prerequisites come first when enabling and dependents first when
/// disabling.
pub fn repo_steps(owner: &str, name: &str, feature: Feature, toggle: Toggle) -> Vec<RepoStep> {
    let status = || Some(Status::new(toggle.status()));

    match (feature, toggle) {
        (Feature::SecretScanning, Toggle::Enable) => vec![RepoStep::patch(
            owner,
            name,
            "enable secret scanning",
            SecurityAndAnalysisUpdate {
                secret_scanning: status(),
                ..Default::default()
            },
        )],
        (Feature::SecretScanning, Toggle::Disable) => vec![
            RepoStep::patch(
                owner,
                name,
                "disable push protection",
                SecurityAndAnalysisUpdate {
                    secret_scanning_push_protection: status(),
                    ..Default::default()
                },
            ),
            RepoStep::patch(
                owner,
                name,
                "disable secret scanning",
                SecurityAndAnalysisUpdate {
                    secret_scanning: status(),
                    ..Default::default()
                },
            ),
        ],
        // Push protection requires secret scanning; both go in one request.
        (Feature::PushProtection, Toggle::Enable) => vec![RepoStep::patch(
            owner,
            name,
            "enable secret scanning and push protection",
            SecurityAndAnalysisUpdate {
                secret_scanning: status(),
                secret_scanning_push_protection: status(),
                ..Default::default()
            },
        )],
        (Feature::PushProtection, Toggle::Disable) => vec![RepoStep::patch(
            owner,
            name,
            "disable push protection",
            SecurityAndAnalysisUpdate {
                secret_scanning_push_protection: status(),
                ..Default::default()
            },
        )],
        (Feature::NonProviderPatterns, _) => vec![RepoStep::patch(
            owner,
            name,
            &format!("{} non-provider patterns", toggle.verb()),
            SecurityAndAnalysisUpdate {
                secret_scanning_non_provider_patterns: status(),
                ..Default::default()
            },
        )],
        (Feature::Dependabot, Toggle::Enable) => vec![
            RepoStep::vulnerability_alerts(owner, name, toggle),
            RepoStep::patch(
                owner,
                name,
                "enable Dependabot security updates",
                SecurityAndAnalysisUpdate {
                    dependabot_security_updates: status(),
                    ..Default::default()
                },
            ),
        ],
        (Feature::Dependabot, Toggle::Disable) => vec![
            RepoStep::patch(
                owner,
                name,
                "disable Dependabot security updates",
                SecurityAndAnalysisUpdate {
                    dependabot_security_updates: status(),
                    ..Default::default()
                },
            ),
            RepoStep::vulnerability_alerts(owner, name, toggle),
        ],
    }
}

/// Status GitHub reports for `feature` on `repo`.
pub fn current_state(repo: &Repository, feature: Feature) -> FeatureState {
    let sa = &repo.security_and_analysis;
    match feature {
        Feature::SecretScanning => sa.secret_scanning.state(),
        Feature::PushProtection => sa.secret_scanning_push_protection.state(),
        Feature::NonProviderPatterns => sa.secret_scanning_non_provider_patterns.state(),
        Feature::Dependabot => sa.dependabot_security_updates.state(),
    }
}

/// Whether `repo` already has `feature` in the desired state.
///
/// Dependabot alerts are not part of `security_and_analysis`, so a disable
/// can never be proven redundant and always runs.
pub fn is_satisfied(repo: &Repository, feature: Feature, toggle: Toggle) -> bool {
    match (feature, toggle, current_state(repo, feature)) {
        (Feature::Dependabot, Toggle::Disable, _) => false,
        (_, Toggle::Enable, FeatureState::Enabled) => true,
        (_, Toggle::Disable, FeatureState::Disabled) => true,
        _ => false,
    }
}

/// Apply `feature`/`toggle` to one repository.
///
/// Steps run in order; the first failure stops the sequence and names the step.
pub async fn apply_to_repo(
    api: &dyn GitHubApi,
    owner: &str,
    name: &str,
    feature: Feature,
    toggle: Toggle,
) -> Result<()> {
    for step in repo_steps(owner, name, feature, toggle) {
        debug!("{}/{}: {}", owner, name, step.description);
        mutate(api, step.method.clone(), &step.path, step.body.as_ref())
            .await
            .map_err(|e| e.in_step(&step.description))?;
    }
    Ok(())
}
