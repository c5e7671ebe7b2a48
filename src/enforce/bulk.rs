//! Per-repository enforcement across many repositories

use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc;

use super::repo::{apply_to_repo, is_satisfied};
use super::{EnforceOptions, Feature, RepoOutcome, Toggle};
use crate::client::models::Repository;
use crate::client::{GitHubApi, fetch_all, spawn_bounded, with_per_page};
use crate::config::MAX_PAGE_SIZE;
use crate::error::{ApiError, Error, Result};

/// Apply `feature`/`toggle` to every repository in `repos`.
///
/// Repositories already in the desired state (per their enumerated status)
/// produce [`RepoOutcome::AlreadySatisfied`] without a request. Failures are
/// recorded per repository and never stop the batch. Outcomes arrive in
/// completion order; the receiver closes after the last one.
pub fn enforce_repos(
    api: Arc<dyn GitHubApi>,
    repos: Vec<Repository>,
    feature: Feature,
    toggle: Toggle,
    options: EnforceOptions,
) -> mpsc::Receiver<RepoOutcome> {
    debug!(
        "{} {} on {} repositories ({} workers)",
        toggle.verb(),
        feature,
        repos.len(),
        options.workers
    );

    spawn_bounded(repos, options.workers, options.pause, move |repo: Repository| {
        let api = Arc::clone(&api);
        async move {
            let slug = repo.slug();
            if is_satisfied(&repo, feature, toggle) {
                return RepoOutcome::AlreadySatisfied { repo: slug };
            }

            match apply_to_repo(api.as_ref(), repo.owner_login(), &repo.name, feature, toggle).await
            {
                Ok(()) => RepoOutcome::Applied { repo: slug },
                Err(e) => RepoOutcome::Failed {
                    repo: slug,
                    reason: e.to_string(),
                },
            }
        }
    })
}

/// Every repository of `owner`, read as an organization first and as a user
/// account when no such organization exists.
pub async fn list_owner_repos(api: &dyn GitHubApi, owner: &str) -> Result<Vec<Repository>> {
    let org_path = with_per_page(&format!("orgs/{owner}/repos"), MAX_PAGE_SIZE);
    match fetch_all(api, &org_path).await {
        Err(Error::Api(ApiError::NotFound(_))) => {
            debug!("{} is not an organization; listing user repositories", owner);
            let user_path = with_per_page(&format!("users/{owner}/repos"), MAX_PAGE_SIZE);
            fetch_all(api, &user_path).await
        }
        result => result,
    }
}

/// Enumerate every repository of `owner` and enforce on each.
///
/// Enumeration is fail-fast; only the per-repository phase is fail-soft.
pub async fn enforce_org_repos(
    api: Arc<dyn GitHubApi>,
    owner: &str,
    feature: Feature,
    toggle: Toggle,
    options: EnforceOptions,
) -> Result<(usize, mpsc::Receiver<RepoOutcome>)> {
    let repos = list_owner_repos(api.as_ref(), owner).await?;
    let total = repos.len();
    Ok((total, enforce_repos(api, repos, feature, toggle, options)))
}
