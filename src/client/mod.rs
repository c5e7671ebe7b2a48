//! GitHub REST API client
//!
//! The [`GitHubApi`] trait is the only seam between the CLI and the network:
//! one primitive reads a single page, the other sends a write. Typed helpers
//! ([`get_json`], [`mutate`], [`pagination::fetch_page`], [`pagination::fetch_all`])
//! are free functions over `&dyn GitHubApi` so the trait stays object-safe.

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};

pub mod github;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod parallel;

pub use github::GitHubClient;
#[cfg(test)]
pub use mock::MockGitHubClient;
pub use pagination::{Page, RawPage, fetch_all, fetch_page, with_per_page};
pub use parallel::spawn_bounded;

/// GitHub REST API client trait
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Issue one GET against `target` and return the raw body plus the
    /// `Link: rel="next"` cursor, if any.
    ///
    /// `target` is either a path relative to the API base (query string
    /// allowed) or an absolute URL taken verbatim from a previous cursor.
    async fn get_page(&self, target: &str) -> Result<RawPage>;

    /// Send a write request (PATCH, PUT, POST, DELETE) with an optional JSON
    /// body. Returns the response body when the API sent one.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Option<String>>;
}

/// GET a single resource and decode it.
pub async fn get_json<T: DeserializeOwned>(api: &dyn GitHubApi, path: &str) -> Result<T> {
    let page = api.get_page(path).await?;
    let body = page
        .body
        .ok_or_else(|| ApiError::InvalidResponse(format!("Empty response from {path}")))?;
    decode(&body, path)
}

/// Send a write whose response body is not needed.
pub async fn mutate<B: Serialize>(
    api: &dyn GitHubApi,
    method: Method,
    path: &str,
    body: Option<&B>,
) -> Result<()> {
    let body = body.map(serde_json::to_value).transpose()?;
    api.send(method, path, body).await?;
    Ok(())
}

/// Send a write and decode the response body.
pub async fn mutate_json<B: Serialize, T: DeserializeOwned>(
    api: &dyn GitHubApi,
    method: Method,
    path: &str,
    body: &B,
) -> Result<T> {
    let value = serde_json::to_value(body)?;
    let response = api
        .send(method, path, Some(value))
        .await?
        .ok_or_else(|| ApiError::InvalidResponse(format!("Empty response from {path}")))?;
    decode(&response, path)
}

pub(crate) fn decode<T: DeserializeOwned>(body: &str, target: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        ApiError::InvalidResponse(format!("Failed to parse response from {target}: {e}")).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::Organization;

    #[tokio::test]
    async fn test_get_json_decodes_resource() {
        let mock = MockGitHubClient::new().with_json("orgs/acme", serde_json::json!({"login": "acme", "id": 7}));
        let org: Organization = get_json(&mock, "orgs/acme").await.unwrap();
        assert_eq!(org.id, 7);
    }

    #[tokio::test]
    async fn test_get_json_rejects_malformed_body() {
        let mock = MockGitHubClient::new().with_raw("orgs/acme", "{not json", None);
        let err = get_json::<Organization>(&mock, "orgs/acme").await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Api(ApiError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_mutate_records_body() {
        let mock = MockGitHubClient::new();
        mutate(
            &mock,
            Method::PATCH,
            "orgs/acme",
            Some(&serde_json::json!({"secret_scanning_enabled_for_new_repositories": true})),
        )
        .await
        .unwrap();

        let calls = mock.mutations();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::PATCH);
        assert_eq!(calls[0].path, "orgs/acme");
    }
}
