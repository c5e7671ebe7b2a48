//! reqwest-backed GitHub REST client

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, LINK, RETRY_AFTER};
use reqwest::{Client as HttpClient, Method, Response};

use super::GitHubApi;
use super::pagination::{RawPage, next_cursor};
use crate::config::Settings;
use crate::error::{ApiError, ConfigError, Result};

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("gh-advanced-security/", env!("CARGO_PKG_VERSION"));

/// GitHub API client
pub struct GitHubClient {
    http: HttpClient,
    base_url: String,
}

impl GitHubClient {
    /// Create a client for the API base and token in `settings`.
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_base_url(&settings.api_url, &settings.token, settings.timeout)
    }

    pub fn with_base_url(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(API_VERSION),
        );
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ConfigError::Invalid("Token contains invalid characters".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = HttpClient::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute cursor URLs are used verbatim; paths are joined to the base.
    fn url_for(&self, target: &str) -> String {
        if target.starts_with("http://") || target.starts_with("https://") {
            target.to_string()
        } else {
            format!("{}/{}", self.base_url, target.trim_start_matches('/'))
        }
    }

    /// Turn a non-2xx response into an [`ApiError`].
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let body = response.text().await.unwrap_or_default();

        Err(ApiError::from_status(status.as_u16(), body, retry_after).into())
    }

    async fn read_body(response: Response) -> Result<Option<String>> {
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {e}")))?;
        Ok(Some(text).filter(|t| !t.trim().is_empty()))
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get_page(&self, target: &str) -> Result<RawPage> {
        let url = self.url_for(target);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ApiError::from)?;
        let response = Self::check(response).await?;

        let next = next_cursor(
            response
                .headers()
                .get(LINK)
                .and_then(|v| v.to_str().ok()),
        );
        let body = Self::read_body(response).await?;

        Ok(RawPage { body, next })
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Option<String>> {
        let url = self.url_for(path);
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let response = Self::check(response).await?;
        Self::read_body(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::Repository;
    use crate::client::{fetch_all, mutate};
    use crate::error::Error;
    use mockito::Matcher;

    fn client(server: &mockito::Server) -> GitHubClient {
        GitHubClient::with_base_url(&server.url(), "test-token", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_url_for_joins_relative_paths() {
        let client =
            GitHubClient::with_base_url("https://ghe.example.com/api/v3/", "t", Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            client.url_for("/orgs/acme/repos?per_page=10"),
            "https://ghe.example.com/api/v3/orgs/acme/repos?per_page=10"
        );
        assert_eq!(
            client.url_for("https://ghe.example.com/api/v3/organizations/1/repos?page=2"),
            "https://ghe.example.com/api/v3/organizations/1/repos?page=2"
        );
    }

    #[tokio::test]
    async fn test_get_page_sends_headers_and_reads_link() {
        let mut server = mockito::Server::new_async().await;
        let next = format!("{}/orgs/acme/repos?page=2", server.url());
        let mock = server
            .mock("GET", "/orgs/acme/repos")
            .match_query(Matcher::Any)
            .match_header("authorization", "Bearer test-token")
            .match_header("x-github-api-version", API_VERSION)
            .with_status(200)
            .with_header("link", &format!("<{next}>; rel=\"next\""))
            .with_body("[]")
            .create_async()
            .await;

        let page = client(&server)
            .get_page("orgs/acme/repos?per_page=5")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(page.next.as_deref(), Some(next.as_str()));
        assert_eq!(page.body.as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_get_page_204_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/acme/api/vulnerability-alerts")
            .with_status(204)
            .create_async()
            .await;

        let page = client(&server)
            .get_page("repos/acme/api/vulnerability-alerts")
            .await
            .unwrap();
        assert!(page.body.is_none());
        assert!(page.next.is_none());
    }

    #[tokio::test]
    async fn test_non_success_status_carries_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/orgs/ghost")
            .with_status(404)
            .with_body(r#"{"message":"Not Found"}"#)
            .create_async()
            .await;

        let err = client(&server).get_page("orgs/ghost").await.unwrap_err();
        match err {
            Error::Api(ApiError::NotFound(body)) => assert!(body.contains("Not Found")),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_reads_retry_after() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/user/orgs")
            .with_status(429)
            .with_header("retry-after", "12")
            .create_async()
            .await;

        let err = client(&server).get_page("user/orgs").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Api(ApiError::RateLimited(d)) if d == Duration::from_secs(12)
        ));
    }

    #[tokio::test]
    async fn test_fetch_all_follows_absolute_cursor() {
        let mut server = mockito::Server::new_async().await;
        let page2 = format!("{}/orgs/acme/repos?page=2", server.url());
        server
            .mock("GET", "/orgs/acme/repos")
            .match_query(Matcher::UrlEncoded("per_page".into(), "100".into()))
            .with_status(200)
            .with_header("link", &format!("<{page2}>; rel=\"next\", <{page2}>; rel=\"last\""))
            .with_body(r#"[{"name":"one","full_name":"acme/one"}]"#)
            .create_async()
            .await;
        server
            .mock("GET", "/orgs/acme/repos")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(200)
            .with_body(r#"[{"name":"two","full_name":"acme/two"}]"#)
            .create_async()
            .await;

        let api = client(&server);
        let repos: Vec<Repository> = fetch_all(&api, "orgs/acme/repos?per_page=100")
            .await
            .unwrap();
        let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_send_patch_with_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/repos/acme/api")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "security_and_analysis": { "secret_scanning": { "status": "enabled" } }
            })))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let api = client(&server);
        mutate(
            &api,
            Method::PATCH,
            "repos/acme/api",
            Some(&serde_json::json!({
                "security_and_analysis": { "secret_scanning": { "status": "enabled" } }
            })),
        )
        .await
        .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_unprocessable() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/orgs/acme/secret_scanning/enable_all")
            .with_status(422)
            .with_body("plan does not include feature")
            .create_async()
            .await;

        let err = client(&server)
            .send(Method::POST, "orgs/acme/secret_scanning/enable_all", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::Unprocessable(_))));
    }
}
