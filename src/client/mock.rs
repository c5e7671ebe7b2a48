//! Mock GitHub API client for testing
//!
//! Responses are scripted per request target. Writes are captured for
//! assertions, and an in-flight counter records the highest concurrency the
//! client observed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use super::GitHubApi;
use super::pagination::RawPage;
use crate::error::{ApiError, Result};

/// A write captured by the mock
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockGitHubClient::new()
///     .with_page("orgs/acme/repos?per_page=100", vec![repo], None)
///     .with_send_failure(Method::PATCH, "repos/acme/legacy", 422);
/// ```
#[derive(Default)]
pub struct MockGitHubClient {
    /// Scripted GET responses keyed by target
    pages: HashMap<String, RawPage>,
    /// GET targets that fail with the given status
    get_failures: HashMap<String, u16>,
    /// Writes that fail, keyed by "METHOD path"
    send_failures: HashMap<String, u16>,
    /// Response bodies for writes, keyed by "METHOD path"
    send_responses: HashMap<String, String>,
    /// Artificial latency for every call
    latency: Duration,
    /// Match GET targets including their query string only
    exact: bool,
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
    gets: Arc<Mutex<Vec<String>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockGitHubClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a collection page for `target`.
    pub fn with_page<T: Serialize>(mut self, target: &str, items: Vec<T>, next: Option<&str>) -> Self {
        let body = serde_json::to_string(&items).unwrap_or_else(|_| "[]".to_string());
        self.pages.insert(
            target.to_string(),
            RawPage {
                body: Some(body),
                next: next.map(str::to_string),
            },
        );
        self
    }

    /// Script a single JSON resource for `target`.
    pub fn with_json(mut self, target: &str, value: serde_json::Value) -> Self {
        self.pages.insert(
            target.to_string(),
            RawPage {
                body: Some(value.to_string()),
                next: None,
            },
        );
        self
    }

    /// Script a raw body; an empty string behaves like a 204.
    pub fn with_raw(mut self, target: &str, body: &str, next: Option<&str>) -> Self {
        self.pages.insert(
            target.to_string(),
            RawPage {
                body: Some(body.to_string()).filter(|b| !b.is_empty()),
                next: next.map(str::to_string),
            },
        );
        self
    }

    /// Stop matching a scripted path when the request adds a query string,
    /// so tests can check `per_page` and other parameters.
    pub fn exact_targets(mut self) -> Self {
        self.exact = true;
        self
    }

    pub fn with_failure(mut self, target: &str, status: u16) -> Self {
        self.get_failures.insert(target.to_string(), status);
        self
    }

    pub fn with_send_failure(mut self, method: Method, path: &str, status: u16) -> Self {
        self.send_failures.insert(send_key(&method, path), status);
        self
    }

    pub fn with_send_response(mut self, method: Method, path: &str, body: serde_json::Value) -> Self {
        self.send_responses
            .insert(send_key(&method, path), body.to_string());
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Writes received so far, in arrival order.
    pub fn mutations(&self) -> Vec<CapturedRequest> {
        self.captured_requests
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// GET targets requested so far.
    pub fn gets(&self) -> Vec<String> {
        self.gets.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn get_count(&self) -> usize {
        self.gets().len()
    }

    /// Highest number of calls observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn lookup<'a, V>(&self, map: &'a HashMap<String, V>, target: &str) -> Option<&'a V> {
        map.get(target).or_else(|| {
            if self.exact {
                return None;
            }
            let path = target.split_once('?').map(|(p, _)| p)?;
            map.get(path)
        })
    }
}

fn send_key(method: &Method, path: &str) -> String {
    format!("{method} {path}")
}

fn error_for(status: u16, target: &str) -> crate::error::Error {
    ApiError::from_status(status, format!("mock failure for {target}"), None).into()
}

#[async_trait]
impl GitHubApi for MockGitHubClient {
    async fn get_page(&self, target: &str) -> Result<RawPage> {
        self.enter().await;
        if let Ok(mut gets) = self.gets.lock() {
            gets.push(target.to_string());
        }

        let result = if let Some(status) = self.lookup(&self.get_failures, target) {
            Err(error_for(*status, target))
        } else if let Some(page) = self.lookup(&self.pages, target) {
            Ok(page.clone())
        } else {
            Err(error_for(404, target))
        };

        self.leave();
        result
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Option<String>> {
        self.enter().await;
        let key = send_key(&method, path);
        if let Ok(mut captured) = self.captured_requests.lock() {
            captured.push(CapturedRequest {
                method,
                path: path.to_string(),
                body,
            });
        }

        let result = match self.send_failures.get(&key) {
            Some(status) => Err(error_for(*status, path)),
            None => Ok(self.send_responses.get(&key).cloned()),
        };

        self.leave();
        result
    }
}
