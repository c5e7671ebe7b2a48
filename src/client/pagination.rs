//! Cursor pagination over GitHub's `Link` header
//!
//! GitHub paginates collections with `Link: <url>; rel="next"`. The cursor is
//! an absolute URL that is fed back verbatim as the next request target.

use std::collections::HashSet;

use log::{debug, warn};
use serde::de::DeserializeOwned;

use super::{GitHubApi, decode};
use crate::config::MAX_PAGE_SIZE;
use crate::error::Result;

/// Undecoded response of a single GET
#[derive(Debug, Clone, Default)]
pub struct RawPage {
    /// Response body; `None` for 204 or an empty body
    pub body: Option<String>,
    /// Continuation cursor from `Link: rel="next"`
    pub next: Option<String>,
}

/// One decoded page of a collection
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// Extract the `rel="next"` target from a `Link` header value.
///
/// Relation matching is case-insensitive and tolerates whitespace around `=`
/// and unquoted or multi-valued relations (`rel="prev next"`).
pub fn next_cursor(link: Option<&str>) -> Option<String> {
    let link = link?;

    for entry in link.split(',') {
        let mut parts = entry.split(';');
        let Some(target) = parts.next() else {
            continue;
        };

        let is_next = parts.any(|param| {
            let Some((key, value)) = param.split_once('=') else {
                return false;
            };
            key.trim().eq_ignore_ascii_case("rel")
                && value
                    .trim()
                    .trim_matches('"')
                    .split_whitespace()
                    .any(|rel| rel.eq_ignore_ascii_case("next"))
        });

        if is_next {
            let url = target.trim().trim_start_matches('<').trim_end_matches('>').trim();
            if !url.is_empty() {
                return Some(url.to_string());
            }
        }
    }

    None
}

/// Append `per_page` (clamped to 1..=100) to a resource path.
pub fn with_per_page(path: &str, per_page: usize) -> String {
    let size = per_page.clamp(1, MAX_PAGE_SIZE);
    let sep = if path.contains('?') { '&' } else { '?' };
    format!("{path}{sep}per_page={size}")
}

/// Fetch and decode one page of `T`.
pub async fn fetch_page<T: DeserializeOwned>(api: &dyn GitHubApi, target: &str) -> Result<Page<T>> {
    let raw = api.get_page(target).await?;

    let (items, next) = match raw.body {
        Some(body) => (decode(&body, target)?, raw.next),
        // 204 or empty body: nothing to decode and nothing to follow
        None => (Vec::new(), None),
    };

    debug!(
        "Fetched {} items from {} (next: {})",
        items.len(),
        target,
        next.as_deref().unwrap_or("none")
    );

    Ok(Page { items, next })
}

/// Follow cursors from `start` until the collection is exhausted.
///
/// Items keep their page order. The first error aborts with no partial result.
/// A cursor pointing at a target already fetched ends the walk.
pub async fn fetch_all<T: DeserializeOwned>(api: &dyn GitHubApi, start: &str) -> Result<Vec<T>> {
    let mut all = Vec::new();
    let mut seen = HashSet::new();
    let mut target = start.to_string();

    loop {
        seen.insert(target.clone());
        let page = fetch_page::<T>(api, &target).await?;
        all.extend(page.items);

        match page.next {
            Some(next) if seen.contains(&next) => {
                warn!("Pagination cursor {} repeats an earlier page; stopping", next);
                break;
            }
            Some(next) => target = next,
            None => break,
        }
    }

    debug!("Fetched {} items starting from {}", all.len(), start);
    Ok(all)
}
