//! Paged listing driver shared by every `list` command
//!
//! One loop fetches pages and hands them to the selected [`OutputMode`]:
//! JSON collects everything and prints once, the table modes print page by
//! page and drop what they printed.

use std::collections::HashSet;
use std::future::Future;

use log::{debug, warn};
use serde::Serialize;
use tabled::Tabled;

use super::json::format_json;
use super::table::format_table;
use super::{Console, OutputMode};
use crate::client::{GitHubApi, fetch_page};
use crate::error::Result;

/// List a collection starting at `start`.
///
/// `enrich` runs on each page before it is rendered; use it to fill in
/// details the collection endpoint leaves out. A cursor pointing at a page
/// already fetched ends the listing. Returns how many items were delivered.
pub async fn run_paged<T, D, E, Fut>(
    api: &dyn GitHubApi,
    start: &str,
    mode: OutputMode,
    console: &dyn Console,
    mut enrich: E,
) -> Result<usize>
where
    T: serde::de::DeserializeOwned + Serialize,
    D: for<'a> From<&'a T> + Tabled,
    E: FnMut(Vec<T>) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut collected: Vec<T> = Vec::new();
    let mut delivered = 0;
    let mut target = start.to_string();
    let mut seen = HashSet::new();
    let mut first = true;

    loop {
        seen.insert(target.clone());
        let page = fetch_page::<T>(api, &target).await?;
        let next = page.next;
        let items = enrich(page.items).await?;
        delivered += items.len();

        match mode {
            OutputMode::Json => collected.extend(items),
            OutputMode::Interactive | OutputMode::FetchAll => {
                if first || !items.is_empty() {
                    let rows: Vec<D> = items.iter().map(D::from).collect();
                    console.print(&format_table(&rows));
                }
            }
        }
        first = false;

        let Some(next) = next else {
            break;
        };
        if seen.contains(&next) {
            warn!("Pagination cursor {} repeats an earlier page; stopping", next);
            break;
        }

        if mode == OutputMode::Interactive && !console.confirm_next_page()? {
            debug!("Listing stopped by user after {} items", delivered);
            break;
        }
        target = next;
    }

    if mode.is_json() {
        console.print(&format_json(&collected)?);
    }

    Ok(delivered)
}

/// [`run_paged`] without enrichment.
pub async fn run_paged_plain<T, D>(
    api: &dyn GitHubApi,
    start: &str,
    mode: OutputMode,
    console: &dyn Console,
) -> Result<usize>
where
    T: serde::de::DeserializeOwned + Serialize,
    D: for<'a> From<&'a T> + Tabled,
{
    run_paged::<T, D, _, _>(api, start, mode, console, |items| async move { Ok(items) }).await
}
