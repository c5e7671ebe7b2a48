//! Generic list command handler
//!
//! Every `list` command follows the same flow:
//! 1. Resolve the collection path
//! 2. Apply the page size
//! 3. Hand the pages to the selected output mode

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tabled::Tabled;

use crate::cli::CommandContext;
use crate::error::Result;
use crate::output::run_paged_plain;

/// List the collection at `path` with display type `D`.
///
/// # Example
///
/// ```ignore
/// run_list_command::<Repository, RepoDisplay>(&ctx, "orgs/acme/repos", "repositories").await
/// ```
pub async fn run_list_command<T, D>(
    ctx: &CommandContext,
    path: &str,
    resource_name: &str,
) -> Result<()>
where
    T: DeserializeOwned + Serialize,
    D: for<'a> From<&'a T> + Tabled,
{
    let start = ctx.page_path(path);
    debug!("Listing {} from {}", resource_name, start);

    let count =
        run_paged_plain::<T, D>(ctx.api(), &start, ctx.mode, ctx.console.as_ref()).await?;

    debug!("Listed {} {}", count, resource_name);
    Ok(())
}
