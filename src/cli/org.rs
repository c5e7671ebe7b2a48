//! Organization command implementations

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::cli::CommandContext;
use crate::client::models::Organization;
use crate::client::{GitHubApi, get_json, spawn_bounded};
use crate::error::Result;
use crate::models::{OrgDisplay, org_detail_rows};
use crate::output::json::format_json;
use crate::output::run_paged;
use crate::output::table::format_details;

/// Run the `list orgs` command.
///
/// `user/orgs` only returns summaries, so each page is completed with the
/// full organization record before it is shown.
pub async fn list(ctx: &CommandContext) -> Result<()> {
    let start = ctx.page_path("user/orgs");
    let api = Arc::clone(&ctx.client);
    let workers = ctx.settings.workers;

    run_paged::<Organization, OrgDisplay, _, _>(
        ctx.api(),
        &start,
        ctx.mode,
        ctx.console.as_ref(),
        |orgs| {
            let api = Arc::clone(&api);
            async move { Ok(enrich_orgs(api, orgs, workers).await) }
        },
    )
    .await?;

    Ok(())
}

/// Replace each summary with `GET orgs/{login}`, keeping the input order.
///
/// An organization whose details cannot be read keeps its summary.
pub async fn enrich_orgs(
    api: Arc<dyn GitHubApi>,
    orgs: Vec<Organization>,
    workers: usize,
) -> Vec<Organization> {
    let mut slots: Vec<Option<Organization>> = vec![None; orgs.len()];
    let indexed: Vec<(usize, Organization)> = orgs.into_iter().enumerate().collect();

    let mut results = spawn_bounded(
        indexed,
        workers,
        Duration::ZERO,
        move |(index, summary): (usize, Organization)| {
            let api = Arc::clone(&api);
            async move {
                let path = format!("orgs/{}", summary.login);
                match get_json::<Organization>(api.as_ref(), &path).await {
                    Ok(full) => (index, full),
                    Err(e) => {
                        debug!("Keeping summary for {}: {}", summary.login, e);
                        (index, summary)
                    }
                }
            }
        },
    );

    while let Some((index, org)) = results.recv().await {
        slots[index] = Some(org);
    }

    slots.into_iter().flatten().collect()
}

/// Run the `show org` command.
pub async fn show(ctx: &CommandContext, org: Option<String>) -> Result<()> {
    let org = ctx.org_or_default(org)?;
    let details: Organization = get_json(ctx.api(), &format!("orgs/{org}")).await?;

    if ctx.mode.is_json() {
        ctx.print(&format_json(&details)?);
    } else {
        let title = format!("Organization {}", details.login);
        ctx.print(&format_details(&title, &org_detail_rows(&details)));
    }

    Ok(())
}
