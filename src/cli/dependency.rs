//! `dependency-graph` commands

use crate::cli::CommandContext;
use crate::cli::repo::resolve_repo;
use crate::client::get_json;
use crate::client::models::SbomResponse;
use crate::error::Result;
use crate::output::json::format_raw;
use crate::report::ReportKind;

/// Print the SPDX SBOM of a repository.
///
/// The document is printed bare so it can be piped straight into SBOM tools.
pub async fn sbom(ctx: &CommandContext, repo: Option<String>) -> Result<()> {
    let (owner, name) = resolve_repo(ctx, repo)?;
    let response: SbomResponse =
        get_json(ctx.api(), &format!("repos/{owner}/{name}/dependency-graph/sbom")).await?;

    ctx.print(&format_raw(&response.sbom)?);
    Ok(())
}

/// List Dependabot alerts of a repository.
pub async fn alerts(ctx: &CommandContext, repo: Option<String>) -> Result<()> {
    crate::cli::alert::list(ctx, ReportKind::Dependabot, repo).await
}
