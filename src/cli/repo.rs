//! Repository commands

use crate::cli::CommandContext;
use crate::cli::handlers::run_list_command;
use crate::client::get_json;
use crate::client::models::Repository;
use crate::enforce::Target;
use crate::error::Result;
use crate::models::{RepoDisplay, repo_detail_rows};
use crate::output::json::format_json;
use crate::output::table::format_details;

/// Prompt used whenever a command needs a repository
pub const REPO_PROMPT: &str = "Repository (owner/repo)";

/// Run the `list repos` command.
pub async fn list(ctx: &CommandContext, owner: Option<String>, user: bool) -> Result<()> {
    let owner = if user {
        ctx.require(owner, "User")?
    } else {
        ctx.org_or_default(owner)?
    };

    let path = if user {
        format!("users/{owner}/repos")
    } else {
        format!("orgs/{owner}/repos")
    };

    run_list_command::<Repository, RepoDisplay>(ctx, &path, "repositories").await
}

/// Resolve a repository argument, prompting when it is missing.
pub fn resolve_repo(ctx: &CommandContext, repo: Option<String>) -> Result<(String, String)> {
    let raw = ctx.require(repo, REPO_PROMPT)?;
    Target::parse_repo(&raw)
}

/// Run the `show repo` command.
pub async fn show(ctx: &CommandContext, repo: Option<String>) -> Result<()> {
    let (owner, name) = resolve_repo(ctx, repo)?;
    let details: Repository = get_json(ctx.api(), &format!("repos/{owner}/{name}")).await?;

    if ctx.mode.is_json() {
        ctx.print(&format_json(&details)?);
    } else {
        let title = format!("Repository {}", details.slug());
        ctx.print(&format_details(&title, &repo_detail_rows(&details)));
    }

    Ok(())
}
