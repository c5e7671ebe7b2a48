//! `enable` / `disable` command implementations

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use crate::cli::CommandContext;
use crate::enforce::{
    BulkSummary, EnforceOptions, Feature, OrgPlan, Target, Toggle, apply_org_plan, apply_to_repo,
    enforce_org_repos,
};
use crate::error::Result;

/// Run `enable`/`disable` for `feature` on `target`.
///
/// `owner/repo` changes one repository. A bare name changes the organization
/// through its organization-wide endpoints, or repository by repository when
/// `per_repo` is set or the feature has no organization endpoint.
pub async fn run(
    ctx: &CommandContext,
    toggle: Toggle,
    feature: Feature,
    target: Option<String>,
    per_repo: bool,
) -> Result<()> {
    let prompt = format!("Where should {feature} be {}d? (org or owner/repo)", toggle.verb());
    let raw = ctx.require(target, &prompt)?;

    match Target::parse(&raw)? {
        Target::Repo { owner, name } => single_repo(ctx, &owner, &name, feature, toggle).await,
        Target::Owner(org) => match OrgPlan::for_feature(feature, toggle) {
            Some(plan) if !per_repo => org_wide(ctx, &org, &plan, feature).await,
            _ => each_repo(ctx, &org, feature, toggle).await,
        },
    }
}

async fn single_repo(
    ctx: &CommandContext,
    owner: &str,
    name: &str,
    feature: Feature,
    toggle: Toggle,
) -> Result<()> {
    ctx.print(&format!(
        "{} {} for {}/{}...",
        capitalize(toggle.verb()),
        feature,
        owner,
        name
    ));

    apply_to_repo(ctx.api(), owner, name, feature, toggle).await?;

    ctx.print(&format!(
        "{} {} {}d for {}/{}",
        "✓".green(),
        feature,
        toggle.verb(),
        owner,
        name
    ));
    Ok(())
}

async fn org_wide(ctx: &CommandContext, org: &str, plan: &OrgPlan, feature: Feature) -> Result<()> {
    ctx.print(&format!(
        "{} {} for all repositories in {}...",
        capitalize(plan.toggle.verb()),
        feature,
        org
    ));

    apply_org_plan(ctx.api(), org, plan, |step| {
        ctx.print(&format!("{} {}", "✓".green(), step));
    })
    .await?;

    ctx.print(&format!(
        "{} GitHub applies organization-wide changes in the background; repositories may take a few minutes to reflect them.",
        "ℹ".cyan()
    ));
    Ok(())
}

async fn each_repo(ctx: &CommandContext, org: &str, feature: Feature, toggle: Toggle) -> Result<()> {
    if feature == Feature::NonProviderPatterns {
        debug!("{} has no organization endpoint; changing repositories one by one", feature);
    }

    let spinner = spinner(format!("Listing repositories in {org}..."));
    let listing = enforce_org_repos(
        ctx.client.clone(),
        org,
        feature,
        toggle,
        EnforceOptions::from(&ctx.settings),
    )
    .await;
    spinner.finish_and_clear();
    let (total, mut outcomes_rx) = listing?;

    ctx.print(&format!(
        "{} {} on {} repositories in {}...",
        capitalize(toggle.verb()),
        feature,
        total,
        org
    ));

    let mut outcomes = Vec::with_capacity(total);
    while let Some(outcome) = outcomes_rx.recv().await {
        ctx.print(&outcome.colored_line());
        outcomes.push(outcome);
    }

    let summary = BulkSummary::tally(&outcomes);
    let line = summary.to_string();
    if summary.failed > 0 {
        ctx.print(&line.yellow().to_string());
    } else {
        ctx.print(&line.bold().to_string());
    }

    summary.check(ctx.settings.strict)
}

pub(crate) fn spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ");
    bar.set_style(style);
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
