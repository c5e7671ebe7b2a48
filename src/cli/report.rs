//! `report` command implementation

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::cli::CommandContext;
use crate::cli::enforce::spinner;
use crate::error::{Error, Result};
use crate::report::{self, ReportKind, ReportOptions, ReportSummary};

/// Run the `report <kind> <org>` command, writing CSV to `output` or the
/// default `{org}-{kind}-report.csv`.
pub async fn run(
    ctx: &CommandContext,
    kind: ReportKind,
    org: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let org = ctx.org_or_default(org)?;
    let path = output.unwrap_or_else(|| PathBuf::from(kind.default_filename(&org)));

    let listing_spinner = spinner(format!("Listing repositories in {org}..."));
    let listing = report::list_repositories(ctx.api(), &org).await;
    listing_spinner.finish_and_clear();
    let repos = listing?;

    let mut writer = csv::Writer::from_path(&path)?;
    let progress = spinner(format!("Collecting {} alerts in {org}...", kind.slug()));
    let result = report::generate(
        ctx.client.clone(),
        repos,
        kind,
        ReportOptions::from(&ctx.settings),
        &mut writer,
        |rows| progress.set_message(format!("{rows} alerts written...")),
    )
    .await;
    progress.finish_and_clear();
    let summary = result?;

    print_summary(ctx, &summary, &path);

    if ctx.settings.strict && !summary.skipped.is_empty() {
        return Err(Error::BatchFailed {
            failed: summary.skipped.len(),
            total: summary.repositories,
        });
    }
    Ok(())
}

fn print_summary(ctx: &CommandContext, summary: &ReportSummary, path: &Path) {
    ctx.print(&format!(
        "{} Wrote {} alerts from {} repositories to {}",
        "✓".green(),
        summary.rows,
        summary.repositories,
        path.display()
    ));

    if !summary.skipped.is_empty() {
        ctx.print(&format!(
            "{} Skipped {} repositories: {}",
            "⚠".yellow(),
            summary.skipped.len(),
            summary.skipped.join(", ")
        ));
    }
}
