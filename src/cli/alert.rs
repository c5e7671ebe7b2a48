//! Alert and bypass listings for one repository

use crate::cli::CommandContext;
use crate::cli::handlers::run_list_command;
use crate::cli::repo::resolve_repo;
use crate::client::models::{
    CodeScanningAlert, DependabotAlert, PushProtectionBypass, SecretScanningAlert,
};
use crate::error::Result;
use crate::models::{BypassDisplay, CodeScanningDisplay, DependabotDisplay, SecretScanningDisplay};
use crate::report::ReportKind;

/// Run the `list alerts <kind>` command.
pub async fn list(ctx: &CommandContext, kind: ReportKind, repo: Option<String>) -> Result<()> {
    let (owner, name) = resolve_repo(ctx, repo)?;
    let path = format!("repos/{owner}/{name}/{}/alerts", kind.slug());

    match kind {
        ReportKind::CodeScanning => {
            run_list_command::<CodeScanningAlert, CodeScanningDisplay>(ctx, &path, "alerts").await
        }
        ReportKind::SecretScanning => {
            run_list_command::<SecretScanningAlert, SecretScanningDisplay>(ctx, &path, "alerts")
                .await
        }
        ReportKind::Dependabot => {
            run_list_command::<DependabotAlert, DependabotDisplay>(ctx, &path, "alerts").await
        }
    }
}

/// Run the `list bypasses` command.
pub async fn bypasses(ctx: &CommandContext, repo: Option<String>) -> Result<()> {
    let (owner, name) = resolve_repo(ctx, repo)?;
    let path = format!("repos/{owner}/{name}/secret-scanning/push-protection-bypasses");

    run_list_command::<PushProtectionBypass, BypassDisplay>(ctx, &path, "bypasses").await
}
