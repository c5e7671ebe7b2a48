//! `upload-sarif` command implementation

use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use colored::Colorize;
use flate2::Compression;
use flate2::write::GzEncoder;
use log::debug;
use reqwest::Method;

use crate::cli::repo::resolve_repo;
use crate::cli::{CommandContext, UploadSarifArgs};
use crate::client::models::{SarifUpload, SarifUploadReceipt};
use crate::client::mutate_json;
use crate::error::Result;
use crate::output::json::format_json;

/// gzip then base64, as the upload endpoint expects.
pub fn encode_sarif(raw: &[u8]) -> Result<String> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw)?;
    let compressed = encoder.finish()?;
    Ok(STANDARD.encode(compressed))
}

/// Run the `upload-sarif` command.
pub async fn upload(ctx: &CommandContext, args: UploadSarifArgs) -> Result<()> {
    let (owner, name) = resolve_repo(ctx, args.repo.repo)?;

    let raw = tokio::fs::read(&args.file).await?;
    // Reject files that are not JSON before sending anything
    serde_json::from_slice::<serde_json::Value>(&raw)?;
    let sarif = encode_sarif(&raw)?;
    debug!(
        "Encoded {} ({} bytes -> {} bytes)",
        args.file.display(),
        raw.len(),
        sarif.len()
    );

    let body = SarifUpload {
        commit_sha: args.commit,
        git_ref: args.git_ref,
        sarif,
        checkout_uri: args.checkout_uri,
        tool_name: args.tool,
        validate: args.validate,
    };

    let path = format!("repos/{owner}/{name}/code-scanning/sarifs");
    let receipt: SarifUploadReceipt = mutate_json(ctx.api(), Method::POST, &path, &body).await?;

    if ctx.mode.is_json() {
        ctx.print(&format_json(&receipt)?);
    } else {
        ctx.print(&format!(
            "{} SARIF uploaded to {}/{} (id: {})",
            "✓".green(),
            owner,
            name,
            receipt.id
        ));
        if !receipt.url.is_empty() {
            ctx.print(&format!("  Processing status: {}", receipt.url));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::path::PathBuf;

    use super::*;
    use crate::cli::RepoArg;
    use crate::cli::context::testing::context;
    use crate::client::MockGitHubClient;
    use crate::error::Error;
    use crate::output::OutputMode;
    use crate::output::console::BufferConsole;
    use flate2::read::GzDecoder;
    use serde_json::json;
    use tempfile::tempdir;

    fn args(file: PathBuf) -> UploadSarifArgs {
        UploadSarifArgs {
            repo: RepoArg {
                repo: Some("acme/api".to_string()),
            },
            file,
            commit: "4b6472266afd7b471e86085a6659e8c7f2b119da".to_string(),
            git_ref: "refs/heads/main".to_string(),
            checkout_uri: None,
            tool: Some("semgrep".to_string()),
            validate: false,
        }
    }

    #[test]
    fn test_encode_sarif_is_gzip_base64() {
        let encoded = encode_sarif(br#"{"version":"2.1.0"}"#).unwrap();
        let compressed = STANDARD.decode(encoded).unwrap();

        let mut text = String::new();
        GzDecoder::new(compressed.as_slice())
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, r#"{"version":"2.1.0"}"#);
    }

    #[tokio::test]
    async fn test_upload_posts_encoded_body() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("results.sarif");
        std::fs::write(&file, r#"{"version":"2.1.0","runs":[]}"#).unwrap();

        let mock = MockGitHubClient::new().with_send_response(
            Method::POST,
            "repos/acme/api/code-scanning/sarifs",
            json!({ "id": "47177e22", "url": "https://api.github.com/repos/acme/api/code-scanning/sarifs/47177e22" }),
        );
        let (ctx, mock, console) = context(mock, BufferConsole::new(), OutputMode::Interactive);

        upload(&ctx, args(file)).await.unwrap();

        let sent = mock.mutations();
        assert_eq!(sent.len(), 1);
        let body = sent[0].body.as_ref().unwrap();
        assert_eq!(body["ref"], "refs/heads/main");
        assert_eq!(body["tool_name"], "semgrep");
        assert!(body.get("validate").is_none());
        assert!(body["sarif"].as_str().unwrap().starts_with("H4sI"));
        assert!(console.output().contains("47177e22"));
    }

    #[tokio::test]
    async fn test_upload_rejects_non_json_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("results.sarif");
        std::fs::write(&file, "not json").unwrap();
        let (ctx, mock, _) = context(
            MockGitHubClient::new(),
            BufferConsole::new(),
            OutputMode::Interactive,
        );

        let err = upload(&ctx, args(file)).await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(mock.mutations().is_empty());
    }
}
