//! SARIF upload and SBOM payloads

use serde::{Deserialize, Serialize};

/// Body of `POST repos/{owner}/{repo}/code-scanning/sarifs`.
///
/// `sarif` holds the gzip-compressed, base64-encoded SARIF document.
#[derive(Debug, Clone, Serialize)]
pub struct SarifUpload {
    pub commit_sha: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub sarif: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub validate: bool,
}

/// 202 response of a SARIF upload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SarifUploadReceipt {
    pub id: String,
    pub url: String,
}

/// Wrapper returned by `repos/{owner}/{repo}/dependency-graph/sbom`.
///
/// The SPDX document is passed through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SbomResponse {
    pub sbom: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_omits_optional_fields() {
        let upload = SarifUpload {
            commit_sha: "abc123".to_string(),
            git_ref: "refs/heads/main".to_string(),
            sarif: "H4sI".to_string(),
            checkout_uri: None,
            tool_name: None,
            validate: false,
        };
        let value = serde_json::to_value(&upload).unwrap();
        assert_eq!(value["ref"], "refs/heads/main");
        assert!(value.get("tool_name").is_none());
        assert!(value.get("validate").is_none());
    }

    #[test]
    fn test_receipt_deserialize() {
        let json = r#"{ "id": "47177e22-5596-11eb-80a1-c1e54ef945c6", "url": "https://api.github.com/x" }"#;
        let receipt: SarifUploadReceipt = serde_json::from_str(json).unwrap();
        assert!(receipt.id.starts_with("47177e22"));
    }
}
