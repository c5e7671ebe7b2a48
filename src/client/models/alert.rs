//! Security alert models (code scanning, secret scanning, Dependabot)

use serde::{Deserialize, Serialize};

/// Code scanning alert from `repos/{owner}/{repo}/code-scanning/alerts`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeScanningAlert {
    pub number: u64,
    pub state: String,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub html_url: String,
    pub rule: CodeScanningRule,
    pub tool: CodeScanningTool,
    pub most_recent_instance: Option<CodeScanningInstance>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeScanningRule {
    pub id: String,
    pub name: Option<String>,
    pub description: String,
    /// `error`, `warning`, `note` or `none`
    pub severity: Option<String>,
    /// `critical`, `high`, `medium` or `low` for security rules
    pub security_severity_level: Option<String>,
}

impl CodeScanningRule {
    /// Security severity when present, otherwise the rule severity.
    pub fn effective_severity(&self) -> &str {
        self.security_severity_level
            .as_deref()
            .or(self.severity.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeScanningTool {
    pub name: String,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeScanningInstance {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub state: String,
    pub location: Option<CodeLocation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeLocation {
    pub path: String,
    pub start_line: u64,
}

/// Secret scanning alert from `repos/{owner}/{repo}/secret-scanning/alerts`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretScanningAlert {
    pub number: u64,
    pub state: String,
    pub created_at: String,
    pub html_url: String,
    pub secret_type: String,
    pub secret_type_display_name: String,
    pub secret: String,
    pub resolution: Option<String>,
    pub resolved_at: Option<String>,
    pub push_protection_bypassed: Option<bool>,
    pub validity: Option<String>,
}

/// Dependabot alert from `repos/{owner}/{repo}/dependabot/alerts`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DependabotAlert {
    pub number: u64,
    pub state: String,
    pub created_at: String,
    pub html_url: String,
    pub dependency: Dependency,
    pub security_advisory: SecurityAdvisory,
    pub security_vulnerability: SecurityVulnerability,
}

impl DependabotAlert {
    /// CVE identifier when the advisory has one, otherwise the GHSA id.
    pub fn advisory_id(&self) -> &str {
        self.security_advisory
            .cve_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(&self.security_advisory.ghsa_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dependency {
    pub package: Package,
    pub manifest_path: String,
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Package {
    pub ecosystem: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityAdvisory {
    pub ghsa_id: String,
    pub cve_id: Option<String>,
    pub summary: String,
    pub severity: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityVulnerability {
    pub severity: String,
    pub vulnerable_version_range: String,
    pub first_patched_version: Option<PatchedVersion>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchedVersion {
    pub identifier: String,
}
