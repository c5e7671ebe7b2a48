//! Alert and bypass display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{format_datetime, or_dash, truncate_string};
use crate::client::models::{
    CodeScanningAlert, DependabotAlert, PushProtectionBypass, SecretScanningAlert,
};

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CodeScanningDisplay {
    #[tabled(rename = "#")]
    pub number: u64,

    #[tabled(rename = "STATE")]
    pub state: String,

    #[tabled(rename = "SEVERITY")]
    pub severity: String,

    #[tabled(rename = "RULE")]
    pub rule: String,

    #[tabled(rename = "TOOL")]
    pub tool: String,

    #[tabled(rename = "LOCATION")]
    pub location: String,

    #[tabled(rename = "CREATED")]
    pub created: String,
}

impl From<&CodeScanningAlert> for CodeScanningDisplay {
    fn from(alert: &CodeScanningAlert) -> Self {
        let location = alert
            .most_recent_instance
            .as_ref()
            .and_then(|i| i.location.as_ref())
            .map(|l| format!("{}:{}", truncate_string(&l.path, 40), l.start_line))
            .unwrap_or_else(|| "--".to_string());

        Self {
            number: alert.number,
            state: alert.state.clone(),
            severity: or_dash(Some(alert.rule.effective_severity())),
            rule: alert.rule.id.clone(),
            tool: alert.tool.name.clone(),
            location,
            created: format_datetime(&alert.created_at),
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SecretScanningDisplay {
    #[tabled(rename = "#")]
    pub number: u64,

    #[tabled(rename = "STATE")]
    pub state: String,

    #[tabled(rename = "SECRET TYPE")]
    pub secret_type: String,

    #[tabled(rename = "RESOLUTION")]
    pub resolution: String,

    #[tabled(rename = "VALIDITY")]
    pub validity: String,

    #[tabled(rename = "CREATED")]
    pub created: String,
}

impl From<&SecretScanningAlert> for SecretScanningDisplay {
    fn from(alert: &SecretScanningAlert) -> Self {
        let secret_type = if alert.secret_type_display_name.is_empty() {
            alert.secret_type.clone()
        } else {
            alert.secret_type_display_name.clone()
        };

        Self {
            number: alert.number,
            state: alert.state.clone(),
            secret_type,
            resolution: or_dash(alert.resolution.as_deref()),
            validity: or_dash(alert.validity.as_deref()),
            created: format_datetime(&alert.created_at),
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct DependabotDisplay {
    #[tabled(rename = "#")]
    pub number: u64,

    #[tabled(rename = "STATE")]
    pub state: String,

    #[tabled(rename = "SEVERITY")]
    pub severity: String,

    #[tabled(rename = "PACKAGE")]
    pub package: String,

    #[tabled(rename = "ADVISORY")]
    pub advisory: String,

    #[tabled(rename = "VULNERABLE")]
    pub vulnerable: String,

    #[tabled(rename = "PATCHED")]
    pub patched: String,
}

impl From<&DependabotAlert> for DependabotDisplay {
    fn from(alert: &DependabotAlert) -> Self {
        let package = &alert.dependency.package;
        let package = if package.ecosystem.is_empty() {
            package.name.clone()
        } else {
            format!("{} ({})", package.name, package.ecosystem)
        };

        Self {
            number: alert.number,
            state: alert.state.clone(),
            severity: or_dash(Some(alert.security_advisory.severity.as_str())),
            package,
            advisory: alert.advisory_id().to_string(),
            vulnerable: or_dash(Some(
                alert.security_vulnerability.vulnerable_version_range.as_str(),
            )),
            patched: or_dash(
                alert
                    .security_vulnerability
                    .first_patched_version
                    .as_ref()
                    .map(|v| v.identifier.as_str()),
            ),
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct BypassDisplay {
    #[tabled(rename = "ACTOR")]
    pub actor: String,

    #[tabled(rename = "TOKEN TYPE")]
    pub token_type: String,

    #[tabled(rename = "REASON")]
    pub reason: String,

    #[tabled(rename = "EXPIRES")]
    pub expires: String,
}

impl From<&PushProtectionBypass> for BypassDisplay {
    fn from(bypass: &PushProtectionBypass) -> Self {
        Self {
            actor: or_dash(bypass.actor.as_ref().map(|a| a.login.as_str())),
            token_type: bypass.token_type.clone(),
            reason: bypass.reason.clone(),
            expires: bypass
                .expire_at
                .as_deref()
                .map(format_datetime)
                .unwrap_or_else(|| "--".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::{CodeLocation, CodeScanningInstance};

    #[test]
    fn test_code_scanning_location() {
        let mut alert = CodeScanningAlert::default();
        assert_eq!(CodeScanningDisplay::from(&alert).location, "--");

        alert.most_recent_instance = Some(CodeScanningInstance {
            location: Some(CodeLocation {
                path: "src/app.js".to_string(),
                start_line: 12,
            }),
            ..Default::default()
        });
        assert_eq!(CodeScanningDisplay::from(&alert).location, "src/app.js:12");
    }

    #[test]
    fn test_dependabot_display_package_and_patch() {
        let mut alert = DependabotAlert::default();
        alert.dependency.package.name = "lodash".to_string();
        alert.dependency.package.ecosystem = "npm".to_string();
        alert.security_advisory.ghsa_id = "GHSA-1".to_string();

        let row = DependabotDisplay::from(&alert);
        assert_eq!(row.package, "lodash (npm)");
        assert_eq!(row.advisory, "GHSA-1");
        assert_eq!(row.patched, "--");
    }

    #[test]
    fn test_secret_display_prefers_display_name() {
        let alert = SecretScanningAlert {
            secret_type: "github_personal_access_token".to_string(),
            secret_type_display_name: "GitHub Personal Access Token".to_string(),
            ..Default::default()
        };
        assert_eq!(
            SecretScanningDisplay::from(&alert).secret_type,
            "GitHub Personal Access Token"
        );
    }
}
