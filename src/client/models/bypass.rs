//! Push protection bypass records

use serde::{Deserialize, Serialize};

/// Entry from `repos/{owner}/{repo}/secret-scanning/push-protection-bypasses`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PushProtectionBypass {
    pub reason: String,
    pub expire_at: Option<String>,
    pub token_type: String,
    pub created_at: Option<String>,
    pub actor: Option<BypassActor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BypassActor {
    pub login: String,
}
