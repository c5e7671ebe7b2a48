//! Organization-wide feature toggles
//!
//! `POST orgs/{org}/{product}/{enable_all|disable_all}` asks GitHub to change
//! every existing repository. GitHub queues the work and returns at once;
//! there is no endpoint to poll for completion, so a successful call only
//! means the change was accepted. The follow-up `PATCH orgs/{org}` sets the
//! defaults for repositories created later.

use std::fmt;

use log::debug;
use reqwest::Method;

use super::{Feature, Toggle};
use crate::client::models::OrgPolicyUpdate;
use crate::client::{GitHubApi, mutate};
use crate::error::Result;

/// Security products addressable through the organization enablement endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrgProduct {
    DependencyGraph,
    DependabotAlerts,
    DependabotSecurityUpdates,
    SecretScanning,
    SecretScanningPushProtection,
}

impl OrgProduct {
    pub fn as_str(self) -> &'static str {
        match self {
            OrgProduct::DependencyGraph => "dependency_graph",
            OrgProduct::DependabotAlerts => "dependabot_alerts",
            OrgProduct::DependabotSecurityUpdates => "dependabot_security_updates",
            OrgProduct::SecretScanning => "secret_scanning",
            OrgProduct::SecretScanningPushProtection => "secret_scanning_push_protection",
        }
    }
}

impl fmt::Display for OrgProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed step, reported to the caller's observer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgStep {
    Product { product: OrgProduct, toggle: Toggle },
    Policy,
}

impl fmt::Display for OrgStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrgStep::Product { product, toggle } => write!(
                f,
                "Existing repositories: {} {} requested",
                toggle.verb(),
                product
            ),
            OrgStep::Policy => write!(f, "New repository policy updated"),
        }
    }
}

/// Ordered requests for one organization-wide change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgPlan {
    pub toggle: Toggle,
    /// Products in request order
    pub products: Vec<OrgProduct>,
    pub policy: OrgPolicyUpdate,
}

impl OrgPlan {
    /// Plan for `feature`, or `None` when GitHub has no organization endpoint
    /// for it and repositories must be changed one by one.
    pub fn for_feature(feature: Feature, toggle: Toggle) -> Option<Self> {
        use OrgProduct::*;

        let on = toggle.is_enable();
        let (products, policy) = match (feature, toggle) {
            (Feature::SecretScanning, Toggle::Enable) => (
                vec![SecretScanning],
                OrgPolicyUpdate {
                    secret_scanning: Some(true),
                    ..Default::default()
                },
            ),
            (Feature::SecretScanning, Toggle::Disable) => (
                vec![SecretScanningPushProtection, SecretScanning],
                OrgPolicyUpdate {
                    secret_scanning: Some(false),
                    secret_scanning_push_protection: Some(false),
                    ..Default::default()
                },
            ),
            (Feature::PushProtection, Toggle::Enable) => (
                vec![SecretScanning, SecretScanningPushProtection],
                OrgPolicyUpdate {
                    secret_scanning: Some(true),
                    secret_scanning_push_protection: Some(true),
                    ..Default::default()
                },
            ),
            (Feature::PushProtection, Toggle::Disable) => (
                vec![SecretScanningPushProtection],
                OrgPolicyUpdate {
                    secret_scanning_push_protection: Some(false),
                    ..Default::default()
                },
            ),
            (Feature::Dependabot, _) => {
                let mut chain = vec![DependencyGraph, DependabotAlerts, DependabotSecurityUpdates];
                if !on {
                    chain.reverse();
                }
                (
                    chain,
                    OrgPolicyUpdate {
                        dependency_graph: Some(on),
                        dependabot_alerts: Some(on),
                        dependabot_security_updates: Some(on),
                        ..Default::default()
                    },
                )
            }
            (Feature::NonProviderPatterns, _) => return None,
        };

        Some(Self {
            toggle,
            products,
            policy,
        })
    }
}

/// Run `plan` against `org`: one POST per product, then the policy PATCH.
///
/// `observer` is called after each successful step. The first failure aborts
/// the rest and names the step that failed.
pub async fn apply_org_plan<F>(
    api: &dyn GitHubApi,
    org: &str,
    plan: &OrgPlan,
    mut observer: F,
) -> Result<()>
where
    F: FnMut(&OrgStep),
{
    for &product in &plan.products {
        let path = format!("orgs/{org}/{product}/{}", plan.toggle.enablement());
        debug!("POST {}", path);

        mutate::<()>(api, Method::POST, &path, None)
            .await
            .map_err(|e| {
                e.in_step(format!(
                    "{} {} for existing repositories",
                    plan.toggle.verb(),
                    product
                ))
            })?;
        observer(&OrgStep::Product {
            product,
            toggle: plan.toggle,
        });
    }

    if !plan.policy.is_empty() {
        mutate(api, Method::PATCH, &format!("orgs/{org}"), Some(&plan.policy))
            .await
            .map_err(|e| e.in_step("update the new repository policy"))?;
        observer(&OrgStep::Policy);
    }

    Ok(())
}
