//! GitHub REST resource models
//!
//! Only the fields the CLI reads or prints are modeled; everything else in the
//! API responses is ignored on deserialization.

mod alert;
mod bypass;
mod org;
mod repo;
mod sarif;

pub use alert::{
    CodeLocation, CodeScanningAlert, CodeScanningInstance, CodeScanningRule, CodeScanningTool,
    DependabotAlert, Dependency, Package, PatchedVersion, SecretScanningAlert, SecurityAdvisory,
    SecurityVulnerability,
};
pub use bypass::{BypassActor, PushProtectionBypass};
pub use org::{OrgPolicyUpdate, Organization};
pub use repo::{
    FeatureState, Owner, RepoUpdateRequest, Repository, SecurityAndAnalysis,
    SecurityAndAnalysisUpdate, Status,
};
pub use sarif::{SarifUpload, SarifUploadReceipt, SbomResponse};
