//! # ILM Client
//!
//! Reconciliation of cluster-stored index lifecycle management (ILM)
//! policies. Given a logical resource name, [`ensure_lifecycle_policy`]
//! fetches the derived policy from the cluster, creates it when absent,
//! and overwrites it whenever its effective rollover/retention settings
//! drift from desired configuration.
//!
//! ## Architecture
//!
//! The remote API is consumed through the narrow
//! [`api::LifecyclePolicyApi`] trait: production code uses
//! [`http::HttpLifecycleClient`], tests substitute a scripted double.
//! Responses come back as raw status+body pairs; [`api::classify`]
//! turns a fetch response into found / not-found / failed, including
//! the error-envelope check that separates a genuine "policy not
//! found" 404 from a routing 404 in front of the cluster.
//!
//! ## Failure Model
//!
//! Every failure aborts the current call and surfaces as a single
//! [`error::LifecycleError`]; there is no retry, partial success, or
//! rollback. A failed update leaves the remote policy as it was.

pub mod api;
pub mod error;
pub mod http;
pub mod reconcile;

pub use api::{classify, LifecyclePolicyApi, Outcome, PolicyResponse};
pub use error::LifecycleError;
pub use http::{HttpLifecycleClient, LifecycleClientConfig};
pub use reconcile::{ensure_lifecycle_policy, ensure_lifecycle_policy_with};

// Re-exported so callers computing the name without reconciling do not
// need a direct ilm-core dependency.
pub use ilm_core::policy::{lifecycle_policy_name, LifecycleThresholds};
