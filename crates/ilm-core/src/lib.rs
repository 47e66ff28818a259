//! # ILM Core
//!
//! Domain types for index lifecycle management (ILM) policy
//! reconciliation. This crate is pure — no I/O, no async — and holds
//! the two pieces the reconciler in `ilm-client` builds on:
//!
//! - [`document::DocView`]: a schema-tolerant read-only view over a
//!   parsed JSON tree, safe to chain through subtrees that may not
//!   exist in a remotely-fetched policy document.
//! - [`policy`]: lifecycle threshold configuration, policy name
//!   derivation, and rendering of the policy document the cluster's
//!   `_ilm/policy` API expects.

pub mod document;
pub mod policy;

pub use document::DocView;
pub use policy::{
    lifecycle_policy_name, render_days, render_policy, render_size, LifecycleThresholds,
};
