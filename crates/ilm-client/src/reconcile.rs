//! # Lifecycle Policy Reconciliation
//!
//! Bring the cluster-stored lifecycle policy for a resource in line
//! with desired thresholds: fetch by derived name, create when absent,
//! and overwrite on any drift in the effective rollover/retention
//! settings.
//!
//! ## Overwrite Semantics
//!
//! Updates are a full-document replace of the named policy, matching
//! the remote API's own semantics. There is no partial or merge
//! update: any mismatch in the three compared fields marks the whole
//! policy stale and rewrites it from desired state.

use ilm_core::document::DocView;
use ilm_core::policy::{
    lifecycle_policy_name, render_days, render_policy, render_size, LifecycleThresholds,
};
use serde_json::Value;

use crate::api::{check_response, classify, LifecyclePolicyApi, Outcome};
use crate::error::LifecycleError;

/// Ensure the lifecycle policy for `resource` exists on the cluster
/// with the default thresholds (300gb / 30d rollover, 90d retention).
///
/// Equivalent to [`ensure_lifecycle_policy_with`] with
/// [`LifecycleThresholds::default`].
pub async fn ensure_lifecycle_policy<C>(client: &C, resource: &str) -> Result<(), LifecycleError>
where
    C: LifecyclePolicyApi + ?Sized,
{
    ensure_lifecycle_policy_with(client, resource, &LifecycleThresholds::default()).await
}

/// Ensure the lifecycle policy for `resource` exists on the cluster
/// and matches `thresholds`.
///
/// Fetches the policy named [`lifecycle_policy_name`]`(resource)`,
/// creates it when the cluster reports it absent, and overwrites it
/// when any of the effective rollover size, rollover age, or delete
/// age differs from the desired value. Every failure aborts the call;
/// there is no retry and no rollback.
///
/// Concurrent calls for the same resource are not serialized here: two
/// callers can both observe the policy absent and both create it. The
/// put is a full replace of the same rendered document, so the race
/// converges; callers that need strict once-only creation must
/// serialize externally.
pub async fn ensure_lifecycle_policy_with<C>(
    client: &C,
    resource: &str,
    thresholds: &LifecycleThresholds,
) -> Result<(), LifecycleError>
where
    C: LifecyclePolicyApi + ?Sized,
{
    let policy = lifecycle_policy_name(resource);

    let response = match client.get_lifecycle(&policy).await {
        Ok(response) => response,
        Err(e) => {
            tracing::info!(policy = %policy, error = %e, "failed to fetch lifecycle policy");
            return Err(e);
        }
    };

    let outcome = classify(&response).map_err(|e| {
        tracing::warn!(policy = %policy, error = %e, "failed to parse lifecycle policy response");
        e
    })?;

    match outcome {
        Outcome::NotFound => {
            tracing::info!(policy = %policy, "lifecycle policy not found, creating");
            put_policy(client, &policy, thresholds).await
        }
        Outcome::Failed(detail) => {
            tracing::info!(
                policy = %policy,
                status = detail.status,
                kind = %detail.kind,
                "error response fetching lifecycle policy"
            );
            Err(detail.into())
        }
        Outcome::Found(doc) => {
            tracing::info!(policy = %policy, "found lifecycle policy");
            sync_policy(client, &policy, &doc, thresholds).await
        }
    }
}

/// Compare the fetched policy's effective settings against desired
/// thresholds and rewrite the policy when they diverge.
async fn sync_policy<C>(
    client: &C,
    policy: &str,
    fetched: &Value,
    thresholds: &LifecycleThresholds,
) -> Result<(), LifecycleError>
where
    C: LifecyclePolicyApi + ?Sized,
{
    // The fetch response nests the policy under its own name.
    let phases = DocView::root(fetched)
        .get_map(policy)
        .get_map("policy")
        .get_map("phases");
    let rollover = phases.get_map("hot").get_map("actions").get_map("rollover");

    let existing_rollover_size = rollover.get_str("max_size");
    let existing_rollover_age = rollover.get_str("max_age");
    let existing_delete_age = phases.get_map("delete").get_str("min_age");

    // Desired values are compared in rendered form even when a
    // threshold is zero: an existing value against a desired "unset"
    // is a mismatch and triggers a rewrite.
    let desired_rollover_size = render_size(thresholds.rollover_size_gb);
    let desired_rollover_age = render_days(thresholds.rollover_age_days);
    let desired_delete_age = render_days(thresholds.delete_age_days);

    if existing_rollover_size == desired_rollover_size
        && existing_rollover_age == desired_rollover_age
        && existing_delete_age == desired_delete_age
    {
        tracing::debug!(policy = %policy, "lifecycle policy settings are up to date");
        return Ok(());
    }

    tracing::info!(
        policy = %policy,
        old_rollover_size = existing_rollover_size,
        new_rollover_size = %desired_rollover_size,
        old_rollover_age = existing_rollover_age,
        new_rollover_age = %desired_rollover_age,
        old_delete_age = existing_delete_age,
        new_delete_age = %desired_delete_age,
        "lifecycle policy settings changed, updating"
    );

    put_policy(client, policy, thresholds).await.map_err(|e| {
        tracing::warn!(policy = %policy, error = %e, "failed to update lifecycle policy");
        e
    })
}

/// Render the desired document and create/replace the named policy.
async fn put_policy<C>(
    client: &C,
    policy: &str,
    thresholds: &LifecycleThresholds,
) -> Result<(), LifecycleError>
where
    C: LifecyclePolicyApi + ?Sized,
{
    let doc = render_policy(thresholds);
    let body =
        serde_json::to_string(&doc).map_err(|source| LifecycleError::Serialization { source })?;

    tracing::debug!(policy = %policy, body = %body, "writing lifecycle policy");

    let response = client.put_lifecycle(policy, body).await?;
    check_response(&response)
}
