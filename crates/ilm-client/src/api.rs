//! # Lifecycle Policy API Surface
//!
//! The narrow seam to the remote cluster: an object-safe async trait
//! exposing get/put of a named lifecycle policy as raw status+body
//! pairs, and the classifier that turns a fetch response into one of
//! three outcomes.
//!
//! ## 404 Disambiguation
//!
//! An HTTP 404 on fetch is ambiguous: it can mean the policy is absent
//! on the cluster, or it can come from routing in front of the cluster
//! (deployment not found) with the same status code. The cluster's own
//! error envelope `{status, error:{type, reason}}` settles it: only an
//! envelope that itself reports 404 counts as "policy not found"; any
//! other envelope status is a remote failure carried back to the
//! caller.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::LifecycleError;

/// Raw result of a lifecycle API call: HTTP status and response body.
///
/// The client deliberately does not interpret status codes — that is
/// the classifier's job.
#[derive(Debug, Clone)]
pub struct PolicyResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl PolicyResponse {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Remote error cause inside the error envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorCause {
    /// Remote error type identifier.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Human-readable reason.
    #[serde(default)]
    pub reason: String,
}

/// Error envelope the cluster returns on failed calls:
/// `{"status": 404, "error": {"type": "...", "reason": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    /// Status as reported inside the body. May differ from the HTTP
    /// status when an intermediary generated the response.
    #[serde(default)]
    pub status: u16,
    /// Error cause detail.
    #[serde(default)]
    pub error: ErrorCause,
}

/// Structured detail extracted from a remote error response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    /// Status reported by the error envelope.
    pub status: u16,
    /// Remote error type.
    pub kind: String,
    /// Human-readable reason.
    pub reason: String,
}

impl From<ErrorDetail> for LifecycleError {
    fn from(detail: ErrorDetail) -> Self {
        LifecycleError::Remote {
            status: detail.status,
            kind: detail.kind,
            reason: detail.reason,
        }
    }
}

/// Classified outcome of a policy fetch.
#[derive(Debug)]
pub enum Outcome {
    /// 2xx — the decoded response body.
    Found(Value),
    /// The policy genuinely does not exist on the cluster.
    NotFound,
    /// The remote reported a failure other than policy-absent.
    Failed(ErrorDetail),
}

/// Async interface to the remote lifecycle policy API.
///
/// Implementations must be `Send + Sync` so they can be shared across
/// async tasks behind an `Arc`. The trait is object-safe to support
/// swapping the HTTP client for a test double.
#[async_trait]
pub trait LifecyclePolicyApi: Send + Sync {
    /// Fetch the named policy. Only transport failures are errors
    /// here; non-2xx statuses come back as a [`PolicyResponse`] for
    /// classification.
    async fn get_lifecycle(&self, policy_name: &str) -> Result<PolicyResponse, LifecycleError>;

    /// Create or fully replace the named policy with a JSON document
    /// body.
    async fn put_lifecycle(
        &self,
        policy_name: &str,
        body: String,
    ) -> Result<PolicyResponse, LifecycleError>;
}

fn parse_envelope(response: &PolicyResponse) -> Result<ErrorEnvelope, LifecycleError> {
    serde_json::from_slice(&response.body).map_err(|source| LifecycleError::Parse {
        context: "error envelope",
        source,
    })
}

fn envelope_detail(http_status: u16, envelope: ErrorEnvelope) -> ErrorDetail {
    ErrorDetail {
        // An empty envelope carries status 0; fall back to the wire status.
        status: if envelope.status != 0 {
            envelope.status
        } else {
            http_status
        },
        kind: envelope.error.kind,
        reason: envelope.error.reason,
    }
}

/// Classify a policy fetch response.
///
/// - 2xx: [`Outcome::Found`] with the decoded body.
/// - 404 with an envelope reporting 404: [`Outcome::NotFound`].
/// - 404 with an envelope reporting another status, or any other
///   non-2xx: [`Outcome::Failed`] with the envelope detail.
/// - Malformed body: `Err(Parse)`, distinct from a remote failure.
pub fn classify(response: &PolicyResponse) -> Result<Outcome, LifecycleError> {
    if response.status == 404 {
        let envelope = parse_envelope(response)?;
        if envelope.status == 404 {
            return Ok(Outcome::NotFound);
        }
        return Ok(Outcome::Failed(envelope_detail(response.status, envelope)));
    }

    if !response.is_success() {
        let envelope = parse_envelope(response)?;
        return Ok(Outcome::Failed(envelope_detail(response.status, envelope)));
    }

    let body: Value =
        serde_json::from_slice(&response.body).map_err(|source| LifecycleError::Parse {
            context: "policy fetch response",
            source,
        })?;
    Ok(Outcome::Found(body))
}

/// Check a mutation response, turning any non-2xx into a
/// [`LifecycleError::Remote`] built from the error envelope.
pub fn check_response(response: &PolicyResponse) -> Result<(), LifecycleError> {
    if response.is_success() {
        return Ok(());
    }
    let envelope = parse_envelope(response)?;
    Err(envelope_detail(response.status, envelope).into())
}
