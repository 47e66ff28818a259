//! Lifecycle API client error types.

/// Errors from lifecycle policy API calls and reconciliation.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// HTTP transport failure (connection, timeout). Propagated
    /// verbatim; retry policy belongs to the caller.
    #[error("transport error calling {endpoint}: {source}")]
    Transport {
        /// The endpoint being called when the transport failed.
        endpoint: String,
        /// Underlying reqwest error.
        source: reqwest::Error,
    },

    /// A response body could not be decoded as JSON. Distinct from
    /// [`LifecycleError::Remote`]: the remote answered, but with a
    /// malformed body.
    #[error("failed to parse {context}: {source}")]
    Parse {
        /// What was being parsed (e.g. "policy fetch response").
        context: &'static str,
        /// Underlying serde_json error.
        source: serde_json::Error,
    },

    /// The remote answered with a classified non-2xx response.
    #[error("lifecycle API returned {status} ({kind}): {reason}")]
    Remote {
        /// Status reported by the remote error envelope.
        status: u16,
        /// Remote error type, e.g. "resource_not_found_exception".
        kind: String,
        /// Human-readable reason from the remote.
        reason: String,
    },

    /// The outbound policy document could not be serialized. The
    /// document is built from validated configuration, so this
    /// indicates a defect rather than a runtime condition.
    #[error("failed to serialize policy document: {source}")]
    Serialization {
        /// Underlying serde_json error.
        source: serde_json::Error,
    },

    /// The HTTP client could not be constructed from its configuration.
    #[error("client not configured: {reason}")]
    NotConfigured {
        /// Why construction failed.
        reason: String,
    },
}
