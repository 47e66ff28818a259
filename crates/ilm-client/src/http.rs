//! # HTTP Lifecycle Client
//!
//! Concrete [`LifecyclePolicyApi`] implementation over reqwest,
//! targeting the cluster's `_ilm/policy` endpoints. The client wraps a
//! `reqwest::Client` with the cluster base URL, optional bearer
//! authentication, and a per-request timeout; it returns raw
//! status+body pairs and leaves interpretation to the classifier.

use std::time::Duration;

use async_trait::async_trait;

use crate::api::{LifecyclePolicyApi, PolicyResponse};
use crate::error::LifecycleError;

/// Configuration for the lifecycle HTTP client.
#[derive(Debug, Clone)]
pub struct LifecycleClientConfig {
    /// Base URL of the cluster API (e.g. `https://es.internal:9200`).
    pub base_url: String,
    /// Optional bearer token for cluster authentication.
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

impl LifecycleClientConfig {
    /// Create a new configuration with default timeout and no
    /// authentication.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout_secs: 30,
        }
    }

    /// Set a bearer token for cluster authentication.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// HTTP client for the cluster's lifecycle policy API.
#[derive(Debug)]
pub struct HttpLifecycleClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLifecycleClient {
    /// Build a client from configuration. Fails with
    /// [`LifecycleError::NotConfigured`] when the API key contains
    /// invalid header characters or the underlying client cannot be
    /// constructed.
    pub fn new(config: LifecycleClientConfig) -> Result<Self, LifecycleError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        if let Some(api_key) = &config.api_key {
            headers.insert(
                reqwest::header::AUTHORIZATION,
                reqwest::header::HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(
                    |_| LifecycleError::NotConfigured {
                        reason: "invalid API key characters".to_string(),
                    },
                )?,
            );
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| LifecycleError::NotConfigured {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn policy_url(&self, policy_name: &str) -> String {
        format!("{}/_ilm/policy/{policy_name}", self.base_url)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<PolicyResponse, LifecycleError> {
        let resp = request
            .send()
            .await
            .map_err(|source| LifecycleError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|source| LifecycleError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?
            .to_vec();

        Ok(PolicyResponse { status, body })
    }
}

#[async_trait]
impl LifecyclePolicyApi for HttpLifecycleClient {
    async fn get_lifecycle(&self, policy_name: &str) -> Result<PolicyResponse, LifecycleError> {
        let url = self.policy_url(policy_name);
        tracing::debug!(policy = %policy_name, "fetching lifecycle policy");
        self.send(self.client.get(&url), &url).await
    }

    async fn put_lifecycle(
        &self,
        policy_name: &str,
        body: String,
    ) -> Result<PolicyResponse, LifecycleError> {
        let url = self.policy_url(policy_name);
        tracing::debug!(policy = %policy_name, "putting lifecycle policy");
        self.send(self.client.put(&url).body(body), &url).await
    }
}
