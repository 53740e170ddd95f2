//! Reqwest-backed client for the upstream accounts API.
//!
//! # Responsibilities
//! - Build `{base}/v1/organisation/accounts[/{id}][?version={n}]` URLs
//! - Execute exactly one request per operation with a bounded timeout
//! - Classify 200/201/204 as success, everything else as a rejection
//! - Decode account envelopes from successful responses

use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use url::Url;

use crate::config::UpstreamConfig;
use crate::models::AccountEnvelope;
use crate::observability::metrics;
use crate::upstream::{AccountsApi, UpstreamError, ACCOUNTS_PATH};

/// Accounts API client over a shared reqwest connection pool.
#[derive(Debug, Clone)]
pub struct HttpAccountsClient {
    client: Client,
    base_url: Url,
}

impl HttpAccountsClient {
    /// Create a client from the upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(&config.base_url).map_err(UpstreamError::request)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(UpstreamError::request)?;

        tracing::debug!(
            base_url = %base_url,
            timeout_secs = config.timeout_secs,
            "Upstream accounts client ready"
        );

        Ok(Self::with_client(client, base_url))
    }

    /// Wrap an existing reqwest client.
    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the accounts collection, optionally narrowed to one account.
    pub fn accounts_url(&self, account_id: Option<&str>) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| UpstreamError::request(format!("{} cannot be a base URL", self.base_url)))?;
            segments.pop_if_empty().extend(ACCOUNTS_PATH);
            if let Some(id) = account_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
    }

    /// Send one request and split the outcome into status and body.
    async fn execute(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Bytes, UpstreamError> {
        let start = Instant::now();

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_upstream_call(operation, "unreachable", start);
                tracing::warn!(operation, error = %e, "Upstream request failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        metrics::record_upstream_call(operation, status.as_str(), start);

        if !is_success(status) {
            let body = response.text().await.map_err(|e| {
                tracing::warn!(operation, status = %status, error = %e, "Failed to read upstream rejection body");
                UpstreamError::Unreachable(e)
            })?;
            tracing::debug!(operation, status = %status, body = %body, "Upstream rejected request");
            return Err(UpstreamError::Rejected { status, body });
        }

        response.bytes().await.map_err(|e| {
            tracing::warn!(operation, error = %e, "Failed to read upstream response body");
            UpstreamError::Unreachable(e)
        })
    }
}

/// Only these three codes count as success; any other status is relayed.
pub fn is_success(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT
    )
}

fn decode_envelope(body: &[u8]) -> Result<AccountEnvelope, UpstreamError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(error = %e, "Upstream returned a malformed account envelope");
        UpstreamError::Decode(e)
    })
}

#[async_trait]
impl AccountsApi for HttpAccountsClient {
    async fn get_account(&self, account_id: &str) -> Result<AccountEnvelope, UpstreamError> {
        let url = self.accounts_url(Some(account_id))?;
        let body = self.execute("get", self.request(Method::GET, url)).await?;
        decode_envelope(&body)
    }

    async fn post_account(&self, body: Bytes) -> Result<AccountEnvelope, UpstreamError> {
        let url = self.accounts_url(None)?;
        let body = self
            .execute("post", self.request(Method::POST, url).body(body))
            .await?;
        decode_envelope(&body)
    }

    async fn delete_account(&self, account_id: &str, version: &str) -> Result<(), UpstreamError> {
        let mut url = self.accounts_url(Some(account_id))?;
        url.query_pairs_mut().append_pair("version", version);
        self.execute("delete", self.request(Method::DELETE, url))
            .await
            .map(|_| ())
    }
}
