//! Upstream accounts API subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → AccountsApi (trait object held in AppState)
//!     → client.rs (build URL, one reqwest call, classify status)
//!     → AccountEnvelope on 200/201/204, UpstreamError otherwise
//! ```
//!
//! # Design Decisions
//! - One outbound request per call: no retries, no caching
//! - Upstream status codes are relayed as-is, never remapped
//! - The trait is the seam tests use to substitute the upstream

pub mod client;
pub mod error;

use async_trait::async_trait;
use bytes::Bytes;

use crate::models::AccountEnvelope;

pub use client::HttpAccountsClient;
pub use error::UpstreamError;

/// Resource path of the accounts collection, relative to the base URL.
pub const ACCOUNTS_PATH: [&str; 3] = ["v1", "organisation", "accounts"];

/// The three account operations the proxy forwards.
///
/// Any implementation honouring these contracts can back the HTTP handlers.
#[async_trait]
pub trait AccountsApi: Send + Sync {
    /// Fetch a single account by its upstream id.
    async fn get_account(&self, account_id: &str) -> Result<AccountEnvelope, UpstreamError>;

    /// Create an account from a raw JSON envelope, returning what upstream stored.
    async fn post_account(&self, body: Bytes) -> Result<AccountEnvelope, UpstreamError>;

    /// Delete an account at the given optimistic concurrency version.
    async fn delete_account(&self, account_id: &str, version: &str) -> Result<(), UpstreamError>;
}
