//! Account endpoint handlers.
//!
//! Each handler validates its parameters, makes at most one upstream call,
//! and maps the outcome to a response. Missing parameters fail fast with 400
//! before the upstream is contacted.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use bytes::Bytes;
use serde::Deserialize;

use crate::http::response::{empty_response, json_response, ApiError};
use crate::http::server::AppState;

/// Query string of a delete request.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    pub version: Option<String>,
}

/// `GET /form3Client/accounts/{accountId}`
pub async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Response, ApiError> {
    fetch_account(&state, &account_id).await
}

/// `GET /form3Client/accounts/` with an empty id.
pub async fn get_account_without_id(State(state): State<AppState>) -> Result<Response, ApiError> {
    fetch_account(&state, "").await
}

/// `POST /form3Client/accounts`: the body is forwarded unmodified.
pub async fn create_account(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let envelope = state.accounts.post_account(body).await?;
    tracing::info!(account_id = %envelope.data.id, "Account created");
    json_response(StatusCode::CREATED, &envelope)
}

/// `DELETE /form3Client/accounts/{accountId}?version={n}`
pub async fn delete_account(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<Response, ApiError> {
    remove_account(&state, &account_id, params.version.as_deref()).await
}

/// `DELETE /form3Client/accounts/` with an empty id.
pub async fn delete_account_without_id(
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> Result<Response, ApiError> {
    remove_account(&state, "", params.version.as_deref()).await
}

async fn fetch_account(state: &AppState, account_id: &str) -> Result<Response, ApiError> {
    let account_id = require("accountId", account_id)?;
    tracing::debug!(account_id, "Fetching account");

    let envelope = state.accounts.get_account(account_id).await?;
    json_response(StatusCode::OK, &envelope)
}

async fn remove_account(
    state: &AppState,
    account_id: &str,
    version: Option<&str>,
) -> Result<Response, ApiError> {
    let account_id = require("accountId", account_id)?;
    let version = require("version", version.unwrap_or_default())?;

    state.accounts.delete_account(account_id, version).await?;
    tracing::info!(account_id, version, "Account deleted");
    Ok(empty_response(StatusCode::NO_CONTENT))
}

fn require<'a>(name: &'static str, value: &'a str) -> Result<&'a str, ApiError> {
    if value.is_empty() {
        Err(ApiError::MissingParameter(name))
    } else {
        Ok(value)
    }
}
