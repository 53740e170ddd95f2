//! Response construction and error mapping.
//!
//! Every response, success or failure, declares `application/json`. Error
//! bodies are the error message text: upstream rejections relay the upstream
//! body verbatim, nothing else is added. Failures produced by middleware or
//! extractors (body limit, inbound timeout, bad query) are stamped with the
//! same content type by [`json_failures`].

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::upstream::UpstreamError;

pub const APPLICATION_JSON: &str = "application/json";

/// Failures surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required path or query parameter was absent or empty.
    #[error("missing required parameter '{0}'")]
    MissingParameter(&'static str),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The success payload could not be serialised.
    #[error("unable to encode account into json: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(e) => e.status(),
            Self::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Upstream(e) if e.is_rejection() => {
                tracing::debug!(status = %status, "Relaying upstream rejection");
            }
            Self::MissingParameter(name) => {
                tracing::debug!(parameter = %name, "Rejecting request with missing parameter");
            }
            _ => tracing::error!(status = %status, error = %self, "Request failed"),
        }

        (status, json_content_type(), self.to_string()).into_response()
    }
}

fn json_content_type() -> [(header::HeaderName, HeaderValue); 1] {
    [(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON))]
}

/// Serialise `value` as the JSON body of a `status` response.
pub fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(value).map_err(ApiError::Encode)?;
    Ok((status, json_content_type(), body).into_response())
}

/// A bodiless response that still declares the JSON content type.
pub fn empty_response(status: StatusCode) -> Response {
    (status, json_content_type()).into_response()
}

/// Response middleware: failure statuses always declare `application/json`.
/// The body is left as is, so it stays the error message text.
pub async fn json_failures(mut response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with(APPLICATION_JSON));
    if !is_json {
        tracing::debug!(status = %status, "Marking failure response as json");
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde::ser::Error as _;

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("boom"))
        }
    }

    #[tokio::test]
    async fn test_rejection_body_is_relayed_verbatim() {
        let err = ApiError::from(UpstreamError::Rejected {
            status: StatusCode::NOT_FOUND,
            body: r#"{"error_message":"record 1234 does not exist"}"#.into(),
        });
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::CONTENT_TYPE], APPLICATION_JSON);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"error_message":"record 1234 does not exist"}"#);
    }

    #[tokio::test]
    async fn test_encode_failure_is_internal_error() {
        let err = json_response(StatusCode::OK, &Unencodable).unwrap_err();
        assert!(matches!(err, ApiError::Encode(_)));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).contains("unable to encode account into json"));
    }

    #[tokio::test]
    async fn test_plain_text_failures_become_json() {
        let response = (StatusCode::PAYLOAD_TOO_LARGE, "length limit exceeded").into_response();
        let response = json_failures(response).await;

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response.headers()[header::CONTENT_TYPE], APPLICATION_JSON);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"length limit exceeded");
    }

    #[tokio::test]
    async fn test_success_responses_are_untouched() {
        let response = (StatusCode::OK, "plain").into_response();
        let response = json_failures(response).await;

        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn test_missing_parameter_names_the_parameter() {
        let err = ApiError::MissingParameter("version");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("version"));
    }
}
