use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use datarelay_aggregator::AggregateError;

pub type ApiResult<T> = Result<T, ApiError>;

/// JSON error payload rendered as `{ "error": ..., "details": [...] }`.
///
/// `details` is omitted when empty so simple client errors stay compact
/// and successful payloads never grow an error shape.
pub struct ApiError {
    status: StatusCode,
    message: String,
    details: Vec<String>,
}

impl ApiError {
    /// Every upstream failed (or none are configured) for a proxy request.
    ///
    /// The per-provider failure messages are surfaced so callers can see
    /// which upstreams were tried and why each failed without server-side
    /// log access.
    pub fn upstream(message: impl Into<String>, source: AggregateError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            details: source.details(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: Vec::new(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = serde_json::Map::new();
        body.insert("error".to_string(), serde_json::json!(self.message));
        if !self.details.is_empty() {
            body.insert("details".to_string(), serde_json::json!(self.details));
        }
        (self.status, Json(serde_json::Value::Object(body))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use datarelay_aggregator::{ProviderError, ProviderFailure};

    use super::*;

    #[test]
    fn test_upstream_error_carries_ordered_details() {
        let source = AggregateError::Exhausted {
            failures: vec![
                ProviderFailure {
                    provider: "P1".into(),
                    error: ProviderError::Status { status: 500 },
                },
                ProviderFailure {
                    provider: "P2".into(),
                    error: ProviderError::Status { status: 503 },
                },
            ],
        };
        let error = ApiError::upstream("Failed to fetch exchange rates", source);

        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message, "Failed to fetch exchange rates");
        assert_eq!(
            error.details,
            vec![
                "P1: HTTP error! Status: 500".to_string(),
                "P2: HTTP error! Status: 503".to_string(),
            ]
        );
    }

    #[test]
    fn test_bad_request_has_no_details() {
        let error = ApiError::bad_request("Invalid base currency code");
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert!(error.details.is_empty());
    }
}
