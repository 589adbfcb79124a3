//! Error type and conversions.
use axum::{response::IntoResponse, Json};
use hyper::StatusCode;
use serde_json::json;
use statuslist_core::checks::CheckError;
use statuslist_core::evaluator::EvaluatorError;
use statuslist_core::fetcher::FetchError;
use thiserror::Error;

/// Status list HTTP error type.
#[derive(Error, Debug)]
pub enum StatusListHTTPError {
    /// HTTP client could not be built from the fetcher configuration.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuildError(reqwest::Error),
    /// Configured header name or value is invalid.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
    #[error("Status evaluation error: {0}")]
    EvaluatorError(#[from] EvaluatorError),
    #[error("Fetch error: {0}")]
    FetchError(#[from] FetchError),
    #[error("Invalid credential: {0}")]
    InvalidCredential(#[from] CheckError),
    /// A credential status entry is set in its status list.
    #[error("Credential status asserted: {0}")]
    CredentialStatusAsserted(String),
    #[error("Status list does not exist: {0}")]
    StatusListDoesNotExist(String),
    #[error("Failed to read status lists from {0}: {1}")]
    FileReadError(String, String),
    #[error("JSON Deserialization Error: {0}.")]
    FailedToDeserialize(#[from] serde_json::Error),
}

// Make StatusListHTTPError suitable for axum responses.
impl IntoResponse for StatusListHTTPError {
    fn into_response(self) -> axum::response::Response {
        let (status, err_message) = match self {
            err @ StatusListHTTPError::StatusListDoesNotExist(_) => {
                (StatusCode::NOT_FOUND, err.to_string())
            }
            err @ StatusListHTTPError::EvaluatorError(_)
            | err @ StatusListHTTPError::CredentialStatusAsserted(_)
            | err @ StatusListHTTPError::InvalidCredential(_)
            | err @ StatusListHTTPError::FailedToDeserialize(_) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            err @ StatusListHTTPError::FetchError(FetchError::Timeout(_)) => {
                (StatusCode::GATEWAY_TIMEOUT, err.to_string())
            }
            err @ StatusListHTTPError::FetchError(_) => (StatusCode::BAD_GATEWAY, err.to_string()),
            err @ StatusListHTTPError::ClientBuildError(_)
            | err @ StatusListHTTPError::InvalidHeader(_)
            | err @ StatusListHTTPError::FileReadError(_, _) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };
        let body = Json(json!({ "error": err_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statuslist_core::bitstring::StatusListError;

    #[test]
    fn test_status_codes() {
        let response =
            StatusListHTTPError::StatusListDoesNotExist("3".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = StatusListHTTPError::from(EvaluatorError::from(
            StatusListError::MalformedEncoding("bad".to_string()),
        ))
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response =
            StatusListHTTPError::from(FetchError::Timeout("https://a".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }
}
