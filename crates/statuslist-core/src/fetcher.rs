//! Retrieval of status list credentials.
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// An error relating to retrieval of a status list credential.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FetchError {
    /// Request did not complete within the configured timeout.
    #[error("Request to {0} timed out.")]
    Timeout(String),
    /// Request could not be sent or the connection failed.
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },
    /// Server responded with a status other than 200.
    #[error("Request to {url} returned status code {status}.")]
    UnexpectedStatus { url: String, status: u16 },
    /// Response body is not a JSON document.
    #[error("Invalid document at {url}: {reason}")]
    InvalidDocument { url: String, reason: String },
}

/// Fetches a status list credential document given its URL.
///
/// Implementations make a single attempt per call. A failed fetch is reported
/// to the caller and never retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusListFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Value, FetchError>;
}
