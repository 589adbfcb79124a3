//! Status list credential retrieval over HTTP(S).
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use serde_json::Value;
use statuslist_core::fetcher::{FetchError, StatusListFetcher};

use crate::config::FetcherConfig;
use crate::errors::StatusListHTTPError;
use crate::ACCEPT_HEADER_VALUE;

/// Builds an HTTP client from an explicit fetcher configuration.
pub fn http_client(config: &FetcherConfig) -> Result<reqwest::Client, StatusListHTTPError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER_VALUE));
    for (name, value) in &config.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| StatusListHTTPError::InvalidHeader(format!("{name}: {e}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| StatusListHTTPError::InvalidHeader(format!("{name}: {e}")))?;
        headers.insert(header_name, header_value);
    }
    if config.accept_invalid_certs {
        warn!("TLS certificate verification is disabled.");
    }
    reqwest::Client::builder()
        .timeout(config.timeout())
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .default_headers(headers)
        .build()
        .map_err(StatusListHTTPError::ClientBuildError)
}

/// Maps a transport error, keeping timeouts distinct.
pub(crate) fn request_error(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(url.to_string())
    } else {
        FetchError::Request {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}

/// Fetches status list credentials with a single GET per call and no retries.
#[derive(Debug, Clone)]
pub struct HttpStatusListFetcher {
    client: reqwest::Client,
}

impl HttpStatusListFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, StatusListHTTPError> {
        Ok(Self {
            client: http_client(config)?,
        })
    }
}

#[async_trait]
impl StatusListFetcher for HttpStatusListFetcher {
    async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error(url, e))?;
        if response.status() != StatusCode::OK {
            return Err(FetchError::UnexpectedStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::InvalidDocument {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })
    }
}
