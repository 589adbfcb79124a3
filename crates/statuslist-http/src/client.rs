//! Client for third-party verifier endpoints (VC API `/credentials/verify`).
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use statuslist_core::checks::VerificationOutcome;
use statuslist_core::fetcher::FetchError;

use crate::config::FetcherConfig;
use crate::errors::StatusListHTTPError;
use crate::fetcher::{http_client, request_error};
use crate::{CREDENTIAL_STATUS_CHECK, PROOF_CHECK};

/// Options sent alongside a credential for verification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyOptions {
    pub checks: Vec<String>,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            checks: vec![PROOF_CHECK.to_string(), CREDENTIAL_STATUS_CHECK.to_string()],
        }
    }
}

/// Body of a verification request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub verifiable_credential: Value,
    #[serde(default)]
    pub options: VerifyOptions,
}

/// Authorization attached to verification requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Auth {
    #[serde(rename = "oauth2-bearer-token", rename_all = "camelCase")]
    Oauth2BearerToken { access_token: String },
}

/// Posts credentials to a verifier endpoint.
#[derive(Debug, Clone)]
pub struct VerifierClient {
    client: reqwest::Client,
    endpoint: String,
}

impl VerifierClient {
    pub fn new(endpoint: &str, config: &FetcherConfig) -> Result<Self, StatusListHTTPError> {
        Ok(Self {
            client: http_client(config)?,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts a credential for verification of its proof and credential status.
    ///
    /// Any HTTP response, including 4xx and 5xx, is returned as an outcome;
    /// only transport failures are errors.
    pub async fn verify(
        &self,
        credential: &Value,
        auth: Option<&Auth>,
    ) -> Result<VerificationOutcome, FetchError> {
        self.verify_with_options(credential, VerifyOptions::default(), auth)
            .await
    }

    pub async fn verify_with_options(
        &self,
        credential: &Value,
        options: VerifyOptions,
        auth: Option<&Auth>,
    ) -> Result<VerificationOutcome, FetchError> {
        let body = VerifyRequest {
            verifiable_credential: credential.to_owned(),
            options,
        };
        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(Auth::Oauth2BearerToken { access_token }) = auth {
            request = request.bearer_auth(access_token);
        }
        info!("Posting credential to verifier: {}", self.endpoint);
        let response = request
            .send()
            .await
            .map_err(|e| request_error(&self.endpoint, e))?;
        let status_code = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| request_error(&self.endpoint, e))?;
        debug!("Verifier responded with {status_code}: {text}");
        Ok(VerificationOutcome {
            status_code,
            body: serde_json::from_str(&text).ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verify_request_serialization() {
        let request = VerifyRequest {
            verifiable_credential: json!({"id": "urn:uuid:1"}),
            options: VerifyOptions::default(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "verifiableCredential": {"id": "urn:uuid:1"},
                "options": {"checks": ["proof", "credentialStatus"]}
            })
        );
        let parsed: VerifyRequest =
            serde_json::from_value(json!({"verifiableCredential": {}})).unwrap();
        assert_eq!(parsed.options, VerifyOptions::default());
    }

    #[test]
    fn test_auth_deserialization() {
        let auth: Auth = serde_json::from_value(json!({
            "type": "oauth2-bearer-token",
            "accessToken": "abc"
        }))
        .unwrap();
        assert_eq!(
            auth,
            Auth::Oauth2BearerToken {
                access_token: "abc".to_string()
            }
        );
    }
}
