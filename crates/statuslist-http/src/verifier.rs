use crate::client::VerifyRequest;
use crate::errors::StatusListHTTPError;
use crate::state::AppState;
use crate::{CREDENTIAL_STATUS_CHECK, PROOF_CHECK};
use async_trait::async_trait;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use statuslist_core::checks::check_credential;
use statuslist_core::compression::Compressor;
use statuslist_core::evaluator::{CredentialStatusResult, StatusEvaluator};
use statuslist_core::fetcher::StatusListFetcher;
use std::sync::Arc;

/// A group of checks and the error that failed them, if any.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckResult {
    pub check: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response body of `POST /credentials/verify`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub verified: bool,
    pub checks: Vec<CheckResult>,
    #[serde(default)]
    pub results: Vec<CredentialStatusResult>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// An API for a status list verifier server.
#[async_trait]
pub trait StatusListVerifierHTTP {
    /// Checks the credential's shape and, when requested, the status of every
    /// `credentialStatus` entry. Any asserted status is an error.
    async fn verify_credential<F: StatusListFetcher, C: Compressor>(
        credential: &Value,
        checks: &[String],
        evaluator: &StatusEvaluator<F, C>,
    ) -> Result<Vec<CredentialStatusResult>, StatusListHTTPError> {
        check_credential(credential)?;
        if !checks.iter().any(|check| check == CREDENTIAL_STATUS_CHECK)
            || credential
                .get("credentialStatus")
                .map_or(true, Value::is_null)
        {
            return Ok(Vec::new());
        }
        let results = evaluator.get_credential_status(credential).await?;
        if let Some(result) = results.iter().find(|result| result.status) {
            let purpose = result
                .status_purpose
                .as_ref()
                .map(|purpose| purpose.to_string())
                .unwrap_or_else(|| "revocation".to_string());
            return Err(StatusListHTTPError::CredentialStatusAsserted(format!(
                "{purpose} at index {} of {}",
                result.status_list_index, result.status_list_credential
            )));
        }
        Ok(results)
    }
}

/// Handler for verification of credentials.
pub struct StatusListVerifierHTTPHandler;

impl StatusListVerifierHTTP for StatusListVerifierHTTPHandler {}

impl StatusListVerifierHTTPHandler {
    /// Handler for a credential received from POST.
    pub async fn post_verify(
        State(app_state): State<Arc<AppState>>,
        Json(request): Json<VerifyRequest>,
    ) -> impl IntoResponse {
        let checks = request.options.checks;
        info!("Received credential for checks: {checks:?}");
        let warnings = checks
            .iter()
            .filter(|check| check.as_str() != CREDENTIAL_STATUS_CHECK)
            .map(|check| match check.as_str() {
                PROOF_CHECK => "Check not performed: proof.".to_string(),
                other => format!("Unknown check: {other}."),
            })
            .collect::<Vec<_>>();
        match Self::verify_credential(
            &request.verifiable_credential,
            &checks,
            &app_state.evaluator,
        )
        .await
        {
            Ok(results) => (
                StatusCode::OK,
                Json(VerifyResponse {
                    verified: true,
                    checks: vec![CheckResult {
                        check: checks,
                        error: None,
                    }],
                    results,
                    warnings,
                    errors: Vec::new(),
                }),
            ),
            Err(err) => {
                warn!("Verification failed: {err}");
                (
                    StatusCode::BAD_REQUEST,
                    Json(VerifyResponse {
                        verified: false,
                        checks: vec![CheckResult {
                            check: checks,
                            error: Some(err.to_string()),
                        }],
                        results: Vec::new(),
                        warnings,
                        errors: vec![err.to_string()],
                    }),
                )
            }
        }
    }
}
