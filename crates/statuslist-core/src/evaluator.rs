//! Evaluation of a credential's status against its published status list.
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::bitstring::{StatusListCodec, StatusListError};
use crate::compression::{Compressor, GzipCompressor};
use crate::credential::{
    CredentialStatusError, CredentialStatusReference, StatusListCredential, StatusPurpose,
};
use crate::fetcher::{FetchError, StatusListFetcher};

/// An error relating to status evaluation.
///
/// Codec errors are carried unchanged so callers can tell a malformed list or
/// out-of-range index apart from a clear status.
#[derive(Error, Debug)]
pub enum EvaluatorError {
    #[error("Credential status error: {0}")]
    CredentialStatus(#[from] CredentialStatusError),
    #[error("Status list error: {0}")]
    StatusList(#[from] StatusListError),
    #[error("Failed to fetch status list credential: {0}")]
    Fetch(#[from] FetchError),
}

/// The evaluated status of one credential status entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialStatusResult {
    /// `true` if the status is asserted (e.g. revoked).
    pub status: bool,
    pub status_list_credential: String,
    pub status_list_index: i64,
    pub status_purpose: Option<StatusPurpose>,
}

/// Resolves credential status entries by fetching and decoding status lists.
pub struct StatusEvaluator<F, C = GzipCompressor> {
    fetcher: F,
    codec: StatusListCodec<C>,
}

impl<F: StatusListFetcher> StatusEvaluator<F, GzipCompressor> {
    pub fn new(fetcher: F) -> Self {
        Self::with_codec(fetcher, StatusListCodec::<GzipCompressor>::default())
    }
}

impl<F: StatusListFetcher, C: Compressor> StatusEvaluator<F, C> {
    pub fn with_codec(fetcher: F, codec: StatusListCodec<C>) -> Self {
        Self { fetcher, codec }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Evaluates an entry against an already retrieved status list credential.
    pub fn evaluate(
        &self,
        reference: &CredentialStatusReference,
        document: &Value,
    ) -> Result<CredentialStatusResult, EvaluatorError> {
        let status_list_credential = StatusListCredential::from_value(document)?;
        let subject = &status_list_credential.credential_subject;
        if let (Some(entry), Some(list)) = (&reference.status_purpose, &subject.status_purpose) {
            if entry != list {
                return Err(CredentialStatusError::StatusPurposeMismatch {
                    entry: entry.to_owned(),
                    list: list.to_owned(),
                }
                .into());
            }
        }
        let list = self.codec.decode(status_list_credential.encoded_list())?;
        let status = list.get_status(reference.status_list_index)?;
        debug!(
            "Status at index {} of {} is {}.",
            reference.status_list_index, reference.status_list_credential, status
        );
        Ok(CredentialStatusResult {
            status,
            status_list_credential: reference.status_list_credential.to_owned(),
            status_list_index: reference.status_list_index,
            status_purpose: reference
                .status_purpose
                .to_owned()
                .or_else(|| subject.status_purpose.to_owned()),
        })
    }

    /// Fetches the referenced status list credential and evaluates the entry.
    pub async fn get_status(
        &self,
        reference: &CredentialStatusReference,
    ) -> Result<CredentialStatusResult, EvaluatorError> {
        info!(
            "Fetching status list credential: {}",
            reference.status_list_credential
        );
        let document = self
            .fetcher
            .fetch(&reference.status_list_credential)
            .await?;
        self.evaluate(reference, &document)
    }

    /// Evaluates every `credentialStatus` entry of a credential.
    pub async fn get_credential_status(
        &self,
        credential: &Value,
    ) -> Result<Vec<CredentialStatusResult>, EvaluatorError> {
        let references = CredentialStatusReference::from_credential(credential)?;
        let mut results = Vec::with_capacity(references.len());
        for reference in &references {
            results.push(self.get_status(reference).await?);
        }
        Ok(results)
    }
}
