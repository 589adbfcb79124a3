//! Credential status references and status list credential documents.
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;
use thiserror::Error;

/// Current name of the status list credential URL field.
pub const STATUS_LIST_CREDENTIAL: &str = "statusListCredential";
/// Deprecated name of the status list credential URL field.
pub const REVOCATION_LIST_CREDENTIAL: &str = "revocationListCredential";
/// Current name of the status list index field.
pub const STATUS_LIST_INDEX: &str = "statusListIndex";
/// Deprecated name of the status list index field.
pub const REVOCATION_LIST_INDEX: &str = "revocationListIndex";

/// An error relating to a credential status entry or status list credential.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CredentialStatusError {
    /// Credential has no `credentialStatus` property.
    #[error("Credential has no credentialStatus.")]
    MissingCredentialStatus,
    /// Credential status entry is not a JSON object.
    #[error("Invalid credentialStatus: {0}")]
    InvalidCredentialStatus(String),
    /// Credential status entry has no `type`.
    #[error("Credential status entry has no type.")]
    MissingStatusType,
    /// Credential status entry type is not a status list entry.
    #[error("Unsupported credential status type: {0}")]
    UnsupportedStatusType(String),
    /// Neither `statusListCredential` nor `revocationListCredential` is present.
    #[error("Credential status entry has no status list credential URL.")]
    MissingStatusListCredential,
    /// Status list credential URL is not a non-empty string.
    #[error("Invalid status list credential URL: {0}")]
    InvalidStatusListCredential(String),
    /// Neither `statusListIndex` nor `revocationListIndex` is present.
    #[error("Credential status entry has no status list index.")]
    MissingStatusListIndex,
    /// Status list index is not a base-10 integer.
    #[error("Invalid status list index: {0}")]
    InvalidStatusListIndex(String),
    /// Fetched document is not a status list credential.
    #[error("Invalid status list credential document: {0}")]
    InvalidStatusListDocument(String),
    /// Entry and list declare different status purposes.
    #[error("Status purpose mismatch: entry has {entry}, list has {list}.")]
    StatusPurposeMismatch {
        entry: StatusPurpose,
        list: StatusPurpose,
    },
}

/// Credential issuer, either a bare identifier or an object with an `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Issuer {
    Id(String),
    Object {
        id: String,
        #[serde(flatten)]
        properties: Map<String, Value>,
    },
}

impl Issuer {
    pub fn id(&self) -> &str {
        match self {
            Issuer::Id(id) => id,
            Issuer::Object { id, .. } => id,
        }
    }
}

/// The meaning of an asserted bit in a status list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusPurpose {
    Revocation,
    Suspension,
    Message,
    Other(String),
}

impl From<String> for StatusPurpose {
    fn from(purpose: String) -> Self {
        match purpose.as_str() {
            "revocation" => StatusPurpose::Revocation,
            "suspension" => StatusPurpose::Suspension,
            "message" => StatusPurpose::Message,
            _ => StatusPurpose::Other(purpose),
        }
    }
}

impl From<StatusPurpose> for String {
    fn from(purpose: StatusPurpose) -> Self {
        purpose.to_string()
    }
}

impl Display for StatusPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusPurpose::Revocation => write!(f, "revocation"),
            StatusPurpose::Suspension => write!(f, "suspension"),
            StatusPurpose::Message => write!(f, "message"),
            StatusPurpose::Other(purpose) => write!(f, "{purpose}"),
        }
    }
}

/// Credential status entry types that reference a status list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusEntryType {
    BitstringStatusListEntry,
    StatusList2021Entry,
    RevocationList2020Status,
}

impl TryFrom<&str> for StatusEntryType {
    type Error = CredentialStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "BitstringStatusListEntry" => Ok(StatusEntryType::BitstringStatusListEntry),
            "StatusList2021Entry" => Ok(StatusEntryType::StatusList2021Entry),
            "RevocationList2020Status" => Ok(StatusEntryType::RevocationList2020Status),
            other => Err(CredentialStatusError::UnsupportedStatusType(
                other.to_string(),
            )),
        }
    }
}

/// The fixed `credentialSubject.type` literal of a status list credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusListType {
    BitstringStatusList,
    StatusList2021,
    RevocationList2020,
}

/// A pointer from a credential to the bit governing its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialStatusReference {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: StatusEntryType,
    pub status_purpose: Option<StatusPurpose>,
    pub status_list_credential: String,
    pub status_list_index: i64,
}

/// Selects `current` over the deprecated `deprecated` field.
fn select_field<'a>(
    status: &'a Map<String, Value>,
    current: &str,
    deprecated: &str,
) -> Option<&'a Value> {
    match (status.get(current), status.get(deprecated)) {
        (Some(value), Some(_)) => {
            debug!("Both {current} and {deprecated} present, using {current}.");
            Some(value)
        }
        (Some(value), None) | (None, Some(value)) => Some(value),
        (None, None) => None,
    }
}

/// Parses a base-10 integer index. A leading `-` is accepted so that negative
/// indices are reported as out of range by the status list.
fn parse_index(value: &Value) -> Result<i64, CredentialStatusError> {
    let invalid = || CredentialStatusError::InvalidStatusListIndex(value.to_string());
    match value {
        Value::String(index) => {
            let digits = index.strip_prefix('-').unwrap_or(index);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            index.parse::<i64>().map_err(|_| invalid())
        }
        Value::Number(index) => index.as_i64().ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

impl CredentialStatusReference {
    /// Parses a single `credentialStatus` entry.
    ///
    /// `statusListCredential` and `statusListIndex` take precedence over the
    /// deprecated `revocationListCredential` and `revocationListIndex`.
    pub fn from_status_entry(entry: &Value) -> Result<Self, CredentialStatusError> {
        let status = entry.as_object().ok_or_else(|| {
            CredentialStatusError::InvalidCredentialStatus("expected an object".to_string())
        })?;

        let entry_type = match status.get("type") {
            Some(Value::String(entry_type)) => StatusEntryType::try_from(entry_type.as_str())?,
            Some(other) => {
                return Err(CredentialStatusError::UnsupportedStatusType(
                    other.to_string(),
                ))
            }
            None => return Err(CredentialStatusError::MissingStatusType),
        };

        let status_list_credential =
            match select_field(status, STATUS_LIST_CREDENTIAL, REVOCATION_LIST_CREDENTIAL) {
                Some(Value::String(url)) if !url.is_empty() => url.to_owned(),
                Some(other) => {
                    return Err(CredentialStatusError::InvalidStatusListCredential(
                        other.to_string(),
                    ))
                }
                None => return Err(CredentialStatusError::MissingStatusListCredential),
            };

        let status_list_index = select_field(status, STATUS_LIST_INDEX, REVOCATION_LIST_INDEX)
            .ok_or(CredentialStatusError::MissingStatusListIndex)
            .and_then(parse_index)?;

        let status_purpose = status
            .get("statusPurpose")
            .and_then(Value::as_str)
            .map(|purpose| StatusPurpose::from(purpose.to_string()));

        Ok(Self {
            id: status.get("id").and_then(Value::as_str).map(str::to_owned),
            entry_type,
            status_purpose,
            status_list_credential,
            status_list_index,
        })
    }

    /// Parses every entry of a credential's `credentialStatus` (object or array).
    pub fn from_credential(credential: &Value) -> Result<Vec<Self>, CredentialStatusError> {
        match credential.get("credentialStatus") {
            Some(Value::Array(entries)) if !entries.is_empty() => {
                entries.iter().map(Self::from_status_entry).collect()
            }
            Some(Value::Array(_)) | None | Some(Value::Null) => {
                Err(CredentialStatusError::MissingCredentialStatus)
            }
            Some(entry) => Ok(vec![Self::from_status_entry(entry)?]),
        }
    }
}

/// The subject of a status list credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusListSubject {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub list_type: StatusListType,
    pub status_purpose: Option<StatusPurpose>,
    pub encoded_list: String,
}

/// A published status list credential. Proof and context are not interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusListCredential {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub credential_type: Vec<String>,
    pub issuer: Issuer,
    pub credential_subject: StatusListSubject,
}

impl StatusListCredential {
    pub fn from_value(document: &Value) -> Result<Self, CredentialStatusError> {
        Self::deserialize(document)
            .map_err(|e| CredentialStatusError::InvalidStatusListDocument(e.to_string()))
    }

    pub fn encoded_list(&self) -> &str {
        &self.credential_subject.encoded_list
    }
}
