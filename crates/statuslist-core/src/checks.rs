//! Structural checks on credentials and verifier responses.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{CREDENTIALS_V1_CONTEXT, CREDENTIALS_V2_CONTEXT, VERIFIABLE_CREDENTIAL_TYPE};

/// Credential types identifying a status list credential.
pub const STATUS_LIST_CREDENTIAL_TYPES: [&str; 3] = [
    "BitstringStatusListCredential",
    "StatusList2021Credential",
    "RevocationList2020Credential",
];

/// Subject types identifying a status list.
pub const STATUS_LIST_SUBJECT_TYPES: [&str; 3] =
    ["BitstringStatusList", "StatusList2021", "RevocationList2020"];

/// A failed structural check.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CheckError {
    #[error("Expected property: {0}")]
    MissingProperty(String),
    #[error("Expected {property} to be {expected}.")]
    UnexpectedType { property: String, expected: String },
    #[error("Expected {property} to include {member}.")]
    MissingMember { property: String, member: String },
    #[error("Expected {property} to equal {expected}, found {actual}.")]
    UnexpectedValue {
        property: String,
        expected: String,
        actual: String,
    },
}

fn property<'a>(value: &'a Value, name: &str) -> Result<&'a Value, CheckError> {
    value
        .get(name)
        .filter(|v| !v.is_null())
        .ok_or_else(|| CheckError::MissingProperty(name.to_string()))
}

fn array<'a>(value: &'a Value, name: &str) -> Result<&'a Vec<Value>, CheckError> {
    property(value, name)?
        .as_array()
        .ok_or_else(|| CheckError::UnexpectedType {
            property: name.to_string(),
            expected: "an array".to_string(),
        })
}

fn includes_any(values: &[Value], members: &[&str]) -> bool {
    values
        .iter()
        .filter_map(Value::as_str)
        .any(|v| members.contains(&v))
}

fn check_context(credential: &Value) -> Result<(), CheckError> {
    let context = array(credential, "@context")?;
    if includes_any(context, &[CREDENTIALS_V2_CONTEXT, CREDENTIALS_V1_CONTEXT]) {
        Ok(())
    } else {
        Err(CheckError::MissingMember {
            property: "@context".to_string(),
            member: CREDENTIALS_V2_CONTEXT.to_string(),
        })
    }
}

fn check_type(credential: &Value, members: &[&str]) -> Result<(), CheckError> {
    let types = array(credential, "type")?;
    if !includes_any(types, &[VERIFIABLE_CREDENTIAL_TYPE]) {
        return Err(CheckError::MissingMember {
            property: "type".to_string(),
            member: VERIFIABLE_CREDENTIAL_TYPE.to_string(),
        });
    }
    if !members.is_empty() && !includes_any(types, members) {
        return Err(CheckError::MissingMember {
            property: "type".to_string(),
            member: members.join(" | "),
        });
    }
    Ok(())
}

/// Issuer must be a string, or an object with a string `id`.
fn check_issuer(credential: &Value) -> Result<(), CheckError> {
    match property(credential, "issuer")? {
        Value::String(_) => Ok(()),
        Value::Object(issuer) => match issuer.get("id") {
            Some(Value::String(_)) => Ok(()),
            Some(_) => Err(CheckError::UnexpectedType {
                property: "issuer.id".to_string(),
                expected: "a string".to_string(),
            }),
            None => Err(CheckError::MissingProperty("issuer.id".to_string())),
        },
        _ => Err(CheckError::UnexpectedType {
            property: "issuer".to_string(),
            expected: "a string or an object".to_string(),
        }),
    }
}

/// Checks the shape of an issued credential.
pub fn check_credential(credential: &Value) -> Result<(), CheckError> {
    if !credential.is_object() {
        return Err(CheckError::UnexpectedType {
            property: "credential".to_string(),
            expected: "an object".to_string(),
        });
    }
    check_context(credential)?;
    check_type(credential, &[])?;
    property(credential, "credentialSubject")?;
    check_issuer(credential)
}

/// Checks the shape of a status list credential.
pub fn check_status_list_credential(credential: &Value) -> Result<(), CheckError> {
    if !credential.is_object() {
        return Err(CheckError::UnexpectedType {
            property: "credential".to_string(),
            expected: "an object".to_string(),
        });
    }
    check_context(credential)?;
    check_type(credential, &STATUS_LIST_CREDENTIAL_TYPES)?;
    let subject = property(credential, "credentialSubject")?;
    for key in ["type", "encodedList", "statusPurpose"] {
        property(subject, key).map_err(|_| {
            CheckError::MissingProperty(format!("credentialSubject.{key}"))
        })?;
    }
    if !subject["encodedList"].is_string() {
        return Err(CheckError::UnexpectedType {
            property: "credentialSubject.encodedList".to_string(),
            expected: "a string".to_string(),
        });
    }
    match subject["type"].as_str() {
        Some(subject_type) if STATUS_LIST_SUBJECT_TYPES.contains(&subject_type) => {}
        Some(subject_type) => {
            return Err(CheckError::UnexpectedValue {
                property: "credentialSubject.type".to_string(),
                expected: STATUS_LIST_SUBJECT_TYPES.join(" | "),
                actual: subject_type.to_string(),
            })
        }
        None => {
            return Err(CheckError::UnexpectedType {
                property: "credentialSubject.type".to_string(),
                expected: "a string".to_string(),
            })
        }
    }
    check_issuer(credential)
}

/// An HTTP response from a verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub status_code: u16,
    pub body: Option<Value>,
}

impl VerificationOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// The `verified` flag of the response body, if present.
    pub fn verified(&self) -> Option<bool> {
        self.body.as_ref()?.get("verified")?.as_bool()
    }
}

/// A verifier response that does not match the expected outcome.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AssertionError {
    #[error("Expected status code {expected}, found {actual}.")]
    StatusCode { expected: u16, actual: u16 },
    #[error("Expected a response body from verifier.")]
    MissingBody,
    #[error("Expected response body to be an object.")]
    BodyNotObject,
    #[error("Expected verified to be {expected}, found {actual:?}.")]
    Verified {
        expected: bool,
        actual: Option<bool>,
    },
}

fn check_outcome(
    outcome: &VerificationOutcome,
    status_code: u16,
    verified: bool,
) -> Result<(), AssertionError> {
    if outcome.status_code != status_code {
        return Err(AssertionError::StatusCode {
            expected: status_code,
            actual: outcome.status_code,
        });
    }
    match &outcome.body {
        None => Err(AssertionError::MissingBody),
        Some(body) if !body.is_object() => Err(AssertionError::BodyNotObject),
        Some(_) if outcome.verified() != Some(verified) => Err(AssertionError::Verified {
            expected: verified,
            actual: outcome.verified(),
        }),
        Some(_) => Ok(()),
    }
}

/// Verifier must answer 200 with `verified: true`.
pub fn should_pass_verification(outcome: &VerificationOutcome) -> Result<(), AssertionError> {
    check_outcome(outcome, 200, true)
}

/// Verifier must answer 400 with `verified: false`.
pub fn should_fail_verification(outcome: &VerificationOutcome) -> Result<(), AssertionError> {
    check_outcome(outcome, 400, false)
}
