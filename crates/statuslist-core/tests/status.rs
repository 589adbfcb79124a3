use async_trait::async_trait;
use serde_json::{json, Value};
use statuslist_core::bitstring::{decode, encode, StatusList, StatusListCodec, StatusListError};
use statuslist_core::compression::GzipCompressor;
use statuslist_core::credential::{CredentialStatusReference, StatusPurpose};
use statuslist_core::data::{
    TEST_CREDENTIAL, TEST_CREDENTIAL_REVOCATION_LIST_2020, TEST_STATUS_LIST_CREDENTIAL,
    TEST_STATUS_LIST_CREDENTIAL_URL,
};
use statuslist_core::evaluator::{EvaluatorError, StatusEvaluator};
use statuslist_core::fetcher::{FetchError, StatusListFetcher};
use statuslist_core::DEFAULT_STATUS_LIST_SIZE;

/// Returns one status list credential for a single URL.
struct SingleListFetcher {
    document: Value,
}

#[async_trait]
impl StatusListFetcher for SingleListFetcher {
    async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        if url == TEST_STATUS_LIST_CREDENTIAL_URL {
            Ok(self.document.clone())
        } else {
            Err(FetchError::UnexpectedStatus {
                url: url.to_string(),
                status: 404,
            })
        }
    }
}

fn evaluator(encoded_list: &str) -> StatusEvaluator<SingleListFetcher> {
    let mut document: Value = serde_json::from_str(TEST_STATUS_LIST_CREDENTIAL).unwrap();
    document["credentialSubject"]["encodedList"] = json!(encoded_list);
    StatusEvaluator::new(SingleListFetcher { document })
}

fn credential_at(index: &str) -> Value {
    let mut credential: Value = serde_json::from_str(TEST_CREDENTIAL).unwrap();
    credential["credentialStatus"]["statusListIndex"] = json!(index);
    credential
}

#[tokio::test]
async fn revoked_and_clear_neighbours() {
    let mut bits = vec![false; DEFAULT_STATUS_LIST_SIZE];
    bits[50] = true;
    let encoded = encode(&bits, DEFAULT_STATUS_LIST_SIZE).unwrap();
    let evaluator = evaluator(&encoded);

    let revoked = evaluator
        .get_credential_status(&credential_at("50"))
        .await
        .unwrap();
    assert!(revoked[0].status);
    assert_eq!(revoked[0].status_purpose, Some(StatusPurpose::Revocation));

    let clear = evaluator
        .get_credential_status(&credential_at("49"))
        .await
        .unwrap();
    assert!(!clear[0].status);
}

#[tokio::test]
async fn malformed_list_is_not_a_clear_status() {
    let evaluator = evaluator("not-valid-base64!!");
    let result = evaluator.get_credential_status(&credential_at("0")).await;
    assert!(matches!(
        result,
        Err(EvaluatorError::StatusList(
            StatusListError::MalformedEncoding(_)
        ))
    ));
}

#[tokio::test]
async fn deprecated_field_names() {
    // Index 0 is clear in the one-revocation list, index 1 is set.
    let credential: Value = serde_json::from_str(TEST_CREDENTIAL_REVOCATION_LIST_2020).unwrap();
    let references = CredentialStatusReference::from_credential(&credential).unwrap();
    assert_eq!(references[0].status_list_index, 0);
    let evaluator = evaluator(statuslist_core::data::TEST_ENCODED_LIST_ONE_REVOCATION);
    let result = evaluator.get_status(&references[0]).await.unwrap();
    assert!(!result.status);
}

#[test]
fn encode_decode_with_codec() {
    let mut list = StatusList::new(DEFAULT_STATUS_LIST_SIZE).unwrap();
    for index in [0, 7, 8, 1000, DEFAULT_STATUS_LIST_SIZE as i64 - 1] {
        list.set_status(index, true).unwrap();
    }
    let codec = StatusListCodec::<GzipCompressor>::default().multibase(true);
    let encoded = codec.encode(&list).unwrap();
    assert!(encoded.starts_with('u'));
    assert_eq!(codec.decode(&encoded).unwrap(), list);
    // Without the multibase flag the prefix is not stripped.
    assert!(decode(&encoded).is_err());
}
