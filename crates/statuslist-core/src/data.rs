//! Test fixtures.

// Test vector, no revocations, taken from: https://www.w3.org/TR/vc-status-list/#example-example-statuslist2021credential-0
pub const TEST_ENCODED_LIST_NO_REVOCATIONS: &str =
    "H4sIAAAAAAAAA-3BMQEAAADCoPVPbQwfoAAAAAAAAAAAAAAAAAAAAIC3AYbSVKsAQAAA";

// Test vector, 131072 entries with one revocation at index 1.
pub const TEST_ENCODED_LIST_ONE_REVOCATION: &str =
    "H4sIAAAAAAAA_-3AsQAAAAACsNDypwqjZ2sAAAAAAAAAAAAAAAAAAACAtwE3F1_NAEAAAA";

pub const TEST_STATUS_LIST_CREDENTIAL_URL: &str = "https://example.com/credentials/status/3";

pub const TEST_STATUS_LIST_2021_CREDENTIAL_URL: &str = "https://example.com/credentials/status/2021";

pub const TEST_STATUS_LIST_CREDENTIAL: &str = r#"
{
    "@context": [
        "https://www.w3.org/ns/credentials/v2"
    ],
    "id": "https://example.com/credentials/status/3",
    "type": [
        "VerifiableCredential",
        "BitstringStatusListCredential"
    ],
    "issuer": "did:example:12345",
    "validFrom": "2021-04-05T14:27:40Z",
    "credentialSubject": {
        "id": "https://example.com/credentials/status/3#list",
        "type": "BitstringStatusList",
        "statusPurpose": "revocation",
        "encodedList": "H4sIAAAAAAAA_-3AsQAAAAACsNDypwqjZ2sAAAAAAAAAAAAAAAAAAACAtwE3F1_NAEAAAA"
    }
}
"#;

pub const TEST_STATUS_LIST_2021_CREDENTIAL: &str = r#"
{
    "@context": [
        "https://www.w3.org/2018/credentials/v1",
        "https://w3id.org/vc/status-list/2021/v1"
    ],
    "id": "https://example.com/credentials/status/2021",
    "type": [
        "VerifiableCredential",
        "StatusList2021Credential"
    ],
    "issuer": {
        "id": "did:example:12345",
        "name": "Example Issuer"
    },
    "issuanceDate": "2021-04-05T14:27:40Z",
    "credentialSubject": {
        "id": "https://example.com/credentials/status/2021#list",
        "type": "StatusList2021",
        "statusPurpose": "suspension",
        "encodedList": "H4sIAAAAAAAAA-3BMQEAAADCoPVPbQwfoAAAAAAAAAAAAAAAAAAAAIC3AYbSVKsAQAAA"
    }
}
"#;

pub const TEST_CREDENTIAL: &str = r#"
{
    "@context": [
        "https://www.w3.org/ns/credentials/v2"
    ],
    "id": "urn:uuid:8b5a0a7c-5e43-11ee-8c99-0242ac120002",
    "type": [
        "VerifiableCredential"
    ],
    "issuer": "did:example:12345",
    "validFrom": "2023-01-01T00:00:00Z",
    "credentialSubject": {
        "id": "did:example:6789",
        "type": "Person"
    },
    "credentialStatus": {
        "id": "https://example.com/credentials/status/3#1",
        "type": "BitstringStatusListEntry",
        "statusPurpose": "revocation",
        "statusListIndex": "1",
        "statusListCredential": "https://example.com/credentials/status/3"
    }
}
"#;

pub const TEST_CREDENTIAL_REVOCATION_LIST_2020: &str = r#"
{
    "@context": [
        "https://www.w3.org/2018/credentials/v1"
    ],
    "id": "urn:uuid:2f3c6a1e-5e44-11ee-8c99-0242ac120002",
    "type": [
        "VerifiableCredential"
    ],
    "issuer": {
        "id": "did:example:12345"
    },
    "issuanceDate": "2023-01-01T00:00:00Z",
    "credentialSubject": {
        "id": "did:example:6789"
    },
    "credentialStatus": {
        "id": "https://example.com/credentials/status/3#0",
        "type": "RevocationList2020Status",
        "revocationListIndex": "0",
        "revocationListCredential": "https://example.com/credentials/status/3"
    }
}
"#;

pub const TEST_CREDENTIAL_INVALID_STATUS_TYPE: &str = r#"
{
    "@context": [
        "https://www.w3.org/ns/credentials/v2"
    ],
    "id": "urn:uuid:4a8e3c0e-5e44-11ee-8c99-0242ac120002",
    "type": [
        "VerifiableCredential"
    ],
    "issuer": "did:example:12345",
    "credentialSubject": {
        "id": "did:example:6789"
    },
    "credentialStatus": {
        "id": "https://example.com/credentials/status/3#1",
        "type": "InvalidStatusListEntry",
        "statusPurpose": "revocation",
        "statusListIndex": "1",
        "statusListCredential": "https://example.com/credentials/status/3"
    }
}
"#;

pub const TEST_CREDENTIAL_INVALID_STATUS_LIST_CREDENTIAL_ID: &str = r#"
{
    "@context": [
        "https://www.w3.org/ns/credentials/v2"
    ],
    "id": "urn:uuid:5c1f0c3a-5e44-11ee-8c99-0242ac120002",
    "type": [
        "VerifiableCredential"
    ],
    "issuer": "did:example:12345",
    "credentialSubject": {
        "id": "did:example:6789"
    },
    "credentialStatus": {
        "id": "https://example.com/credentials/status/3#1",
        "type": "BitstringStatusListEntry",
        "statusPurpose": "revocation",
        "statusListIndex": "1",
        "statusListCredential": "https://example.invalid/credentials/status/does-not-exist"
    }
}
"#;
