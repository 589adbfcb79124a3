//! Core types and logic for status list encoding, decoding and evaluation (transport independent).
pub mod bitstring;
pub mod checks;
pub mod compression;
pub mod credential;
pub mod data;
pub mod evaluator;
pub mod fetcher;

/// Environment variable name for the status list config file.
pub const STATUSLIST_CONFIG: &str = "STATUSLIST_CONFIG";

/// Default number of entries in a status list (16KB of bits).
pub const DEFAULT_STATUS_LIST_SIZE: usize = 131_072;

/// The W3C VC data model v1 context.
pub const CREDENTIALS_V1_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// The W3C VC data model v2 context.
pub const CREDENTIALS_V2_CONTEXT: &str = "https://www.w3.org/ns/credentials/v2";

/// The base type every verifiable credential carries.
pub const VERIFIABLE_CREDENTIAL_TYPE: &str = "VerifiableCredential";
