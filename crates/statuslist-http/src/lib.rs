//! Status list HTTP functionality: fetching, verifier client and reference verifier server.
pub mod client;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod handlers;
pub mod server;
pub mod state;
pub mod verifier;

/// Accept header sent with every request.
pub(crate) const ACCEPT_HEADER_VALUE: &str = "application/ld+json,application/json";

/// Check name for the credential status check.
pub const CREDENTIAL_STATUS_CHECK: &str = "credentialStatus";

/// Check name for the proof check.
pub const PROOF_CHECK: &str = "proof";
