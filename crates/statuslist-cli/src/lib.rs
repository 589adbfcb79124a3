use serde::{Deserialize, Serialize};
use serde_json::Value;
use statuslist_core::bitstring::{StatusList, StatusListCodec, StatusListError};
use statuslist_core::compression::GzipCompressor;
use statuslist_http::config::FetcherConfig;
use std::io::Read;
use std::num::ParseIntError;
use thiserror::Error;

pub mod config;

/// An error relating to CLI arguments and configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CLIError {
    #[error("A verifier endpoint is required: pass --endpoint or set cli.verifier_endpoint in the file at STATUSLIST_CONFIG.")]
    MissingVerifierEndpoint,
}

/// Summary of a decoded status list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListSummary {
    pub length: usize,
    pub asserted: Vec<usize>,
}

impl From<&StatusList> for ListSummary {
    fn from(list: &StatusList) -> Self {
        Self {
            length: list.len(),
            asserted: list.asserted_indices().collect(),
        }
    }
}

/// Parses a comma-separated list of indices, e.g. `"1,50,1000"`. Blank input is no indices.
pub fn parse_indices(indices: &str) -> Result<Vec<i64>, ParseIntError> {
    indices
        .split(',')
        .map(str::trim)
        .filter(|index| !index.is_empty())
        .map(str::parse)
        .collect()
}

/// Encodes a list of `size` entries with the given indices set.
pub fn encode_list(
    codec: &StatusListCodec<GzipCompressor>,
    size: usize,
    indices: &[i64],
) -> Result<String, StatusListError> {
    let mut list = StatusList::new(size)?;
    for index in indices {
        list.set_status(*index, true)?;
    }
    codec.encode(&list)
}

/// Reads a JSON document from a reader (a file or stdin).
pub fn read_json<R: Read>(reader: R) -> Result<Value, serde_json::Error> {
    serde_json::from_reader(reader)
}

/// Fetcher configuration from the config file when one is set, otherwise defaults.
pub fn fetcher_config() -> FetcherConfig {
    if config::has_config() {
        config::cli_config().fetcher.clone()
    } else {
        FetcherConfig::default()
    }
}

/// Verifier endpoint from the argument, falling back to the config file.
pub fn verifier_endpoint(endpoint: Option<&String>) -> Result<String, CLIError> {
    match endpoint {
        Some(endpoint) => Ok(endpoint.to_owned()),
        None if config::has_config() => Ok(config::cli_config().verifier_endpoint.to_owned()),
        None => Err(CLIError::MissingVerifierEndpoint),
    }
}

pub fn status_str(mut str: String, is_ok: bool, details: Option<&str>) -> String {
    if is_ok {
        str.push_str("✅");
        return str;
    }
    str.push_str("❌");
    if let Some(detail) = details {
        str.push_str(" [");
        str.push_str(detail);
        str.push(']');
    }
    str
}
