use crate::config::HTTPConfig;
use crate::errors::StatusListHTTPError;
use crate::fetcher::HttpStatusListFetcher;
use log::info;
use serde_json::Value;
use statuslist_core::bitstring::StatusListCodec;
use statuslist_core::checks::check_status_list_credential;
use statuslist_core::compression::GzipCompressor;
use statuslist_core::evaluator::StatusEvaluator;
use std::collections::HashMap;
use std::path::Path;

const JSON_FILE_EXTENSION: &str = "json";

/// A shared app state for handlers.
pub struct AppState {
    pub config: HTTPConfig,
    pub evaluator: StatusEvaluator<HttpStatusListFetcher>,
    /// Status list credentials served by this instance, keyed by list ID.
    pub status_lists: HashMap<String, Value>,
}

impl AppState {
    /// Constructs state, loading any status lists from `status_lists_path`.
    pub fn new(config: HTTPConfig) -> Result<Self, StatusListHTTPError> {
        let status_lists = match &config.status_lists_path {
            Some(path) => read_status_lists(Path::new(path))?,
            None => HashMap::new(),
        };
        Self::new_with_cache(config, status_lists)
    }

    pub fn new_with_cache(
        config: HTTPConfig,
        status_lists: HashMap<String, Value>,
    ) -> Result<Self, StatusListHTTPError> {
        let fetcher = HttpStatusListFetcher::new(&config.fetcher)?;
        let evaluator = StatusEvaluator::with_codec(
            fetcher,
            StatusListCodec::<GzipCompressor>::from(&config.codec),
        );
        Ok(Self {
            config,
            evaluator,
            status_lists,
        })
    }
}

/// Reads every `<id>.json` status list credential in a directory.
fn read_status_lists(path: &Path) -> Result<HashMap<String, Value>, StatusListHTTPError> {
    let read_error =
        |e: std::io::Error| StatusListHTTPError::FileReadError(path.display().to_string(), e.to_string());
    let mut status_lists = HashMap::new();
    for entry in std::fs::read_dir(path).map_err(read_error)? {
        let file_path = entry.map_err(read_error)?.path();
        if file_path.extension().and_then(|ext| ext.to_str()) != Some(JSON_FILE_EXTENSION) {
            continue;
        }
        let Some(id) = file_path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let document = serde_json::from_slice(&std::fs::read(&file_path).map_err(read_error)?)?;
        check_status_list_credential(&document)?;
        info!("Loaded status list: {id}");
        status_lists.insert(id.to_string(), document);
    }
    Ok(status_lists)
}
