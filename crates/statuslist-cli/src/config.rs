//! CLI configuration types and utilities.
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use statuslist_core::STATUSLIST_CONFIG;
use statuslist_http::config::FetcherConfig;
use std::fs;

lazy_static! {
    /// Lazy static reference to cli configuration loaded from the file at `STATUSLIST_CONFIG`.
    pub static ref CLI_CONFIG: CLIConfig = parse_toml(
        &fs::read_to_string(std::env::var(STATUSLIST_CONFIG).expect("STATUSLIST_CONFIG env not set."))
        .expect("Error reading statuslist_config.toml"));
}

/// Parses and returns cli configuration.
fn parse_toml(toml_str: &str) -> CLIConfig {
    toml::from_str::<Config>(toml_str)
        .expect("Error parsing statuslist_config.toml")
        .cli
}

/// Gets `statuslist-cli` configuration variables.
pub fn cli_config() -> &'static CLI_CONFIG {
    &CLI_CONFIG
}

/// Whether a configuration file has been provided.
pub fn has_config() -> bool {
    std::env::var(STATUSLIST_CONFIG).is_ok()
}

/// Configuration variables for `statuslist-cli` crate.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct CLIConfig {
    /// Verifier endpoint credentials are posted to by `vc verify`.
    pub verifier_endpoint: String,
    #[serde(default)]
    pub fetcher: FetcherConfig,
}

/// Wrapper struct for parsing the `cli` table.
#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct Config {
    /// CLI configuration data.
    cli: CLIConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_deserialize() {
        let config_string = r#"
        [cli]
        verifier_endpoint = "https://verifier.example.com/credentials/verify"

        [cli.fetcher]
        timeout_secs = 5
        headers = { "User-Agent" = "statuslist-cli" }

        [non_cli]
        key = "value"
        "#;

        let config: CLIConfig = parse_toml(config_string);

        assert_eq!(
            config,
            CLIConfig {
                verifier_endpoint: "https://verifier.example.com/credentials/verify".to_string(),
                fetcher: FetcherConfig {
                    timeout_secs: 5,
                    accept_invalid_certs: false,
                    headers: BTreeMap::from([(
                        "User-Agent".to_string(),
                        "statuslist-cli".to_string()
                    )]),
                }
            }
        );
    }

    #[test]
    fn test_deserialize_default_fetcher() {
        let config: CLIConfig = parse_toml(
            r#"
        [cli]
        verifier_endpoint = "http://127.0.0.1:8082/credentials/verify"
        "#,
        );
        assert_eq!(config.fetcher, FetcherConfig::default());
    }
}
