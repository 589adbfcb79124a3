//! Status list HTTP configuration types and utilities.
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use statuslist_core::bitstring::CodecConfig;
use statuslist_core::STATUSLIST_CONFIG;
use std::collections::BTreeMap;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 8082;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for outgoing HTTP requests.
///
/// Passed explicitly to every component that makes requests; there is no
/// process-wide client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FetcherConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Accept invalid TLS certificates (e.g. self-signed test deployments).
    pub accept_invalid_certs: bool,
    /// Additional headers sent with every request.
    pub headers: BTreeMap<String, String>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            accept_invalid_certs: false,
            headers: BTreeMap::new(),
        }
    }
}

impl FetcherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// HTTP configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HTTPConfig {
    /// Host address for server.
    pub host: IpAddr,
    /// Port for server.
    pub port: u16,
    /// Optional directory of status list credentials (`<id>.json`) served at `/status/<id>`.
    pub status_lists_path: Option<String>,
    /// Outgoing request configuration used when fetching status lists.
    #[serde(default)]
    pub fetcher: FetcherConfig,
    /// Status list codec configuration.
    #[serde(default)]
    pub codec: CodecConfig,
}

impl std::fmt::Display for HTTPConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl Default for HTTPConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            status_lists_path: None,
            fetcher: FetcherConfig::default(),
            codec: CodecConfig::default(),
        }
    }
}

impl HTTPConfig {
    /// Provides formatted string of server config address.
    pub fn to_address(&self) -> String {
        self.to_socket_address().to_string()
    }
    /// Provides `SocketAddr` of server config address.
    pub fn to_socket_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

lazy_static! {
    /// Lazy static reference to HTTP configuration loaded from the file at `STATUSLIST_CONFIG`.
    pub static ref HTTP_CONFIG: HTTPConfig = parse_toml(
        &fs::read_to_string(std::env::var(STATUSLIST_CONFIG).expect("STATUSLIST_CONFIG env not set."))
        .expect("Error reading statuslist_config.toml"));
}

/// Parses and returns HTTP configuration.
fn parse_toml(toml_str: &str) -> HTTPConfig {
    toml::from_str::<Config>(toml_str)
        .expect("Error parsing statuslist_config.toml")
        .http
}

/// Gets `statuslist-http` configuration variables.
pub fn http_config() -> &'static HTTP_CONFIG {
    &HTTP_CONFIG
}

/// Wrapper struct for parsing the `http` config table.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct Config {
    /// HTTP configuration data.
    http: HTTPConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let config_string = r#"
        [http]
        host = "127.0.0.1"
        port = 8082

        [non_http]
        key = "value"
        "#;

        let config: HTTPConfig = parse_toml(config_string);
        assert_eq!(config, HTTPConfig::default());
    }

    #[test]
    fn test_deserialize_fetcher_and_codec() {
        let config_string = r#"
        [http]
        host = "0.0.0.0"
        port = 9000
        status_lists_path = "/tmp/status-lists"

        [http.fetcher]
        timeout_secs = 3
        accept_invalid_certs = true
        headers = { Authorization = "Bearer abc" }

        [http.codec]
        multibase = true
        "#;

        let config: HTTPConfig = parse_toml(config_string);
        assert_eq!(config.to_address(), "0.0.0.0:9000");
        assert_eq!(config.status_lists_path.as_deref(), Some("/tmp/status-lists"));
        assert_eq!(config.fetcher.timeout(), Duration::from_secs(3));
        assert!(config.fetcher.accept_invalid_certs);
        assert_eq!(
            config.fetcher.headers.get("Authorization").map(String::as_str),
            Some("Bearer abc")
        );
        assert_eq!(
            config.codec,
            CodecConfig {
                multibase: true,
                ..CodecConfig::default()
            }
        );
    }
}
