use ankiconnect_core::{AnkiError, Result, DEFAULT_VERSION};
use ankiconnect_transport::HttpConfig;
use std::str::FromStr;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// URL of the AnkiConnect endpoint
    pub url: String,
    /// Protocol version sent with every action
    pub version: u32,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Log every request and response body at `info` level
    pub log_api_calls: bool,
    /// After a batch flush, visit every outcome and log the failures
    pub auto_drain: bool,
    /// Send a `sync` action when a [`BlockingClient`](crate::BlockingClient) is dropped
    pub sync_on_drop: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8765".to_string(),
            version: DEFAULT_VERSION,
            timeout_ms: 30000,
            log_api_calls: false,
            auto_drain: true,
            sync_on_drop: false,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `ANKICONNECT_URL`, `ANKICONNECT_VERSION`,
    /// `ANKICONNECT_TIMEOUT_MS`, `ANKICONNECT_LOG_API_CALLS`,
    /// `ANKICONNECT_AUTO_DRAIN` and `ANKICONNECT_SYNC_ON_DROP`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn with_url(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Default::default()
        }
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup("ANKICONNECT_URL") {
            config.url = url;
        }
        if let Some(version) = parse(&lookup, "ANKICONNECT_VERSION")? {
            config.version = version;
        }
        if let Some(timeout_ms) = parse(&lookup, "ANKICONNECT_TIMEOUT_MS")? {
            config.timeout_ms = timeout_ms;
        }
        if let Some(flag) = parse_flag(&lookup, "ANKICONNECT_LOG_API_CALLS")? {
            config.log_api_calls = flag;
        }
        if let Some(flag) = parse_flag(&lookup, "ANKICONNECT_AUTO_DRAIN")? {
            config.auto_drain = flag;
        }
        if let Some(flag) = parse_flag(&lookup, "ANKICONNECT_SYNC_ON_DROP")? {
            config.sync_on_drop = flag;
        }
        Ok(config)
    }

    pub fn http(&self) -> HttpConfig {
        HttpConfig {
            url: self.url.clone(),
            timeout_ms: self.timeout_ms,
            log_api_calls: self.log_api_calls,
        }
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| AnkiError::invalid_argument(format!("{}={:?}: {}", key, raw, e)))
        })
        .transpose()
}

fn parse_flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<bool>> {
    lookup(key)
        .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(AnkiError::invalid_argument(format!(
                "{}={:?}: expected a boolean",
                key, raw
            ))),
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.url, "http://localhost:8765");
        assert_eq!(config.version, 6);
        assert!(config.auto_drain);
        assert!(!config.sync_on_drop);
        assert_eq!(ClientConfig::from_lookup(lookup(&[])).unwrap(), config);
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("ANKICONNECT_URL", "http://127.0.0.1:9000"),
            ("ANKICONNECT_VERSION", "5"),
            ("ANKICONNECT_TIMEOUT_MS", " 1500 "),
            ("ANKICONNECT_LOG_API_CALLS", "yes"),
            ("ANKICONNECT_AUTO_DRAIN", "0"),
        ]))
        .unwrap();

        assert_eq!(config.url, "http://127.0.0.1:9000");
        assert_eq!(config.version, 5);
        assert_eq!(config.timeout_ms, 1500);
        assert!(config.log_api_calls);
        assert!(!config.auto_drain);
    }

    #[test]
    fn test_bad_values_are_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[("ANKICONNECT_VERSION", "six")])).unwrap_err();
        assert!(matches!(err, AnkiError::InvalidArgument(msg) if msg.contains("ANKICONNECT_VERSION")));

        let err =
            ClientConfig::from_lookup(lookup(&[("ANKICONNECT_AUTO_DRAIN", "maybe")])).unwrap_err();
        assert!(matches!(err, AnkiError::InvalidArgument(_)));
    }

    #[test]
    fn test_http_config() {
        let config = ClientConfig {
            timeout_ms: 100,
            log_api_calls: true,
            ..ClientConfig::with_url("http://anki:8765")
        };
        let http = config.http();
        assert_eq!(http.url, "http://anki:8765");
        assert_eq!(http.timeout_ms, 100);
        assert!(http.log_api_calls);
    }
}
