use crate::{BlockingTransport, Transport};
use ankiconnect_core::{AnkiError, Request, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, trace};

/// Endpoint settings shared by both HTTP transports.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// URL of the AnkiConnect server
    pub url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Log every request and response body at `info` level
    pub log_api_calls: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8765".to_string(),
            timeout_ms: 30000,
            log_api_calls: false,
        }
    }
}

impl HttpConfig {
    fn log_request(&self, request: &Request) {
        debug!(
            "Sending {} request to {}: {} call(s)",
            request.action,
            self.url,
            request.call_count()
        );
        if self.log_api_calls {
            info!("Request: \n{}", pretty(&request.to_value()));
        } else {
            trace!("Request body: {:?}", request);
        }
    }

    fn log_response(&self, response: &Value) {
        if self.log_api_calls {
            info!("Response: \n{}", pretty(response));
        } else {
            trace!("Response body: {}", response);
        }
    }

    fn request_error(&self, err: reqwest::Error) -> AnkiError {
        AnkiError::transport(format!(
            "An error occurred while requesting {:?}: {}",
            self.url, err
        ))
    }

    fn decode(&self, status: StatusCode, text: String) -> Result<Value> {
        if !status.is_success() {
            return Err(AnkiError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }
        let value: Value = serde_json::from_str(&text).map_err(|e| {
            AnkiError::transport(format!("Failed to parse response body as JSON: {}", e))
        })?;
        self.log_response(&value);
        Ok(value)
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Async transport over a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    config: HttpConfig,
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AnkiError::transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &Request) -> Result<Value> {
        self.config.log_request(request);

        let response = self
            .http_client
            .post(&self.config.url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.config.request_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.config.request_error(e))?;
        self.config.decode(status, text)
    }
}

/// Blocking transport over `reqwest::blocking::Client`.
///
/// Must not be created or dropped from inside an async runtime.
#[derive(Debug, Clone)]
pub struct BlockingHttpTransport {
    config: HttpConfig,
    http_client: reqwest::blocking::Client,
}

impl BlockingHttpTransport {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let http_client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AnkiError::transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }
}

impl BlockingTransport for BlockingHttpTransport {
    fn send_blocking(&self, request: &Request) -> Result<Value> {
        self.config.log_request(request);

        let response = self
            .http_client
            .post(&self.config.url)
            .json(request)
            .send()
            .map_err(|e| self.config.request_error(e))?;

        let status = response.status();
        let text = response.text().map_err(|e| self.config.request_error(e))?;
        self.config.decode(status, text)
    }
}
