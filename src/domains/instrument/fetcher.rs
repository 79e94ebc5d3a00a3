//! Single-attempt access to the instrument endpoint.

use std::time::Duration;

use tracing::{debug, instrument};

use super::error::{InstrumentError, InstrumentResult};
use super::reading::{InstrumentReading, InstrumentSetting};

/// Public Claude-Light endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://claude-light.cheme.cmu.edu/api";

/// Per-request timeout for the HTTP client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One round trip to the instrument.
///
/// Implementations perform exactly one request per call and never retry;
/// retrying is the caller's [`RetryPolicy`](super::RetryPolicy).
pub trait Fetcher: Send + Sync {
    fn fetch_once(&self, setting: &InstrumentSetting) -> InstrumentResult<InstrumentReading>;
}

/// Blocking HTTP fetcher.
///
/// Setting the LEDs is a side effect of every request, so nothing is cached.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    endpoint: String,
    timeout: Duration,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_TIMEOUT)
    }
}

impl HttpFetcher {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    fn fetch_once(&self, setting: &InstrumentSetting) -> InstrumentResult<InstrumentReading> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| InstrumentError::request(format!("Failed to create HTTP client: {e}")))?;

        let response = client
            .get(&self.endpoint)
            .query(&setting.query()[..])
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    InstrumentError::request("Request timed out")
                } else if e.is_connect() {
                    InstrumentError::request(format!("Connection failed: {e}"))
                } else {
                    InstrumentError::request(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(InstrumentError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| InstrumentError::request(format!("Failed to read body: {e}")))?;

        debug!("Instrument response received: {} bytes", body.len());

        InstrumentReading::from_body(&body)
    }
}
