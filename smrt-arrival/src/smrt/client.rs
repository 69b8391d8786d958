//! SMRT Connect HTTP client.
//!
//! Holds the shared `reqwest` client and the fetch primitive every other
//! operation is built on. The SMRT endpoints refuse requests without a
//! specific `Referer`, so it is attached as a default header.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use tracing::error;

use super::error::SmrtError;

/// Default URL for the station catalogue endpoint.
const DEFAULT_STATIONS_URL: &str = "https://connect.smrt.wwprojects.com/smrt/api/stations";

/// Default URL for the arrival-time endpoint.
const DEFAULT_ARRIVAL_URL: &str =
    "https://connectv3.smrt.wwprojects.com/smrt/api/train_arrival_time_by_id";

/// Referer the SMRT endpoints require before they will serve data.
/// Credits: https://github.com/cheeaun/railrouter-sg
const SMRT_REFERER: &str = "http://journey.smrt.com.sg/journey/station_info/";

/// Body handed to callers whenever a request fails or returns unusable data.
pub const EMPTY_BODY: &str = "{}";

/// Configuration for the SMRT client.
#[derive(Debug, Clone)]
pub struct SmrtConfig {
    /// URL of the station catalogue endpoint
    pub stations_url: String,
    /// URL of the arrival-time endpoint
    pub arrival_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Attempt budget per arrival-time lookup
    pub max_attempts: u32,
    /// Base delay for the exponential backoff between lookup attempts
    pub backoff: Duration,
}

impl Default for SmrtConfig {
    fn default() -> Self {
        Self {
            stations_url: DEFAULT_STATIONS_URL.to_string(),
            arrival_url: DEFAULT_ARRIVAL_URL.to_string(),
            timeout_secs: 60,
            max_attempts: 3,
            backoff: Duration::from_secs(1),
        }
    }
}

impl SmrtConfig {
    /// Create a config pointing at the production endpoints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom station catalogue URL (for testing).
    pub fn with_stations_url(mut self, url: impl Into<String>) -> Self {
        self.stations_url = url.into();
        self
    }

    /// Set a custom arrival-time URL (for testing).
    pub fn with_arrival_url(mut self, url: impl Into<String>) -> Self {
        self.arrival_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the attempt budget for arrival-time lookups.
    pub fn with_max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    /// Set the base backoff delay between lookup attempts.
    ///
    /// Tests pass `Duration::ZERO` to run the retry loop without waiting.
    pub fn with_backoff(mut self, delay: Duration) -> Self {
        self.backoff = delay;
        self
    }
}

/// SMRT Connect API client.
///
/// Cheap to clone; all methods take `&self` and hold no state across calls.
#[derive(Debug, Clone)]
pub struct SmrtClient {
    http: reqwest::Client,
    config: SmrtConfig,
}

impl SmrtClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SmrtConfig) -> Result<Self, SmrtError> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static(SMRT_REFERER));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    pub(crate) fn config(&self) -> &SmrtConfig {
        &self.config
    }

    /// GET `url` and return the body when the status is 200 and the body is
    /// valid JSON text.
    ///
    /// Query parameters are appended URL-encoded when `params` is non-empty.
    /// Every failure mode (transport error, timeout, non-200 status, body
    /// that does not parse as JSON) is logged and degrades to [`EMPTY_BODY`],
    /// so callers always receive parseable text and never an error.
    pub async fn fetch_json(&self, url: &str, params: &[(&str, &str)]) -> String {
        match self.get_validated(url, params).await {
            Ok(body) => body,
            Err(e) => {
                error!(url, error = %e, "SMRT request failed");
                EMPTY_BODY.to_string()
            }
        }
    }

    async fn get_validated(&self, url: &str, params: &[(&str, &str)]) -> Result<String, SmrtError> {
        let mut request = self.http.get(url);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(SmrtError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;

        // The upstream serves HTML error pages with status 200 on occasion;
        // insist the body is JSON before handing it back.
        serde_json::from_str::<serde_json::Value>(&body).map_err(|e| SmrtError::Json {
            message: e.to_string(),
        })?;

        Ok(body)
    }

    /// Fetch the raw station catalogue body.
    pub async fn station_info(&self) -> String {
        self.fetch_json(&self.config.stations_url, &[]).await
    }
}
