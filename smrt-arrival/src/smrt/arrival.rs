//! Arrival-time lookup with retry and response validation.
//!
//! The upstream occasionally answers a query with stale data for a
//! different station, so every response is checked against the requested
//! name and retried with exponential backoff until it matches or the
//! attempt budget runs out.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::client::SmrtClient;

/// Body returned when no attempt produced usable arrival data.
pub const EMPTY_RESULTS: &str = r#"{"results": []}"#;

/// Wrapper for an arrival-time response. Records pass through as raw JSON
/// values; only the `mrt` field is inspected, never rewritten.
#[derive(Debug, Default, Deserialize)]
struct ArrivalResponse {
    #[serde(default)]
    results: Vec<Value>,
}

impl SmrtClient {
    /// Fetch arrival times for one station, as raw JSON text.
    ///
    /// Queries the arrival-time endpoint up to `max_attempts` times,
    /// sleeping `backoff * 2^(k-1)` before attempt `k` to stay under the
    /// upstream's rate limit. A response is accepted only if its records
    /// unanimously carry the requested station name, in which case the body
    /// is returned exactly as received. Once the budget is exhausted the
    /// result is [`EMPTY_RESULTS`], so the output always parses and always
    /// carries a `results` array.
    pub async fn arrival_times(&self, station_name: &str) -> String {
        let config = self.config();

        for attempt in 0..config.max_attempts {
            if attempt > 0 {
                tokio::time::sleep(config.backoff * 2u32.pow(attempt - 1)).await;
            }

            let body = self
                .fetch_json(&config.arrival_url, &[("station", station_name)])
                .await;

            if matches_station(station_name, &body) {
                return body;
            }
            warn!(station = station_name, attempt, "arrival response rejected");
        }

        EMPTY_RESULTS.to_string()
    }
}

/// Accept a body only if its records agree it is for `station_name`.
///
/// The set of non-empty `mrt` values across all records must be exactly the
/// requested name. Empty `results` counts as a miss: the upstream returns
/// that shape while rate-limiting.
fn matches_station(station_name: &str, body: &str) -> bool {
    let response: ArrivalResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(_) => return false,
    };

    if response.results.is_empty() {
        return false;
    }

    let names: BTreeSet<&str> = response
        .results
        .iter()
        .filter_map(|record| record.get("mrt").and_then(Value::as_str))
        .filter(|name| !name.is_empty())
        .collect();

    names.len() == 1 && names.contains(station_name)
}
