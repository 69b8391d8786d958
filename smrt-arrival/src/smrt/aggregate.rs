//! Bulk arrival-time aggregation.

use serde_json::{Map, Value, json};

use super::client::SmrtClient;

impl SmrtClient {
    /// Fetch arrival times for every station, keyed by station name.
    ///
    /// Stations are queried one at a time in ascending name order, each
    /// through the full retry loop of [`SmrtClient::arrival_times`], so a
    /// run over the whole catalogue takes minutes. Callers wanting a quick
    /// answer should pass a `limit` to cover only the first N names; a
    /// `limit` of zero or one exceeding the catalogue size is ignored.
    ///
    /// Returns a JSON object mapping each covered station name to its
    /// arrival-time structure (the canonical empty structure for stations
    /// whose lookups exhausted their attempts).
    pub async fn all_arrival_times(&self, limit: Option<usize>) -> String {
        let station_names = self.station_names().await;
        let count = effective_limit(limit, station_names.len());

        let mut results = Map::new();
        for station_name in station_names.into_iter().take(count) {
            let body = self.arrival_times(&station_name).await;
            // arrival_times always yields parseable text; the fallback is
            // unreachable but keeps the no-panic contract explicit.
            let value: Value =
                serde_json::from_str(&body).unwrap_or_else(|_| json!({ "results": [] }));
            results.insert(station_name, value);
        }

        Value::Object(results).to_string()
    }
}

/// Clamp an optional limit to the usable range `1..=len`.
///
/// Anything outside that range (absent, zero, larger than the catalogue)
/// means "no truncation" and yields `len`.
fn effective_limit(limit: Option<usize>, len: usize) -> usize {
    match limit {
        Some(n) if (1..=len).contains(&n) => n,
        _ => len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn in_range_limit_applies() {
        assert_eq!(effective_limit(Some(1), 10), 1);
        assert_eq!(effective_limit(Some(5), 10), 5);
        assert_eq!(effective_limit(Some(10), 10), 10);
    }

    #[test]
    fn out_of_range_limit_is_ignored() {
        assert_eq!(effective_limit(None, 10), 10);
        assert_eq!(effective_limit(Some(0), 10), 10);
        assert_eq!(effective_limit(Some(11), 10), 10);
        assert_eq!(effective_limit(Some(usize::MAX), 10), 10);
    }

    #[test]
    fn empty_catalogue_yields_zero() {
        assert_eq!(effective_limit(None, 0), 0);
        assert_eq!(effective_limit(Some(3), 0), 0);
    }

    proptest! {
        #[test]
        fn effective_limit_never_exceeds_len(
            limit in prop::option::of(0usize..1000),
            len in 0usize..1000,
        ) {
            let count = effective_limit(limit, len);
            prop_assert!(count <= len);
            match limit {
                Some(n) if n >= 1 && n <= len => prop_assert_eq!(count, n),
                _ => prop_assert_eq!(count, len),
            }
        }
    }
}
