//! Station catalogue reader.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::Value;

use super::client::SmrtClient;

/// Wrapper for the station catalogue response.
///
/// Entries stay raw JSON values: the upstream attaches a grab-bag of fields
/// per station and only `name` matters here. A top-level value that is not
/// an object, or a missing `results` field, deserializes to no entries.
#[derive(Debug, Default, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    results: Vec<Value>,
}

impl SmrtClient {
    /// Fetch all station names, deduplicated and sorted ascending.
    ///
    /// Entries without a non-empty string `name` are dropped silently; a
    /// failed or malformed catalogue fetch yields an empty list.
    pub async fn station_names(&self) -> Vec<String> {
        let body = self.station_info().await;
        extract_station_names(&body)
    }
}

/// Pull the unique, non-empty station names out of a catalogue body.
fn extract_station_names(body: &str) -> Vec<String> {
    let response: CatalogResponse = serde_json::from_str(body).unwrap_or_default();

    let names: BTreeSet<String> = response
        .results
        .iter()
        .filter_map(|entry| entry.get("name").and_then(Value::as_str))
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect();

    names.into_iter().collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    proptest! {
        #[test]
        fn extract_output_is_sorted_unique_and_non_empty(
            names in prop::collection::vec(".{0,12}", 0..20)
        ) {
            let entries: Vec<Value> = names.iter().map(|n| json!({"name": n})).collect();
            let body = json!({"results": entries}).to_string();

            let extracted = extract_station_names(&body);

            for window in extracted.windows(2) {
                prop_assert!(window[0] < window[1], "not strictly ascending: {:?}", window);
            }
            for name in &extracted {
                prop_assert!(!name.is_empty());
                prop_assert!(names.contains(name));
            }
            for name in names.iter().filter(|n| !n.is_empty()) {
                prop_assert!(extracted.contains(name));
            }
        }
    }
}
