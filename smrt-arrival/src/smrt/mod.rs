//! SMRT Connect API client.
//!
//! Provides the station catalogue, per-station arrival-time lookups with
//! retry and response validation, and a bulk aggregator over the network.

mod aggregate;
mod arrival;
mod catalog;
mod client;
mod error;

pub use arrival::EMPTY_RESULTS;
pub use client::{EMPTY_BODY, SmrtClient, SmrtConfig};
pub use error::SmrtError;
