//! SMRT train arrival times.
//!
//! A client library for the SMRT Connect API: lists the stations on the
//! network and fetches real-time train arrival estimates, validating each
//! response against the station that was asked for.

pub mod smrt;
