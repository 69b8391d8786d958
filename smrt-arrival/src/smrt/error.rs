//! SMRT API error types.

/// Errors that can occur when talking to the SMRT endpoints.
///
/// These stay internal to the client: [`super::SmrtClient::fetch_json`]
/// absorbs every failure, logs it, and hands callers an empty JSON body
/// instead. Only client construction surfaces an error.
#[derive(Debug, thiserror::Error)]
pub enum SmrtError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a status other than 200
    #[error("unexpected status {status}")]
    Status { status: u16 },

    /// Response body was not valid JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
