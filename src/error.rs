use thiserror::Error;

/// Errors that can occur during extraction operations.
///
/// These never escape a public operation: every `Extractor` method catches
/// them at the operation (or item) boundary and returns its documented
/// default shape instead.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Failed to fetch a URL
    #[error("Failed to fetch URL: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Response payload did not have the expected shape
    #[error("Unexpected payload shape: {0}")]
    Payload(#[from] serde_json::Error),

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Expected structure was absent from the document or reference
    #[error("Missing {0}")]
    Missing(&'static str),
}
