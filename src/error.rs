//! Error types for the feed pipeline

use thiserror::Error;

/// Failure of a feed load.
///
/// Every variant aborts the whole load: no partial item list is ever
/// produced, and the previously shown items stay in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// A required setting (account id or access token) is absent
    #[error("feed not configured: {0} is missing")]
    ConfigMissing(&'static str),
    /// Transport failure or non-success HTTP status
    #[error("network error: {0}")]
    Network(String),
    /// The response body did not match the expected schema
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl FeedError {
    /// Whether the error means the feed cannot be loaded until settings change
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::ConfigMissing(_))
    }
}
