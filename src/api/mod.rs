//! Upstream feed API

pub mod graph;

pub use graph::GraphClient;

use crate::error::FeedError;
use crate::models::{MediaDetail, MediaIndex};

/// Default Graph API host
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.instagram.com";

/// Read-only source of feed data.
///
/// Both calls are idempotent reads; implementations map transport errors to
/// `FeedError::Network` and schema mismatches to `FeedError::MalformedResponse`.
#[allow(async_fn_in_trait)]
pub trait FeedSource {
    /// Fetch the media index for an account
    async fn list_media(&self, account_id: &str) -> Result<MediaIndex, FeedError>;

    /// Resolve one media ID to its URL, permalink and caption
    async fn media_detail(&self, id: &str) -> Result<MediaDetail, FeedError>;
}
