//! Two-step feed loading: media index, then per-item detail resolution

use std::fmt;

use futures::{StreamExt, TryStreamExt, stream};

use crate::api::FeedSource;
use crate::error::FeedError;
use crate::models::MediaItem;

/// Account ID and access token for the upstream API
#[derive(Clone, PartialEq, Eq)]
pub struct FeedCredentials {
    /// Upstream account ID
    pub account_id: String,
    /// Access token
    pub access_token: String,
}

impl FeedCredentials {
    /// Create credentials
    pub fn new(account_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            access_token: access_token.into(),
        }
    }

    /// Ensure both values are present
    pub fn check(&self) -> Result<(), FeedError> {
        if self.account_id.trim().is_empty() {
            return Err(FeedError::ConfigMissing("account_id"));
        }
        if self.access_token.trim().is_empty() {
            return Err(FeedError::ConfigMissing("access_token"));
        }
        Ok(())
    }
}

impl fmt::Debug for FeedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedCredentials")
            .field("account_id", &self.account_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Load the full feed for an account.
///
/// With `concurrency <= 1` details are resolved strictly one after another.
/// Higher values keep at most `concurrency` detail requests in flight; the
/// output is always in index order. Any failure aborts the load.
pub async fn load_feed<S: FeedSource>(
    source: &S,
    credentials: &FeedCredentials,
    concurrency: usize,
) -> Result<Vec<MediaItem>, FeedError> {
    if let Err(e) = credentials.check() {
        tracing::warn!("Skipping feed load: {e}");
        return Err(e);
    }

    let ids = source.list_media(&credentials.account_id).await?.ids();
    tracing::debug!(count = ids.len(), concurrency, "media index received");

    let items = if concurrency <= 1 {
        resolve_sequential(source, ids).await?
    } else {
        resolve_concurrent(source, ids, concurrency).await?
    };

    tracing::info!("Loaded {} media items", items.len());
    Ok(items)
}

async fn resolve_one<S: FeedSource>(source: &S, id: String) -> Result<MediaItem, FeedError> {
    source.media_detail(&id).await?.into_item(id)
}

async fn resolve_sequential<S: FeedSource>(
    source: &S,
    ids: Vec<String>,
) -> Result<Vec<MediaItem>, FeedError> {
    let mut items = Vec::with_capacity(ids.len());
    for id in ids {
        items.push(resolve_one(source, id).await?);
    }
    Ok(items)
}

async fn resolve_concurrent<S: FeedSource>(
    source: &S,
    ids: Vec<String>,
    concurrency: usize,
) -> Result<Vec<MediaItem>, FeedError> {
    let mut tagged: Vec<(usize, MediaItem)> = stream::iter(ids.into_iter().enumerate())
        .map(|(order, id)| async move { resolve_one(source, id).await.map(|item| (order, item)) })
        .buffer_unordered(concurrency)
        .try_collect()
        .await?;

    tagged.sort_by_key(|(order, _)| *order);
    Ok(tagged.into_iter().map(|(_, item)| item).collect())
}
