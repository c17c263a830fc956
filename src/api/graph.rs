//! Graph API client

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::FeedError;
use crate::models::schema::GraphErrorEnvelope;
use crate::models::{MediaDetail, MediaIndex};

use super::FeedSource;

/// Fields requested for every media detail lookup
const DETAIL_FIELDS: &str = "media_url,permalink,caption";

/// Graph API client
pub struct GraphClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl GraphClient {
    /// Create a new Graph API client
    pub fn new(base_url: &str, access_token: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        }
    }

    /// Build the media index URL
    fn list_url(&self, account_id: &str) -> String {
        format!(
            "{}/{}/media?access_token={}",
            self.base_url,
            urlencoding::encode(account_id),
            urlencoding::encode(&self.access_token)
        )
    }

    /// Build the media detail URL
    fn detail_url(&self, id: &str) -> String {
        format!(
            "{}/{}?access_token={}&fields={}",
            self.base_url,
            urlencoding::encode(id),
            urlencoding::encode(&self.access_token),
            DETAIL_FIELDS
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T, FeedError> {
        // `without_url` keeps the access token out of error messages and logs
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::Network(format!("{what}: {}", e.without_url())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FeedError::Network(format!("{what}: {}", e.without_url())))?;

        if !status.is_success() {
            let message = serde_json::from_str::<GraphErrorEnvelope>(&body)
                .map(|env| env.error.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(FeedError::Network(format!("{what}: HTTP {status}: {message}")));
        }

        serde_json::from_str(&body).map_err(|e| FeedError::MalformedResponse(format!("{what}: {e}")))
    }
}

impl FeedSource for GraphClient {
    async fn list_media(&self, account_id: &str) -> Result<MediaIndex, FeedError> {
        tracing::debug!(account_id, "fetching media index");
        self.get_json(&self.list_url(account_id), "media index").await
    }

    async fn media_detail(&self, id: &str) -> Result<MediaDetail, FeedError> {
        tracing::debug!(id, "fetching media detail");
        self.get_json(&self.detail_url(id), &format!("media {id}")).await
    }
}
