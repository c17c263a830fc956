//! Wire schemas for the Graph API media endpoints

use serde::Deserialize;

use super::MediaItem;
use crate::error::FeedError;

/// Response of `GET /{account_id}/media`
#[derive(Debug, Clone, Deserialize)]
pub struct MediaIndex {
    /// Media references in upstream order (required)
    pub data: Vec<MediaRef>,
}

impl MediaIndex {
    /// IDs in upstream order
    pub fn ids(self) -> Vec<String> {
        self.data.into_iter().map(|r| r.id).collect()
    }
}

/// One entry of the media index
#[derive(Debug, Clone, Deserialize)]
pub struct MediaRef {
    /// Media ID
    pub id: String,
}

/// Response of `GET /{id}?fields=media_url,permalink,caption`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaDetail {
    /// Direct asset URL
    pub media_url: Option<String>,
    /// Link to the post
    pub permalink: Option<String>,
    /// Caption (absent for posts without text)
    pub caption: Option<String>,
}

impl MediaDetail {
    /// Convert into a `MediaItem`, validating required fields
    pub fn into_item(self, id: String) -> Result<MediaItem, FeedError> {
        let media_url = self.media_url.ok_or_else(|| {
            FeedError::MalformedResponse(format!("media {id} has no media_url"))
        })?;
        let permalink = self.permalink.ok_or_else(|| {
            FeedError::MalformedResponse(format!("media {id} has no permalink"))
        })?;

        Ok(MediaItem {
            id,
            permalink,
            media_url,
            caption: self.caption.unwrap_or_default(),
        })
    }
}

/// Graph API error envelope: `{"error": {"message": ..., "code": ...}}`
#[derive(Debug, Clone, Deserialize)]
pub struct GraphErrorEnvelope {
    /// Error body
    pub error: GraphErrorBody,
}

/// Body of a Graph API error
#[derive(Debug, Clone, Deserialize)]
pub struct GraphErrorBody {
    /// Human readable message
    pub message: String,
    /// Numeric error code
    #[serde(default)]
    pub code: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_requires_data() {
        let ok: MediaIndex = serde_json::from_str(r#"{"data":[{"id":"1"},{"id":"2"}]}"#).unwrap();
        assert_eq!(ok.ids(), vec!["1".to_string(), "2".to_string()]);

        let missing = serde_json::from_str::<MediaIndex>(r#"{"paging":{}}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn test_detail_without_caption_gets_empty_caption() {
        let detail: MediaDetail =
            serde_json::from_str(r#"{"media_url":"u1","permalink":"p1","id":"1"}"#).unwrap();
        let item = detail.into_item("1".to_string()).unwrap();
        assert_eq!(item.caption, "");
        assert_eq!(item.media_url, "u1");
    }

    #[test]
    fn test_detail_without_media_url_is_malformed() {
        let detail: MediaDetail = serde_json::from_str(r#"{"permalink":"p1"}"#).unwrap();
        let err = detail.into_item("9".to_string()).unwrap_err();
        assert!(matches!(err, FeedError::MalformedResponse(_)));
    }

    #[test]
    fn test_error_envelope() {
        let env: GraphErrorEnvelope = serde_json::from_str(
            r#"{"error":{"message":"Invalid OAuth access token","type":"OAuthException","code":190}}"#,
        )
        .unwrap();
        assert_eq!(env.error.code, Some(190));
        assert!(env.error.message.contains("OAuth"));
    }
}
