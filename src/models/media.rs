//! Media item model

use serde::{Deserialize, Serialize};

/// A resolved post from the upstream feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Upstream media ID (stable key for list identity)
    pub id: String,
    /// Canonical link to the original post
    pub permalink: String,
    /// Direct URL to the displayable asset
    pub media_url: String,
    /// Caption text; line 0 is the title, the rest is the body
    pub caption: String,
}

impl MediaItem {
    /// Create a new media item
    pub fn new(
        id: impl Into<String>,
        permalink: impl Into<String>,
        media_url: impl Into<String>,
        caption: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            permalink: permalink.into(),
            media_url: media_url.into(),
            caption: caption.into(),
        }
    }

    /// First caption line
    pub fn title(&self) -> &str {
        self.caption.split('\n').next().unwrap_or_default()
    }

    /// Body preview shown on grid cards.
    ///
    /// Uses caption lines 1 and 2, so the line right after the title opens
    /// the preview and line 3 onwards is cut.
    pub fn card_preview(&self) -> String {
        self.caption
            .split('\n')
            .skip(1)
            .take(2)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Everything after the title, as shown in the overlay
    pub fn body(&self) -> String {
        self.caption.split('\n').skip(1).collect::<Vec<_>>().join("\n")
    }

    /// Lower-cased caption used by the search filter
    pub fn caption_lowercase(&self) -> String {
        self.caption.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(caption: &str) -> MediaItem {
        MediaItem::new("1", "https://example.com/p/1", "https://cdn.example.com/1.jpg", caption)
    }

    #[test]
    fn test_title_is_first_line() {
        assert_eq!(item("Arjuna\nThe archer\nPandava").title(), "Arjuna");
        assert_eq!(item("single").title(), "single");
        assert_eq!(item("").title(), "");
    }

    #[test]
    fn test_card_preview_uses_lines_one_and_two() {
        let it = item("L0\nL1\nL2\nL3");
        assert_eq!(it.card_preview(), "L1\nL2");
        assert_eq!(item("only").card_preview(), "");
        assert_eq!(item("a\nb").card_preview(), "b");
    }

    #[test]
    fn test_body_is_everything_after_title() {
        assert_eq!(item("L0\nL1\nL2\nL3").body(), "L1\nL2\nL3");
        assert_eq!(item("L0").body(), "");
    }
}
