//! Sharing posts through the host platform
//!
//! A terminal has no share sheet, so the closest native capability is the
//! system URL handler. When no graphical session is around (or sharing is
//! disabled in config) there is no capability and the UI shows a notice.

use anyhow::{Context, Result};

use crate::models::MediaItem;

/// Title sent with every share request
pub const SHARE_TITLE: &str = "Check out this Instagram post!";

/// Notice shown when sharing is unavailable
pub const SHARE_UNSUPPORTED: &str = "Sharing is not supported in this terminal.";

/// Payload handed to the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    /// Share sheet title
    pub title: String,
    /// Post caption
    pub text: String,
    /// Post permalink
    pub url: String,
}

impl ShareRequest {
    /// Build the request for a media item
    pub fn for_item(item: &MediaItem) -> Self {
        Self {
            title: SHARE_TITLE.to_string(),
            text: item.caption.clone(),
            url: item.permalink.clone(),
        }
    }
}

/// A platform share capability
pub trait ShareCapability {
    /// Short name for status messages
    fn name(&self) -> &'static str;

    /// Hand the request to the platform
    fn share(&self, request: &ShareRequest) -> Result<()>;
}

/// Shares by opening the permalink with the system handler
pub struct SystemShare;

impl ShareCapability for SystemShare {
    fn name(&self) -> &'static str {
        "system browser"
    }

    fn share(&self, request: &ShareRequest) -> Result<()> {
        tracing::debug!(title = %request.title, url = %request.url, "Sharing post");
        open::that(&request.url).with_context(|| format!("Failed to open {}", request.url))
    }
}

/// Outcome of a share attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The platform accepted the request
    Shared(&'static str),
    /// No capability available
    Unsupported,
    /// The platform call failed
    Failed(String),
}

/// Detect the share capability of the host
pub fn detect(enabled: bool) -> Option<Box<dyn ShareCapability>> {
    if enabled && has_graphical_session() {
        Some(Box::new(SystemShare))
    } else {
        tracing::info!("No share capability available");
        None
    }
}

#[cfg(target_os = "linux")]
fn has_graphical_session() -> bool {
    ["BROWSER", "DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()))
}

#[cfg(not(target_os = "linux"))]
fn has_graphical_session() -> bool {
    true
}

/// Share an item, containing any failure
pub fn share_item(capability: Option<&dyn ShareCapability>, item: &MediaItem) -> ShareOutcome {
    let Some(capability) = capability else {
        return ShareOutcome::Unsupported;
    };

    match capability.share(&ShareRequest::for_item(item)) {
        Ok(()) => ShareOutcome::Shared(capability.name()),
        Err(e) => {
            tracing::warn!("Error sharing {}: {e:#}", item.permalink);
            ShareOutcome::Failed(e.to_string())
        }
    }
}
