//! Full-size media for the detail overlay.
//!
//! Images are downloaded by the async worker, turned into terminal graphics
//! protocols (Sixel, Kitty, iTerm2 or Unicode halfblocks) on the UI thread,
//! and kept in a small LRU cache.

mod cache;
mod loader;

pub use cache::ImageCache;
pub use loader::{download_and_decode, resize_if_needed};

use ratatui_image::picker::Picker;
use std::sync::OnceLock;

/// Global picker instance (initialized once at startup)
static PICKER: OnceLock<Picker> = OnceLock::new();

/// Query the terminal for graphics support.
///
/// Must run before the TUI enters raw mode. Falls back to halfblocks.
pub fn init_picker() {
    PICKER.get_or_init(|| match Picker::from_query_stdio() {
        Ok(p) => {
            tracing::info!("Image support detected: {:?}", p.protocol_type());
            p
        }
        Err(e) => {
            tracing::debug!("No image protocol support: {e}");
            Picker::halfblocks()
        }
    });
}

/// Get the global picker instance, if `init_picker` ran
pub fn picker() -> Option<&'static Picker> {
    PICKER.get()
}
