//! LRU cache of render-ready images.

use std::collections::HashMap;
use std::time::Instant;

use ratatui_image::protocol::StatefulProtocol;

/// Default number of images kept
const DEFAULT_CAPACITY: usize = 24;

struct CachedImage {
    protocol: StatefulProtocol,
    last_access: Instant,
}

/// Images keyed by media URL, owned by the UI thread
pub struct ImageCache {
    entries: HashMap<String, CachedImage>,
    capacity: usize,
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ImageCache {
    /// Create a cache holding at most `capacity` images
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Store an image, evicting the least recently used one when full
    pub fn insert(&mut self, url: &str, protocol: StatefulProtocol) {
        if !self.entries.contains_key(url) && self.entries.len() >= self.capacity {
            self.evict_oldest();
        }

        self.entries.insert(
            url.to_string(),
            CachedImage {
                protocol,
                last_access: Instant::now(),
            },
        );
    }

    /// Get an image for rendering
    pub fn get_mut(&mut self, url: &str) -> Option<&mut StatefulProtocol> {
        self.entries.get_mut(url).map(|entry| {
            entry.last_access = Instant::now();
            &mut entry.protocol
        })
    }

    /// Check if an image is cached
    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    /// Number of cached images
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_oldest(&mut self) {
        if let Some(oldest) = self
            .entries
            .iter()
            .min_by_key(|(_, v)| v.last_access)
            .map(|(k, _)| k.clone())
        {
            tracing::debug!("Evicting cached image {oldest}");
            self.entries.remove(&oldest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;
    use ratatui_image::picker::Picker;

    fn protocol() -> StatefulProtocol {
        Picker::halfblocks().new_resize_protocol(DynamicImage::new_rgb8(4, 4))
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache = ImageCache::with_capacity(2);
        cache.insert("a", protocol());
        std::thread::sleep(std::time::Duration::from_millis(2));
        cache.insert("b", protocol());
        std::thread::sleep(std::time::Duration::from_millis(2));

        // Touch "a" so "b" becomes the oldest
        assert!(cache.get_mut("a").is_some());
        std::thread::sleep(std::time::Duration::from_millis(2));
        cache.insert("c", protocol());

        assert_eq!(cache.len(), 2);
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_reinsert_does_not_evict() {
        let mut cache = ImageCache::with_capacity(1);
        cache.insert("a", protocol());
        cache.insert("a", protocol());
        assert_eq!(cache.len(), 1);
        assert!(!cache.is_empty());
    }
}
