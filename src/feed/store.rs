//! Feed state store
//!
//! `FeedStore` is the only owner of the feed state. Loads are started with
//! [`FeedStore::begin_load`], which hands out a generation number; results
//! come back as [`FeedEvent`] messages and are applied only if they carry the
//! current generation and the store has not been cancelled.

use crate::error::FeedError;
use crate::models::MediaItem;

use super::filter;

/// Number of placeholder blocks rendered before any items exist
pub const SKELETON_SLOTS: usize = 16;

/// Load phase of the feed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedPhase {
    /// Credentials are missing; no load will be attempted
    Unconfigured { reason: String },
    /// A load is in flight (or about to start)
    #[default]
    Loading,
    /// The last load succeeded
    Ready,
    /// The last load failed; previous items are kept
    Failed { message: String },
}

/// Result of a feed load, tagged with the generation that started it
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// Load finished with the full item list
    Loaded { generation: u64, items: Vec<MediaItem> },
    /// Load aborted
    Failed { generation: u64, error: FeedError },
}

impl FeedEvent {
    /// Generation of the load this event belongs to
    pub const fn generation(&self) -> u64 {
        match self {
            Self::Loaded { generation, .. } | Self::Failed { generation, .. } => *generation,
        }
    }
}

/// Feed state plus its update rules
#[derive(Debug, Default)]
pub struct FeedStore {
    items: Vec<MediaItem>,
    search_query: String,
    selected: Option<MediaItem>,
    phase: FeedPhase,
    generation: u64,
    cancelled: bool,
}

impl FeedStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// All loaded items in feed order
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Current load phase
    pub const fn phase(&self) -> &FeedPhase {
        &self.phase
    }

    /// Generation of the most recently started load
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a new load and return its generation
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.cancelled = false;
        self.phase = FeedPhase::Loading;
        self.generation
    }

    /// Record that the feed cannot be loaded with the current settings
    pub fn mark_unconfigured(&mut self, reason: impl Into<String>) {
        self.phase = FeedPhase::Unconfigured {
            reason: reason.into(),
        };
    }

    /// Stop accepting results until the next `begin_load`
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Drop items, query and selection, and cancel any load in flight.
    ///
    /// The generation counter keeps counting so results from before the
    /// reset can never match a later load.
    pub fn clear(&mut self) {
        self.cancel();
        self.items.clear();
        self.search_query.clear();
        self.selected = None;
        self.phase = FeedPhase::default();
    }

    /// Apply a load result. Returns `false` if it was stale and dropped.
    pub fn apply(&mut self, event: FeedEvent) -> bool {
        if self.cancelled || event.generation() != self.generation {
            tracing::debug!(
                event_generation = event.generation(),
                current = self.generation,
                cancelled = self.cancelled,
                "Dropping stale feed result"
            );
            return false;
        }

        match event {
            FeedEvent::Loaded { items, .. } => {
                // Keep the overlay open only if its item survived the reload
                if let Some(selected) = &self.selected {
                    self.selected = items.iter().find(|i| i.id == selected.id).cloned();
                }
                self.items = items;
                self.phase = FeedPhase::Ready;
            }
            FeedEvent::Failed { error, .. } => {
                tracing::warn!("Feed load failed: {error}");
                self.phase = if error.is_config() {
                    FeedPhase::Unconfigured {
                        reason: error.to_string(),
                    }
                } else {
                    FeedPhase::Failed {
                        message: error.to_string(),
                    }
                };
            }
        }
        true
    }

    /// Current search query
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Replace the search query
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Append a character to the search query
    pub fn push_query_char(&mut self, c: char) {
        self.search_query.push(c);
    }

    /// Remove the last character of the search query
    pub fn pop_query_char(&mut self) {
        self.search_query.pop();
    }

    /// Items matching the current query
    pub fn visible(&self) -> Vec<&MediaItem> {
        filter::filter_refs(&self.items, &self.search_query)
    }

    /// Open the overlay for an item, replacing any current selection
    pub fn select(&mut self, item: MediaItem) {
        self.selected = Some(item);
    }

    /// Close the overlay
    pub fn dismiss(&mut self) {
        self.selected = None;
    }

    /// Item shown in the overlay
    pub const fn selected(&self) -> Option<&MediaItem> {
        self.selected.as_ref()
    }

    /// Whether the placeholder grid should be shown
    pub fn show_skeleton(&self) -> bool {
        self.items.is_empty() && matches!(self.phase, FeedPhase::Loading | FeedPhase::Ready)
    }

    /// Whether a load is in flight
    pub fn is_loading(&self) -> bool {
        self.phase == FeedPhase::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, caption: &str) -> MediaItem {
        MediaItem::new(id, format!("p{id}"), format!("u{id}"), caption)
    }

    #[test]
    fn test_starts_empty_with_skeleton() {
        let store = FeedStore::new();
        assert!(store.items().is_empty());
        assert!(store.show_skeleton());
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_loaded_replaces_items() {
        let mut store = FeedStore::new();
        let generation = store.begin_load();
        assert!(store.apply(FeedEvent::Loaded {
            generation,
            items: vec![item("1", "A"), item("2", "B")],
        }));
        assert_eq!(store.items().len(), 2);
        assert_eq!(store.phase(), &FeedPhase::Ready);
        assert!(!store.show_skeleton());
    }

    #[test]
    fn test_failure_keeps_previous_items() {
        let mut store = FeedStore::new();
        let first = store.begin_load();
        store.apply(FeedEvent::Loaded {
            generation: first,
            items: vec![item("1", "A")],
        });

        let second = store.begin_load();
        store.apply(FeedEvent::Failed {
            generation: second,
            error: FeedError::Network("offline".into()),
        });

        assert_eq!(store.items(), &[item("1", "A")]);
        assert!(matches!(store.phase(), FeedPhase::Failed { .. }));
    }

    #[test]
    fn test_first_load_failure_leaves_items_empty() {
        let mut store = FeedStore::new();
        let generation = store.begin_load();
        store.apply(FeedEvent::Failed {
            generation,
            error: FeedError::MalformedResponse("no data".into()),
        });
        assert!(store.items().is_empty());
        assert!(!store.show_skeleton());
    }

    #[test]
    fn test_config_missing_becomes_unconfigured() {
        let mut store = FeedStore::new();
        let generation = store.begin_load();
        store.apply(FeedEvent::Failed {
            generation,
            error: FeedError::ConfigMissing("access_token"),
        });
        assert!(matches!(store.phase(), FeedPhase::Unconfigured { .. }));
    }

    #[test]
    fn test_stale_generation_is_dropped() {
        let mut store = FeedStore::new();
        let old = store.begin_load();
        let current = store.begin_load();

        assert!(!store.apply(FeedEvent::Loaded {
            generation: old,
            items: vec![item("old", "stale")],
        }));
        assert!(store.items().is_empty());

        assert!(store.apply(FeedEvent::Loaded {
            generation: current,
            items: vec![item("new", "fresh")],
        }));
        assert_eq!(store.items()[0].id, "new");
    }

    #[test]
    fn test_cancelled_store_ignores_results() {
        let mut store = FeedStore::new();
        let generation = store.begin_load();
        store.cancel();
        assert!(!store.apply(FeedEvent::Loaded {
            generation,
            items: vec![item("1", "A")],
        }));
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_clear_drops_everything_and_cancels() {
        let mut store = FeedStore::new();
        let first = store.begin_load();
        store.apply(FeedEvent::Loaded {
            generation: first,
            items: vec![item("1", "Arjuna"), item("2", "Karna")],
        });
        store.set_query("kar");
        store.select(item("2", "Karna"));

        let pending = store.begin_load();
        store.clear();

        assert!(store.items().is_empty());
        assert!(store.search_query().is_empty());
        assert!(store.selected().is_none());
        assert!(store.show_skeleton());
        assert!(!store.apply(FeedEvent::Loaded {
            generation: pending,
            items: vec![item("3", "Bhima")],
        }));

        // Next load starts past every earlier generation
        assert!(store.begin_load() > pending);
    }

    #[test]
    fn test_select_dismiss_replace() {
        let mut store = FeedStore::new();
        let x = item("x", "X");
        let y = item("y", "Y");

        store.select(x.clone());
        assert_eq!(store.selected(), Some(&x));

        store.dismiss();
        assert!(store.selected().is_none());

        store.select(x);
        store.select(y.clone());
        assert_eq!(store.selected(), Some(&y));
    }

    #[test]
    fn test_visible_follows_query() {
        let mut store = FeedStore::new();
        let generation = store.begin_load();
        store.apply(FeedEvent::Loaded {
            generation,
            items: vec![item("1", "Arjuna"), item("2", "Karna"), item("3", "Bhima")],
        });

        store.set_query("RNA");
        let ids: Vec<_> = store.visible().iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids, vec!["2"]);

        store.pop_query_char();
        store.pop_query_char();
        store.push_query_char('j');
        let ids: Vec<_> = store.visible().iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn test_reload_drops_selection_of_removed_item() {
        let mut store = FeedStore::new();
        let generation = store.begin_load();
        store.apply(FeedEvent::Loaded {
            generation,
            items: vec![item("1", "A"), item("2", "B")],
        });
        store.select(item("2", "B"));

        let generation = store.begin_load();
        store.apply(FeedEvent::Loaded {
            generation,
            items: vec![item("1", "A")],
        });
        assert!(store.selected().is_none());
    }
}
