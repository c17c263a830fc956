//! Application state

use std::collections::HashSet;

use image::DynamicImage;

use super::async_ops::AsyncCommand;
use crate::auth::{LoginForm, SignupForm};
use crate::config::Config;
use crate::feed::FeedStore;
use crate::images::{self, ImageCache};
use crate::models::MediaItem;
use crate::share::{self, SHARE_UNSUPPORTED, ShareCapability, ShareOutcome};
use crate::theme::Theme;

/// Narrowest a card may get before the grid drops a column
pub const MIN_CARD_WIDTH: u16 = 30;
/// Card height in rows, borders included
pub const CARD_HEIGHT: u16 = 8;
/// Ticks a toast stays on screen (~3s at the 50ms poll)
const TOAST_TICKS: u64 = 60;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Signup,
    Feed,
}

/// Input mode on top of the current screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Typing into the search bar
    Search,
    Help,
    /// Blocking message that must be dismissed
    Notice(String),
}

/// Login screen state
#[derive(Debug, Default)]
pub struct LoginState {
    pub form: LoginForm,
    /// 0 = email, 1 = password
    pub focus: usize,
    pub pending: bool,
}

impl LoginState {
    pub const FIELDS: usize = 2;

    /// Text field under focus
    pub fn focused_text(&mut self) -> &mut String {
        if self.focus == 0 {
            &mut self.form.email
        } else {
            &mut self.form.password
        }
    }
}

/// Signup screen state
#[derive(Debug, Default)]
pub struct SignupState {
    pub form: SignupForm,
    /// 0 = username, 1 = email, 2 = password, 3 = terms
    pub focus: usize,
    pub pending: bool,
}

impl SignupState {
    pub const FIELDS: usize = 4;

    /// Text field under focus, `None` on the terms checkbox
    pub fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            0 => Some(&mut self.form.username),
            1 => Some(&mut self.form.email),
            2 => Some(&mut self.form.password),
            _ => None,
        }
    }
}

/// Transient message shown over the current screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub is_error: bool,
    expires_at: u64,
}

/// Application state
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Whether to quit
    pub should_quit: bool,
    /// Current theme
    pub theme: Theme,
    /// Current screen
    pub screen: Screen,
    /// Current input mode
    pub mode: Mode,

    /// Feed items, query, selection and load phase
    pub store: FeedStore,
    /// Focused card, index into the visible items
    pub cursor: usize,
    /// First visible grid row
    pub grid_scroll: usize,
    /// Columns in the last rendered grid
    pub grid_columns: usize,

    /// Login form
    pub login: LoginState,
    /// Signup form
    pub signup: SignupState,

    /// Status message
    pub status: String,
    /// Toast notification
    pub toast: Option<Toast>,

    /// Platform share capability, if any
    pub share: Option<Box<dyn ShareCapability>>,

    /// Render-ready overlay images
    pub image_cache: ImageCache,
    /// Image URLs currently downloading
    pub loading_images: HashSet<String>,
    /// Image URLs that failed; not retried this session
    pub failed_images: HashSet<String>,

    /// Animation tick counter
    tick: u64,
}

impl AppState {
    /// Create new app state
    pub fn new(config: Config, share: Option<Box<dyn ShareCapability>>) -> Self {
        let screen = if config.auth_url().is_some() {
            Screen::Login
        } else {
            Screen::Feed
        };

        Self {
            theme: config.theme,
            config,
            should_quit: false,
            screen,
            mode: Mode::Normal,
            store: FeedStore::new(),
            cursor: 0,
            grid_scroll: 0,
            grid_columns: 1,
            login: LoginState::default(),
            signup: SignupState::default(),
            status: String::new(),
            toast: None,
            share,
            image_cache: ImageCache::default(),
            loading_images: HashSet::new(),
            failed_images: HashSet::new(),
            tick: 0,
        }
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = msg.into();
    }

    /// Show a toast for a few seconds
    pub fn show_toast(&mut self, msg: impl Into<String>, is_error: bool) {
        self.toast = Some(Toast {
            message: msg.into(),
            is_error,
            expires_at: self.tick + TOAST_TICKS,
        });
    }

    /// Advance animations and expire the toast
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if self.toast.as_ref().is_some_and(|t| self.tick >= t.expires_at) {
            self.toast = None;
        }
    }

    /// Get current tick for animations
    pub const fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Whether a spinner should be shown
    pub fn is_busy(&self) -> bool {
        match self.screen {
            Screen::Feed => self.store.is_loading(),
            Screen::Login => self.login.pending,
            Screen::Signup => self.signup.pending,
        }
    }

    /// Start a feed load, or mark the feed unconfigured
    pub fn start_feed_load(&mut self) -> Option<AsyncCommand> {
        match self.config.feed_credentials() {
            Ok(credentials) => {
                let generation = self.store.begin_load();
                self.set_status("Loading feed...");
                Some(AsyncCommand::LoadFeed {
                    generation,
                    credentials,
                    settings: self.config.fetch_settings(),
                })
            }
            Err(e) => {
                tracing::warn!("Feed not loaded: {e}");
                self.store.mark_unconfigured(e.to_string());
                self.set_status("Feed not configured");
                None
            }
        }
    }

    /// Switch to the feed screen and load it
    pub fn enter_feed(&mut self) -> Option<AsyncCommand> {
        self.screen = Screen::Feed;
        self.mode = Mode::Normal;
        self.start_feed_load()
    }

    /// Return to the login screen, dropping any feed state
    pub fn enter_login(&mut self) {
        self.store.clear();
        self.cursor = 0;
        self.grid_scroll = 0;
        self.screen = Screen::Login;
        self.mode = Mode::Normal;
        self.login.pending = false;
        self.login.form.password.clear();
    }

    /// Number of items passing the current query
    pub fn visible_len(&self) -> usize {
        self.store.visible().len()
    }

    /// Item under the grid cursor
    pub fn focused_item(&self) -> Option<&MediaItem> {
        self.store.visible().get(self.cursor).copied()
    }

    /// Keep the cursor inside the visible items
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor + 1 < self.visible_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        let cols = self.grid_columns.max(1);
        if self.cursor >= cols {
            self.cursor -= cols;
        }
    }

    pub fn cursor_down(&mut self) {
        let cols = self.grid_columns.max(1);
        let len = self.visible_len();
        if self.cursor + cols < len {
            self.cursor += cols;
        } else if len > 0 && (len - 1) / cols > self.cursor / cols {
            // Short last row
            self.cursor = len - 1;
        }
    }

    /// Open the overlay for the focused card
    pub fn select_focused(&mut self) {
        if let Some(item) = self.focused_item().cloned() {
            self.store.select(item);
        }
    }

    /// Item that share/open act on: the overlay if open, else the focused card
    pub fn action_target(&self) -> Option<&MediaItem> {
        self.store.selected().or_else(|| self.focused_item())
    }

    /// Share the target item through the platform capability
    pub fn share_target(&mut self) {
        let Some(item) = self.action_target().cloned() else {
            self.set_status("Nothing to share");
            return;
        };

        match share::share_item(self.share.as_deref(), &item) {
            ShareOutcome::Shared(via) => self.set_status(format!("Shared via {via}")),
            ShareOutcome::Unsupported => self.mode = Mode::Notice(SHARE_UNSUPPORTED.to_string()),
            ShareOutcome::Failed(e) => self.set_status(format!("❌ Share failed: {e}")),
        }
    }

    /// Open the target's permalink in the browser
    pub fn open_target(&mut self) {
        let Some(url) = self.action_target().map(|item| item.permalink.clone()) else {
            return;
        };

        match open::that(&url) {
            Ok(()) => self.set_status(format!("Opened {url}")),
            Err(e) => {
                tracing::warn!("Failed to open {url}: {e}");
                self.set_status(format!("❌ Could not open link: {e}"));
            }
        }
    }

    /// Images the overlay wants that are neither cached nor in flight
    pub fn images_to_load(&self) -> Vec<String> {
        if !self.config.show_images || images::picker().is_none() {
            return Vec::new();
        }

        self.store
            .selected()
            .map(|item| item.media_url.as_str())
            .filter(|url| !url.is_empty())
            .filter(|url| {
                !self.image_cache.contains(url)
                    && !self.loading_images.contains(*url)
                    && !self.failed_images.contains(*url)
            })
            .map(str::to_string)
            .into_iter()
            .collect()
    }

    /// Mark images as loading
    pub fn mark_images_loading(&mut self, urls: &[String]) {
        self.loading_images.extend(urls.iter().cloned());
    }

    /// Turn a downloaded image into a render protocol and cache it
    pub fn insert_image(&mut self, url: &str, image: DynamicImage) {
        self.loading_images.remove(url);
        if let Some(picker) = images::picker() {
            self.image_cache.insert(url, picker.new_resize_protocol(image));
        }
    }

    /// Record an image that could not be loaded
    pub fn image_failed(&mut self, url: &str) {
        self.loading_images.remove(url);
        self.failed_images.insert(url.to_string());
    }
}

/// Grid columns that fit in `width`
pub fn grid_columns_for(width: u16) -> usize {
    usize::from((width / MIN_CARD_WIDTH).max(1))
}

/// First grid row to show so that `cursor_row` stays on screen
pub const fn scroll_for(cursor_row: usize, scroll: usize, visible_rows: usize) -> usize {
    let visible_rows = if visible_rows == 0 { 1 } else { visible_rows };
    if cursor_row < scroll {
        cursor_row
    } else if cursor_row >= scroll + visible_rows {
        cursor_row + 1 - visible_rows
    } else {
        scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedEvent;
    use crate::feed::FeedPhase;

    fn items(n: usize) -> Vec<MediaItem> {
        (0..n)
            .map(|i| {
                MediaItem::new(
                    i.to_string(),
                    format!("https://instagram.com/p/{i}"),
                    format!("https://cdn.example/{i}.jpg"),
                    format!("Post {i}\nbody"),
                )
            })
            .collect()
    }

    fn configured() -> Config {
        Config {
            account_id: Some("17841400000000000".into()),
            access_token: Some("token".into()),
            ..Config::default()
        }
    }

    fn loaded_state(n: usize, columns: usize) -> AppState {
        let mut state = AppState::new(configured(), None);
        let generation = state.store.begin_load();
        state.store.apply(FeedEvent::Loaded {
            generation,
            items: items(n),
        });
        state.grid_columns = columns;
        state
    }

    #[test]
    fn test_start_screen_depends_on_auth() {
        assert_eq!(AppState::new(configured(), None).screen, Screen::Feed);

        let config = Config {
            auth_url: Some("http://localhost:3000/api".into()),
            ..configured()
        };
        assert_eq!(AppState::new(config, None).screen, Screen::Login);
    }

    #[test]
    fn test_start_feed_load_without_credentials() {
        let mut state = AppState::new(Config::default(), None);
        assert!(state.start_feed_load().is_none());
        assert!(matches!(
            state.store.phase(),
            FeedPhase::Unconfigured { reason } if reason.contains("account_id")
        ));
    }

    #[test]
    fn test_start_feed_load_tags_generation() {
        let mut state = AppState::new(configured(), None);
        let Some(AsyncCommand::LoadFeed { generation, .. }) = state.start_feed_load() else {
            panic!("expected a load command");
        };
        assert_eq!(generation, state.store.generation());
        assert!(state.store.is_loading());
    }

    #[test]
    fn test_cursor_moves_within_grid() {
        // 7 items, 3 columns: rows [0 1 2] [3 4 5] [6]
        let mut state = loaded_state(7, 3);

        state.cursor_right();
        state.cursor_down();
        assert_eq!(state.cursor, 4);

        state.cursor_down();
        assert_eq!(state.cursor, 6);
        state.cursor_down();
        assert_eq!(state.cursor, 6);

        state.cursor_up();
        assert_eq!(state.cursor, 3);
        state.cursor_left();
        state.cursor_left();
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn test_cursor_clamped_after_filter() {
        let mut state = loaded_state(5, 2);
        state.cursor = 4;
        state.store.set_query("post 1");
        state.clamp_cursor();
        assert_eq!(state.cursor, 0);
        assert_eq!(state.focused_item().map(|i| i.id.as_str()), Some("1"));
    }

    #[test]
    fn test_select_and_action_target() {
        let mut state = loaded_state(3, 3);
        state.cursor = 2;
        assert_eq!(state.action_target().map(|i| i.id.as_str()), Some("2"));

        state.select_focused();
        state.cursor = 0;
        // Overlay wins over the cursor
        assert_eq!(state.action_target().map(|i| i.id.as_str()), Some("2"));
    }

    #[test]
    fn test_share_without_capability_shows_notice() {
        let mut state = loaded_state(1, 1);
        state.share_target();
        assert_eq!(state.mode, Mode::Notice(SHARE_UNSUPPORTED.to_string()));
    }

    #[test]
    fn test_toast_expires() {
        let mut state = AppState::new(configured(), None);
        state.show_toast("Invalid email", true);
        for _ in 0..TOAST_TICKS - 1 {
            state.tick();
        }
        assert!(state.toast.is_some());
        state.tick();
        assert!(state.toast.is_none());
    }

    #[test]
    fn test_enter_login_cancels_feed() {
        let mut state = AppState::new(configured(), None);
        let Some(AsyncCommand::LoadFeed { generation, .. }) = state.start_feed_load() else {
            panic!("expected a load command");
        };
        state.enter_login();
        assert!(!state.store.apply(FeedEvent::Loaded {
            generation,
            items: items(2),
        }));
        assert_eq!(state.screen, Screen::Login);
    }

    #[test]
    fn test_enter_login_resets_feed_view() {
        let mut state = loaded_state(12, 3);
        state.store.set_query("post");
        state.cursor = 10;
        state.grid_scroll = 2;
        state.select_focused();

        state.enter_login();

        assert!(state.store.items().is_empty());
        assert!(state.store.search_query().is_empty());
        assert!(state.store.selected().is_none());
        assert_eq!(state.cursor, 0);
        assert_eq!(state.grid_scroll, 0);
    }

    #[test]
    fn test_grid_helpers() {
        assert_eq!(grid_columns_for(20), 1);
        assert_eq!(grid_columns_for(60), 2);
        assert_eq!(grid_columns_for(125), 4);

        assert_eq!(scroll_for(0, 0, 3), 0);
        assert_eq!(scroll_for(5, 0, 3), 3);
        assert_eq!(scroll_for(1, 3, 3), 1);
        assert_eq!(scroll_for(4, 3, 3), 3);
        assert_eq!(scroll_for(2, 0, 0), 2);
    }
}
