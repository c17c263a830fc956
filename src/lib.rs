//! # feedgrid ▦
//!
//! A terminal viewer for an Instagram-style media feed.
//!
//! ## Overview
//!
//! feedgrid loads the media of one account in two steps (an index of ids,
//! then one detail request per id), shows the posts as a grid of cards with
//! a live caption search, and opens any post in a detail overlay with its
//! full caption, permalink and image. Posts can be handed to the system
//! share/open handler. An optional auth API adds login and signup screens.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          App                                │
//! │   Sync event loop, screens, overlay, forms, async worker    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │      Feed       │ │       API       │ │      Auth       │
//! │                 │ │                 │ │                 │
//! │ • Fetcher       │ │ • FeedSource    │ │ • Login/Signup  │
//! │ • Filter        │ │ • Graph client  │ │ • Validation    │
//! │ • Store         │ │ • Wire schema   │ │ • Cookie session│
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!          │                   │                   │
//!          └───────────────────┴───────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Config      │ │      Share      │ │     Images      │
//! │                 │ │                 │ │                 │
//! │ • TOML + env    │ │ • Capability    │ │ • Download      │
//! │ • Theme         │ │ • Fallback      │ │ • LRU cache     │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`]: `FeedSource` trait and the Graph API client
//! - [`app`]: TUI application state and event loop
//! - [`auth`]: Login, signup and logout against the auth API
//! - [`config`]: Configuration management
//! - [`error`]: Feed error type
//! - [`feed`]: Feed loading, filtering and state
//! - [`images`]: Overlay image download and caching
//! - [`models`]: Media item and wire schema
//! - [`share`]: Share capability with fallback
//! - [`theme`]: Theme support via ratatui-themes
//!
//! ## Example
//!
//! ```no_run
//! use feedgrid::app;
//!
//! fn main() -> anyhow::Result<()> {
//!     app::run()
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/feedgrid/0.1.0")]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::if_not_else)]
#![allow(clippy::single_match_else)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::use_self)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::similar_names)]
#![allow(clippy::manual_let_else)]
#![allow(clippy::return_self_not_must_use)]

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod feed;
pub mod images;
pub mod models;
pub mod paths;
pub mod share;
pub mod theme;

// Re-export main types for convenience
pub use app::AppState;
pub use config::Config;
pub use error::FeedError;
pub use feed::{FeedCredentials, FeedPhase, FeedStore};
pub use models::MediaItem;
pub use theme::{Theme, ThemeColors};

// Re-export theme types from ratatui-themes crate
pub use ratatui_themes::{ThemeName, ThemePalette};

/// ASCII logo for the application
pub const LOGO: &str = r"
  __               _             _     _
 / _| ___  ___  __| | __ _ _ __ (_) __| |
| |_ / _ \/ _ \/ _` |/ _` | '__|| |/ _` |
|  _|  __/  __/ (_| | (_| | |   | | (_| |
|_|  \___|\___|\__,_|\__, |_|   |_|\__,_|
                     |___/
";

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
