//! Feed loading, filtering and state

pub mod fetcher;
pub mod filter;
pub mod store;

pub use fetcher::{FeedCredentials, load_feed};
pub use filter::filter;
pub use store::{FeedEvent, FeedPhase, FeedStore, SKELETON_SLOTS};
