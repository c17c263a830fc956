//! Data models for feedgrid

mod media;
pub mod schema;

pub use media::MediaItem;
pub use schema::{MediaDetail, MediaIndex, MediaRef};
