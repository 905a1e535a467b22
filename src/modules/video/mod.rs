//! Videos as seen from the channel context.
//!
//! Only the side of the video that participates in channel relations lives
//! here: the owning channel back-reference and the set of liking channels.
pub mod domain;
pub mod infrastructure;

pub use domain::{Video, VideoRepository};
pub use infrastructure::VideoRepositoryImpl;
