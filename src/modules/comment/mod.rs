//! Comments as seen from the channel context: author back-reference, likes
//! and the reply thread below a comment.
pub mod domain;
pub mod infrastructure;

pub use domain::{Comment, CommentRepository};
pub use infrastructure::CommentRepositoryImpl;
