pub mod value_objects;

pub use value_objects::{ChannelId, CommentId, MemberId, VideoId};
