mod ids;

pub use ids::{ChannelId, CommentId, MemberId, VideoId};
