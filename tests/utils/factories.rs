/// Test data factories using builder pattern
///
/// Provides convenient methods to create test data with sensible defaults
use diesel::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use vidhub::modules::channel::NewChannel;
use vidhub::modules::comment::infrastructure::models::NewCommentModel;
use vidhub::modules::video::infrastructure::models::NewVideoModel;
use vidhub::schema::{comment, video};
use vidhub::shared::domain::{ChannelId, CommentId, MemberId, VideoId};

use super::db::PgPool;

static TITLE_COUNTER: AtomicU32 = AtomicU32::new(0);

pub struct ChannelFactory {
    title: String,
    description: Option<String>,
    member_id: MemberId,
}

impl Default for ChannelFactory {
    fn default() -> Self {
        let n = TITLE_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self {
            title: format!("channel-{}", n),
            description: Some("Test channel".to_string()),
            member_id: MemberId(1),
        }
    }
}

impl ChannelFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = description.map(str::to_string);
        self
    }

    pub fn with_member(mut self, member: i64) -> Self {
        self.member_id = MemberId(member);
        self
    }

    pub fn build(self) -> NewChannel {
        NewChannel {
            title: self.title,
            description: self.description,
            member_id: self.member_id,
        }
    }
}

/// Insert a video row owned by `channel`.
pub fn insert_video(pool: &PgPool, channel: ChannelId, title: &str) -> VideoId {
    let mut conn = pool.get().expect("Failed to get DB connection");
    let id = diesel::insert_into(video::table)
        .values(&NewVideoModel {
            channel_id: channel.value(),
            title: title.to_string(),
        })
        .returning(video::video_id)
        .get_result::<i64>(&mut conn)
        .expect("Failed to insert video");
    VideoId(id)
}

/// Insert a comment row authored by `channel`, optionally as a reply.
pub fn insert_comment(
    pool: &PgPool,
    channel: ChannelId,
    parent: Option<CommentId>,
    content: &str,
) -> CommentId {
    let mut conn = pool.get().expect("Failed to get DB connection");
    let id = diesel::insert_into(comment::table)
        .values(&NewCommentModel {
            channel_id: channel.value(),
            parent_id: parent.map(CommentId::value),
            content: content.to_string(),
        })
        .returning(comment::comment_id)
        .get_result::<i64>(&mut conn)
        .expect("Failed to insert comment");
    CommentId(id)
}
