use crate::shared::domain::{ChannelId, CommentId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A comment with its reply thread loaded underneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub parent_id: Option<CommentId>,
    pub content: String,
    channel: Option<ChannelId>,
    reply_comments: Vec<Comment>,
    likes: HashSet<ChannelId>,
}

impl Comment {
    pub fn new(id: CommentId, channel: ChannelId, content: impl Into<String>) -> Self {
        Self {
            id,
            parent_id: None,
            content: content.into(),
            channel: Some(channel),
            reply_comments: Vec::new(),
            likes: HashSet::new(),
        }
    }

    /// Attach `reply` below this comment, fixing up its parent id.
    pub fn with_reply(mut self, mut reply: Comment) -> Self {
        reply.parent_id = Some(self.id);
        self.reply_comments.push(reply);
        self
    }

    pub fn with_likes(mut self, channels: impl IntoIterator<Item = ChannelId>) -> Self {
        self.likes.extend(channels);
        self
    }

    /// Authoring channel, `None` once detached.
    pub fn channel(&self) -> Option<ChannelId> {
        self.channel
    }

    pub fn set_channel(&mut self, channel: Option<ChannelId>) {
        self.channel = channel;
    }

    /// Direct replies only.
    pub fn reply_comments(&self) -> &[Comment] {
        &self.reply_comments
    }

    pub fn reply_comments_mut(&mut self) -> &mut [Comment] {
        &mut self.reply_comments
    }

    pub fn likes(&self) -> &HashSet<ChannelId> {
        &self.likes
    }

    pub fn add_like(&mut self, channel: ChannelId) -> bool {
        self.likes.insert(channel)
    }

    pub fn remove_like(&mut self, channel: ChannelId) -> bool {
        self.likes.remove(&channel)
    }
}
