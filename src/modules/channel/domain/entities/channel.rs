//! Channel entity and its relation mutators.
//!
//! Every mutator edits both sides of a relation in memory and records the
//! edit in the channel's pending [`ChannelChanges`]; the repository writes
//! exactly those edits on save. Related entities
//! are referenced by id, so a channel never holds another channel, video or
//! comment by value.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::modules::channel::domain::value_objects::{ChannelChanges, ReplyDeletion};
use crate::modules::comment::domain::Comment;
use crate::modules::video::domain::Video;
use crate::shared::domain::{ChannelId, CommentId, MemberId, VideoId};

/// A channel that has not been persisted yet. The id is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChannel {
    pub title: String,
    pub description: Option<String>,
    pub member_id: MemberId,
}

/// Relation sets of a channel as loaded from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelRelations {
    /// Channels this channel subscribes to (owning side of `subscription`)
    pub subscribed_channels: HashSet<ChannelId>,
    /// Channels subscribing to this one (inverse side, never written)
    pub subscribers: HashSet<ChannelId>,
    /// Owned; removing one deletes the video on save
    pub videos: HashSet<VideoId>,
    pub video_like_lists: HashSet<VideoId>,
    /// Owned; removing one deletes the comment on save
    pub comments: HashSet<CommentId>,
    pub comments_like_lists: HashSet<CommentId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    id: ChannelId,
    title: String,
    description: Option<String>,
    channel_image: Option<Vec<u8>>,
    member_id: MemberId,
    relations: ChannelRelations,
    changes: ChannelChanges,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Channel {
    /// Start a new channel owned by `member`. Title uniqueness and column
    /// lengths are enforced when the channel is persisted.
    pub fn create(
        title: impl Into<String>,
        description: Option<String>,
        member: MemberId,
    ) -> NewChannel {
        NewChannel {
            title: title.into(),
            description,
            member_id: member,
        }
    }

    /// Rebuild a persisted channel. Relations start empty; see [`Channel::with_relations`].
    pub fn restore(
        id: ChannelId,
        new: NewChannel,
        channel_image: Option<Vec<u8>>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            channel_image,
            member_id: new.member_id,
            relations: ChannelRelations::default(),
            changes: ChannelChanges::default(),
            created_at,
            updated_at,
        }
    }

    pub fn with_relations(mut self, relations: ChannelRelations) -> Self {
        self.relations = relations;
        self
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn id(&self) -> ChannelId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn channel_image(&self) -> Option<&[u8]> {
        self.channel_image.as_deref()
    }

    pub fn member_id(&self) -> MemberId {
        self.member_id
    }

    pub fn relations(&self) -> &ChannelRelations {
        &self.relations
    }

    /// Relation edits made since the channel was loaded
    pub fn pending_changes(&self) -> &ChannelChanges {
        &self.changes
    }

    pub fn subscribed_channels(&self) -> &HashSet<ChannelId> {
        &self.relations.subscribed_channels
    }

    pub fn subscribers(&self) -> &HashSet<ChannelId> {
        &self.relations.subscribers
    }

    pub fn videos(&self) -> &HashSet<VideoId> {
        &self.relations.videos
    }

    pub fn video_like_lists(&self) -> &HashSet<VideoId> {
        &self.relations.video_like_lists
    }

    pub fn comments(&self) -> &HashSet<CommentId> {
        &self.relations.comments
    }

    pub fn comments_like_lists(&self) -> &HashSet<CommentId> {
        &self.relations.comments_like_lists
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ---------------------------------------------------------------------
    // Attributes
    // ---------------------------------------------------------------------

    /// Overwrite each field given as `Some`; `None` leaves it unchanged.
    pub fn update(&mut self, title: Option<String>, description: Option<String>) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = Some(description);
        }
    }

    pub fn set_channel_image(&mut self, image: Option<Vec<u8>>) {
        self.channel_image = image;
    }

    // ---------------------------------------------------------------------
    // Subscriptions
    // ---------------------------------------------------------------------

    /// Make `subscriber` follow `target`, updating both sides.
    ///
    /// Returns `false` when nothing changed (already subscribed, or both
    /// arguments are the same channel).
    pub fn subscribe(subscriber: &mut Channel, target: &mut Channel) -> bool {
        if subscriber.id == target.id {
            return false;
        }
        let added = subscriber.relations.subscribed_channels.insert(target.id);
        target.relations.subscribers.insert(subscriber.id);
        if added {
            subscriber.changes.subscriptions.record_added(target.id);
        }
        added
    }

    /// Inverse of [`Channel::subscribe`].
    pub fn unsubscribe(subscriber: &mut Channel, target: &mut Channel) -> bool {
        if subscriber.id == target.id {
            return false;
        }
        let removed = subscriber.relations.subscribed_channels.remove(&target.id);
        target.relations.subscribers.remove(&subscriber.id);
        if removed {
            subscriber.changes.subscriptions.record_removed(target.id);
        }
        removed
    }

    pub fn is_subscribed_to(&self, target: ChannelId) -> bool {
        self.relations.subscribed_channels.contains(&target)
    }

    pub fn subscriber_count(&self) -> usize {
        self.relations.subscribers.len()
    }

    // ---------------------------------------------------------------------
    // Videos
    // ---------------------------------------------------------------------

    /// Take ownership of `video`. A video owned by another channel is moved
    /// here; that channel's loaded `videos` set is not touched.
    pub fn add_video(&mut self, video: &mut Video) {
        self.relations.videos.insert(video.id);
        if video.channel() != Some(self.id) {
            self.changes.videos.record_added(video.id);
        }
        video.set_channel(Some(self.id));
    }

    /// Drop `video` from this channel and clear its back-reference if it
    /// still points here. Saving the channel afterwards deletes the video.
    pub fn remove_video(&mut self, video: &mut Video) {
        if self.relations.videos.remove(&video.id) {
            self.changes.videos.record_removed(video.id);
        }
        if video.channel() == Some(self.id) {
            video.set_channel(None);
        }
    }

    pub fn like_video(&mut self, video: &mut Video) {
        if self.relations.video_like_lists.insert(video.id) {
            self.changes.video_likes.record_added(video.id);
        }
        video.add_like_channel(self.id);
    }

    pub fn un_like_video(&mut self, video: &mut Video) {
        if self.relations.video_like_lists.remove(&video.id) {
            self.changes.video_likes.record_removed(video.id);
        }
        video.remove_like_channel(self.id);
    }

    // ---------------------------------------------------------------------
    // Comments
    // ---------------------------------------------------------------------

    pub fn add_comment(&mut self, comment: &mut Comment) {
        self.relations.comments.insert(comment.id);
        if comment.channel() != Some(self.id) {
            self.changes.comments.record_added(comment.id);
        }
        comment.set_channel(Some(self.id));
    }

    /// Remove `comment` and its direct replies from `comments`.
    ///
    /// Same as `delete_comment_with(comment, ReplyDeletion::DirectReplies)`.
    pub fn delete_comment(&mut self, comment: &mut Comment) -> usize {
        self.delete_comment_with(comment, ReplyDeletion::DirectReplies)
    }

    /// Remove `comment` and the replies selected by `mode` from `comments`,
    /// clearing the back-reference of every removed comment authored here.
    /// Returns how many ids left the set.
    pub fn delete_comment_with(&mut self, comment: &mut Comment, mode: ReplyDeletion) -> usize {
        let mut removed = 0;

        for reply in comment.reply_comments_mut() {
            removed += self.detach_comment(reply);
            if mode == ReplyDeletion::WholeThread {
                removed += self.detach_thread(reply);
            }
        }

        removed + self.detach_comment(comment)
    }

    pub fn like_comment(&mut self, comment: &mut Comment) {
        if self.relations.comments_like_lists.insert(comment.id) {
            self.changes.comment_likes.record_added(comment.id);
        }
        comment.add_like(self.id);
    }

    pub fn un_like_comment(&mut self, comment: &mut Comment) {
        if self.relations.comments_like_lists.remove(&comment.id) {
            self.changes.comment_likes.record_removed(comment.id);
        }
        comment.remove_like(self.id);
    }

    fn detach_comment(&mut self, comment: &mut Comment) -> usize {
        let removed = self.relations.comments.remove(&comment.id);
        if removed {
            self.changes.comments.record_removed(comment.id);
        }
        if comment.channel() == Some(self.id) {
            comment.set_channel(None);
        }
        usize::from(removed)
    }

    fn detach_thread(&mut self, comment: &mut Comment) -> usize {
        let mut removed = 0;
        for reply in comment.reply_comments_mut() {
            removed += self.detach_comment(reply);
            removed += self.detach_thread(reply);
        }
        removed
    }
}
