use std::collections::HashSet;
use std::hash::Hash;

use crate::shared::domain::{ChannelId, CommentId, VideoId};

/// Ids linked and unlinked on one relation since the channel was loaded.
///
/// A link followed by an unlink of the same id (or the reverse) cancels out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDelta<T: Eq + Hash> {
    added: HashSet<T>,
    removed: HashSet<T>,
}

impl<T: Copy + Eq + Hash> Default for RelationDelta<T> {
    fn default() -> Self {
        Self {
            added: HashSet::new(),
            removed: HashSet::new(),
        }
    }
}

impl<T: Copy + Eq + Hash> RelationDelta<T> {
    pub fn record_added(&mut self, id: T) {
        if !self.removed.remove(&id) {
            self.added.insert(id);
        }
    }

    pub fn record_removed(&mut self, id: T) {
        if !self.added.remove(&id) {
            self.removed.insert(id);
        }
    }

    pub fn added(&self) -> &HashSet<T> {
        &self.added
    }

    pub fn removed(&self) -> &HashSet<T> {
        &self.removed
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Pending relation edits of a channel, written by the next save.
///
/// `subscribers` has no entry: it is the inverse side and never written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelChanges {
    pub subscriptions: RelationDelta<ChannelId>,
    pub videos: RelationDelta<VideoId>,
    pub video_likes: RelationDelta<VideoId>,
    pub comments: RelationDelta<CommentId>,
    pub comment_likes: RelationDelta<CommentId>,
}

impl ChannelChanges {
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
            && self.videos.is_empty()
            && self.video_likes.is_empty()
            && self.comments.is_empty()
            && self.comment_likes.is_empty()
    }
}
