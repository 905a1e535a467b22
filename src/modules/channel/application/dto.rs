use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::modules::channel::domain::Channel;
use crate::shared::domain::{ChannelId, CommentId, MemberId, VideoId};

/// Channel payload for API consumers.
///
/// Related channels, videos and comments appear as ids only, so two channels
/// subscribed to each other still serialize to finite documents. Id lists are
/// sorted to keep the output stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelResponse {
    pub id: ChannelId,
    pub title: String,
    pub description: Option<String>,
    pub member_id: MemberId,
    pub has_channel_image: bool,
    pub subscribed_channels: Vec<ChannelId>,
    pub subscribers: Vec<ChannelId>,
    pub videos: Vec<VideoId>,
    pub video_like_lists: Vec<VideoId>,
    pub comments: Vec<CommentId>,
    pub comments_like_lists: Vec<CommentId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact row used when listing subscriptions or subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummary {
    pub id: ChannelId,
    pub title: String,
    pub subscriber_count: usize,
}

fn sorted<T: Copy + Ord>(set: &HashSet<T>) -> Vec<T> {
    let mut ids: Vec<T> = set.iter().copied().collect();
    ids.sort_unstable();
    ids
}

impl From<&Channel> for ChannelResponse {
    fn from(channel: &Channel) -> Self {
        Self {
            id: channel.id(),
            title: channel.title().to_string(),
            description: channel.description().map(str::to_string),
            member_id: channel.member_id(),
            has_channel_image: channel.channel_image().is_some(),
            subscribed_channels: sorted(channel.subscribed_channels()),
            subscribers: sorted(channel.subscribers()),
            videos: sorted(channel.videos()),
            video_like_lists: sorted(channel.video_like_lists()),
            comments: sorted(channel.comments()),
            comments_like_lists: sorted(channel.comments_like_lists()),
            created_at: channel.created_at(),
            updated_at: channel.updated_at(),
        }
    }
}

impl From<Channel> for ChannelResponse {
    fn from(channel: Channel) -> Self {
        Self::from(&channel)
    }
}

impl From<&Channel> for ChannelSummary {
    fn from(channel: &Channel) -> Self {
        Self {
            id: channel.id(),
            title: channel.title().to_string(),
            subscriber_count: channel.subscriber_count(),
        }
    }
}
