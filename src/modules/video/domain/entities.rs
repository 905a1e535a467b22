use crate::shared::domain::{ChannelId, VideoId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    channel: Option<ChannelId>,
    like_channels: HashSet<ChannelId>,
}

impl Video {
    pub fn new(id: VideoId, channel: ChannelId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            channel: Some(channel),
            like_channels: HashSet::new(),
        }
    }

    pub fn with_like_channels(mut self, channels: impl IntoIterator<Item = ChannelId>) -> Self {
        self.like_channels.extend(channels);
        self
    }

    /// Owning channel, `None` once detached from its channel.
    pub fn channel(&self) -> Option<ChannelId> {
        self.channel
    }

    pub fn set_channel(&mut self, channel: Option<ChannelId>) {
        self.channel = channel;
    }

    pub fn like_channels(&self) -> &HashSet<ChannelId> {
        &self.like_channels
    }

    pub fn is_liked_by(&self, channel: ChannelId) -> bool {
        self.like_channels.contains(&channel)
    }

    pub fn like_count(&self) -> usize {
        self.like_channels.len()
    }

    pub fn add_like_channel(&mut self, channel: ChannelId) -> bool {
        self.like_channels.insert(channel)
    }

    pub fn remove_like_channel(&mut self, channel: ChannelId) -> bool {
        self.like_channels.remove(&channel)
    }
}
