use super::super::entities::channel::{Channel, NewChannel};
use crate::shared::domain::ChannelId;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Insert a new channel and return it with its assigned id
    async fn insert(&self, channel: &NewChannel) -> AppResult<Channel>;
    /// Load a channel with all relation sets filled in
    async fn find_by_id(&self, id: ChannelId) -> AppResult<Option<Channel>>;
    async fn find_by_ids(&self, ids: &[ChannelId]) -> AppResult<Vec<Channel>>;
    async fn find_by_title(&self, title: &str) -> AppResult<Option<Channel>>;
    async fn exists_by_title(&self, title: &str) -> AppResult<bool>;

    /// Write scalar fields and the channel's pending relation changes in one
    /// transaction, and return the reloaded channel with no pending changes.
    ///
    /// Only edits recorded since the channel was loaded are written: rows
    /// changed by others in the meantime are left alone. Videos and comments
    /// it removed are deleted while it still owns them. The `subscribers` set
    /// is never written (it belongs to the subscribing side).
    async fn save(&self, channel: &Channel) -> AppResult<Channel>;

    /// Delete the channel; rows that reference it are removed by cascade
    async fn delete(&self, id: ChannelId) -> AppResult<()>;

    async fn subscriber_count(&self, id: ChannelId) -> AppResult<i64>;
    /// Channels `id` subscribes to
    async fn find_subscribed_channels(&self, id: ChannelId) -> AppResult<Vec<Channel>>;
    /// Channels subscribing to `id`
    async fn find_subscribers(&self, id: ChannelId) -> AppResult<Vec<Channel>>;
}
