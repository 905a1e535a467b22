use super::entities::Video;
use crate::shared::domain::VideoId;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Read access to videos for the channel use cases.
///
/// Writes to `video.channel_id` and `video_like` go through the channel
/// repository, which owns both relations.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Load a video together with the channels that like it
    async fn find_by_id(&self, id: VideoId) -> AppResult<Option<Video>>;
}
