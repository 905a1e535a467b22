use super::dto::{ChannelResponse, ChannelSummary};
use crate::modules::channel::domain::{Channel, ChannelRepository, ReplyDeletion};
use crate::modules::comment::domain::{Comment, CommentRepository};
use crate::modules::video::domain::{Video, VideoRepository};
use crate::shared::domain::{ChannelId, CommentId, MemberId, VideoId};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use crate::{log_debug, log_info};
use std::sync::Arc;

/// Channel use cases: load, mutate in memory, save in one unit of work.
pub struct ChannelService {
    channel_repo: Arc<dyn ChannelRepository>,
    video_repo: Arc<dyn VideoRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    reply_deletion: ReplyDeletion,
}

impl ChannelService {
    pub fn new(
        channel_repo: Arc<dyn ChannelRepository>,
        video_repo: Arc<dyn VideoRepository>,
        comment_repo: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            channel_repo,
            video_repo,
            comment_repo,
            reply_deletion: ReplyDeletion::default(),
        }
    }

    pub fn with_reply_deletion(mut self, mode: ReplyDeletion) -> Self {
        self.reply_deletion = mode;
        self
    }

    pub fn reply_deletion(&self) -> ReplyDeletion {
        self.reply_deletion
    }

    pub async fn create_channel(
        &self,
        title: String,
        description: Option<String>,
        member: MemberId,
    ) -> AppResult<ChannelResponse> {
        Validator::validate_channel(&title, description.as_deref())?;

        if self.channel_repo.exists_by_title(&title).await? {
            return Err(AppError::constraint(
                "title",
                format!("Channel with title '{}' already exists", title),
            ));
        }

        let created = self
            .channel_repo
            .insert(&Channel::create(title, description, member))
            .await?;

        log_info!(
            "Created channel '{}' (ID: {}) for member {}",
            created.title(),
            created.id(),
            member
        );
        Ok(ChannelResponse::from(created))
    }

    pub async fn get_channel(&self, id: ChannelId) -> AppResult<ChannelResponse> {
        let channel = self.load_channel(id).await?;
        Ok(ChannelResponse::from(channel))
    }

    pub async fn update_channel(
        &self,
        id: ChannelId,
        title: Option<String>,
        description: Option<String>,
    ) -> AppResult<ChannelResponse> {
        let mut channel = self.load_channel(id).await?;

        if let Some(new_title) = &title {
            Validator::validate_channel_title(new_title)?;

            // Another channel may already use this title
            if let Some(existing) = self.channel_repo.find_by_title(new_title).await? {
                if existing.id() != id {
                    return Err(AppError::constraint(
                        "title",
                        format!("Channel with title '{}' already exists", new_title),
                    ));
                }
            }
        }

        channel.update(title, description);
        let saved = self.channel_repo.save(&channel).await?;

        Ok(ChannelResponse::from(saved))
    }

    pub async fn set_channel_image(
        &self,
        id: ChannelId,
        image: Option<Vec<u8>>,
    ) -> AppResult<ChannelResponse> {
        let mut channel = self.load_channel(id).await?;
        log_debug!(
            "Setting image of channel {} ({} bytes)",
            id,
            image.as_ref().map_or(0, Vec::len)
        );

        channel.set_channel_image(image);
        let saved = self.channel_repo.save(&channel).await?;

        Ok(ChannelResponse::from(saved))
    }

    pub async fn delete_channel(&self, id: ChannelId) -> AppResult<()> {
        self.channel_repo.delete(id).await?;
        log_info!("Deleted channel {}", id);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Subscriptions
    // ---------------------------------------------------------------------

    /// Returns whether a new subscription was recorded.
    pub async fn subscribe(&self, subscriber: ChannelId, target: ChannelId) -> AppResult<bool> {
        let (mut from, mut to) = self.load_pair(subscriber, target).await?;

        if !Channel::subscribe(&mut from, &mut to) {
            return Ok(false);
        }

        self.channel_repo.save(&from).await?;
        Ok(true)
    }

    /// Returns whether an existing subscription was removed.
    pub async fn unsubscribe(&self, subscriber: ChannelId, target: ChannelId) -> AppResult<bool> {
        let (mut from, mut to) = self.load_pair(subscriber, target).await?;

        if !Channel::unsubscribe(&mut from, &mut to) {
            return Ok(false);
        }

        self.channel_repo.save(&from).await?;
        Ok(true)
    }

    pub async fn subscriptions_of(&self, id: ChannelId) -> AppResult<Vec<ChannelSummary>> {
        self.ensure_exists(id).await?;
        let channels = self.channel_repo.find_subscribed_channels(id).await?;
        Ok(channels.iter().map(ChannelSummary::from).collect())
    }

    pub async fn subscribers_of(&self, id: ChannelId) -> AppResult<Vec<ChannelSummary>> {
        self.ensure_exists(id).await?;
        let channels = self.channel_repo.find_subscribers(id).await?;
        Ok(channels.iter().map(ChannelSummary::from).collect())
    }

    // ---------------------------------------------------------------------
    // Videos
    // ---------------------------------------------------------------------

    pub async fn add_video(&self, id: ChannelId, video_id: VideoId) -> AppResult<ChannelResponse> {
        let mut channel = self.load_channel(id).await?;
        let mut video = self.load_video(video_id).await?;

        if let Some(previous) = video.channel().filter(|owner| *owner != id) {
            log_debug!("Moving video {} from channel {} to {}", video_id, previous, id);
        }

        channel.add_video(&mut video);
        self.save(&channel).await
    }

    /// Removing a video from its channel deletes it.
    pub async fn remove_video(
        &self,
        id: ChannelId,
        video_id: VideoId,
    ) -> AppResult<ChannelResponse> {
        let mut channel = self.load_channel(id).await?;
        let mut video = self.load_video(video_id).await?;

        channel.remove_video(&mut video);
        self.save(&channel).await
    }

    pub async fn like_video(&self, id: ChannelId, video_id: VideoId) -> AppResult<ChannelResponse> {
        let mut channel = self.load_channel(id).await?;
        let mut video = self.load_video(video_id).await?;

        channel.like_video(&mut video);
        self.save(&channel).await
    }

    pub async fn unlike_video(
        &self,
        id: ChannelId,
        video_id: VideoId,
    ) -> AppResult<ChannelResponse> {
        let mut channel = self.load_channel(id).await?;
        let mut video = self.load_video(video_id).await?;

        channel.un_like_video(&mut video);
        self.save(&channel).await
    }

    // ---------------------------------------------------------------------
    // Comments
    // ---------------------------------------------------------------------

    pub async fn add_comment(
        &self,
        id: ChannelId,
        comment_id: CommentId,
    ) -> AppResult<ChannelResponse> {
        let mut channel = self.load_channel(id).await?;
        let mut comment = self.load_comment(comment_id).await?;

        channel.add_comment(&mut comment);
        self.save(&channel).await
    }

    /// Delete a comment authored by `id` together with the replies selected
    /// by the configured [`ReplyDeletion`]. Replies left behind stay stored
    /// as top-level comments.
    pub async fn delete_comment(
        &self,
        id: ChannelId,
        comment_id: CommentId,
    ) -> AppResult<ChannelResponse> {
        let mut channel = self.load_channel(id).await?;
        let mut comment = self.load_comment(comment_id).await?;

        if !channel.comments().contains(&comment_id) {
            return Err(AppError::InvalidInput(format!(
                "Comment {} was not written by channel {}",
                comment_id, id
            )));
        }

        let removed = channel.delete_comment_with(&mut comment, self.reply_deletion);
        log_debug!(
            "Deleting comment {} of channel {} ({} comment(s) detached, mode: {})",
            comment_id,
            id,
            removed,
            self.reply_deletion
        );

        self.save(&channel).await
    }

    pub async fn like_comment(
        &self,
        id: ChannelId,
        comment_id: CommentId,
    ) -> AppResult<ChannelResponse> {
        let mut channel = self.load_channel(id).await?;
        let mut comment = self.load_comment(comment_id).await?;

        channel.like_comment(&mut comment);
        self.save(&channel).await
    }

    pub async fn unlike_comment(
        &self,
        id: ChannelId,
        comment_id: CommentId,
    ) -> AppResult<ChannelResponse> {
        let mut channel = self.load_channel(id).await?;
        let mut comment = self.load_comment(comment_id).await?;

        channel.un_like_comment(&mut comment);
        self.save(&channel).await
    }

    // ---------------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------------

    async fn save(&self, channel: &Channel) -> AppResult<ChannelResponse> {
        let saved = self.channel_repo.save(channel).await?;
        Ok(ChannelResponse::from(saved))
    }

    async fn load_channel(&self, id: ChannelId) -> AppResult<Channel> {
        self.channel_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Channel with ID {} not found", id)))
    }

    async fn ensure_exists(&self, id: ChannelId) -> AppResult<()> {
        self.load_channel(id).await.map(|_| ())
    }

    async fn load_pair(
        &self,
        subscriber: ChannelId,
        target: ChannelId,
    ) -> AppResult<(Channel, Channel)> {
        if subscriber == target {
            return Err(AppError::InvalidInput(format!(
                "Channel {} cannot subscribe to itself",
                subscriber
            )));
        }

        let from = self.load_channel(subscriber).await?;
        let to = self.load_channel(target).await?;
        Ok((from, to))
    }

    async fn load_video(&self, id: VideoId) -> AppResult<Video> {
        self.video_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Video with ID {} not found", id)))
    }

    async fn load_comment(&self, id: CommentId) -> AppResult<Comment> {
        self.comment_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment with ID {} not found", id)))
    }
}
