use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;

use super::models::VideoModel;
use crate::modules::video::domain::{Video, VideoRepository};
use crate::schema::{video, video_like};
use crate::shared::domain::{ChannelId, VideoId};
use crate::shared::errors::AppResult;
use crate::shared::Database;

pub struct VideoRepositoryImpl {
    db: Arc<Database>,
}

impl VideoRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VideoRepository for VideoRepositoryImpl {
    async fn find_by_id(&self, id: VideoId) -> AppResult<Option<Video>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Option<Video>> {
            let mut conn = db.get_connection()?;

            let Some(model) = video::table
                .find(id.value())
                .select(VideoModel::as_select())
                .first::<VideoModel>(&mut conn)
                .optional()?
            else {
                return Ok(None);
            };

            let likers: Vec<i64> = video_like::table
                .filter(video_like::video_id.eq(model.video_id))
                .select(video_like::channel_id)
                .load(&mut conn)?;

            let video = Video::new(
                VideoId(model.video_id),
                ChannelId(model.channel_id),
                model.title,
            )
            .with_like_channels(likers.into_iter().map(ChannelId));

            Ok(Some(video))
        })
        .await?
    }
}
