/// Diesel models for the video and video_like tables
use crate::schema::{video, video_like};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = video)]
#[diesel(primary_key(video_id))]
pub struct VideoModel {
    pub video_id: i64,
    pub channel_id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = video)]
pub struct NewVideoModel {
    pub channel_id: i64,
    pub title: String,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = video_like)]
pub struct VideoLikeModel {
    pub channel_id: i64,
    pub video_id: i64,
}
