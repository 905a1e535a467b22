/// Diesel models for the comment and comment_like tables
use crate::schema::{comment, comment_like};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = comment)]
#[diesel(primary_key(comment_id))]
pub struct CommentModel {
    pub comment_id: i64,
    pub channel_id: i64,
    pub parent_id: Option<i64>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = comment)]
pub struct NewCommentModel {
    pub channel_id: i64,
    pub parent_id: Option<i64>,
    pub content: String,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = comment_like)]
pub struct CommentLikeModel {
    pub channel_id: i64,
    pub comment_id: i64,
}
