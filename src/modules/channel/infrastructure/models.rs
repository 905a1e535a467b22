/// Diesel models for the channel and subscription tables
use crate::schema::{channel, subscription};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = channel)]
#[diesel(primary_key(channel_id))]
pub struct ChannelModel {
    pub channel_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub channel_image: Option<Vec<u8>>,
    pub member_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = channel)]
pub struct NewChannelModel {
    pub title: String,
    pub description: Option<String>,
    pub member_id: i64,
}

/// Full overwrite of the mutable columns; `None` clears the column.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = channel)]
#[diesel(treat_none_as_null = true)]
pub struct ChannelChangeset {
    pub title: String,
    pub description: Option<String>,
    pub channel_image: Option<Vec<u8>>,
    pub updated_at: DateTime<Utc>,
}

/// `channel_id` subscribes to `subscriber_id`.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = subscription)]
pub struct SubscriptionModel {
    pub channel_id: i64,
    pub subscriber_id: i64,
}
