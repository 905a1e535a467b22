/// Conversions between channel rows and the channel entity
///
/// Relation rows are fetched in bulk for a batch of channels and grouped here,
/// so the repository never issues per-channel queries.
use chrono::Utc;
use std::collections::{HashMap, HashSet};

use crate::modules::channel::domain::{Channel, ChannelRelations, NewChannel};
use crate::modules::channel::infrastructure::models::{
    ChannelChangeset, ChannelModel, NewChannelModel, SubscriptionModel,
};
use crate::shared::domain::{ChannelId, CommentId, MemberId, VideoId};

/// Rows of every relation touching a batch of channels.
#[derive(Debug, Default)]
pub struct RelationRows {
    pub subscriptions: Vec<SubscriptionModel>,
    /// `(video_id, channel_id)` of owned videos
    pub videos: Vec<(i64, i64)>,
    /// `(channel_id, video_id)`
    pub video_likes: Vec<(i64, i64)>,
    /// `(comment_id, channel_id)` of authored comments
    pub comments: Vec<(i64, i64)>,
    /// `(channel_id, comment_id)`
    pub comment_likes: Vec<(i64, i64)>,
}

pub fn model_to_entity(model: ChannelModel, relations: ChannelRelations) -> Channel {
    Channel::restore(
        ChannelId(model.channel_id),
        NewChannel {
            title: model.title,
            description: model.description,
            member_id: MemberId(model.member_id),
        },
        model.channel_image,
        model.created_at,
        model.updated_at,
    )
    .with_relations(relations)
}

pub fn new_entity_to_model(channel: &NewChannel) -> NewChannelModel {
    NewChannelModel {
        title: channel.title.clone(),
        description: channel.description.clone(),
        member_id: channel.member_id.value(),
    }
}

pub fn entity_to_changeset(channel: &Channel) -> ChannelChangeset {
    ChannelChangeset {
        title: channel.title().to_string(),
        description: channel.description().map(str::to_string),
        channel_image: channel.channel_image().map(<[u8]>::to_vec),
        updated_at: Utc::now(),
    }
}

/// Distribute relation rows over the channels in `ids`. Every id gets an
/// entry, even one without any relation rows.
pub fn group_relations(ids: &[i64], rows: RelationRows) -> HashMap<i64, ChannelRelations> {
    let wanted: HashSet<i64> = ids.iter().copied().collect();
    let mut grouped: HashMap<i64, ChannelRelations> = ids
        .iter()
        .map(|id| (*id, ChannelRelations::default()))
        .collect();

    for sub in rows.subscriptions {
        if wanted.contains(&sub.channel_id) {
            if let Some(rel) = grouped.get_mut(&sub.channel_id) {
                rel.subscribed_channels.insert(ChannelId(sub.subscriber_id));
            }
        }
        if wanted.contains(&sub.subscriber_id) {
            if let Some(rel) = grouped.get_mut(&sub.subscriber_id) {
                rel.subscribers.insert(ChannelId(sub.channel_id));
            }
        }
    }

    for (video_id, channel_id) in rows.videos {
        if let Some(rel) = grouped.get_mut(&channel_id) {
            rel.videos.insert(VideoId(video_id));
        }
    }
    for (channel_id, video_id) in rows.video_likes {
        if let Some(rel) = grouped.get_mut(&channel_id) {
            rel.video_like_lists.insert(VideoId(video_id));
        }
    }
    for (comment_id, channel_id) in rows.comments {
        if let Some(rel) = grouped.get_mut(&channel_id) {
            rel.comments.insert(CommentId(comment_id));
        }
    }
    for (channel_id, comment_id) in rows.comment_likes {
        if let Some(rel) = grouped.get_mut(&channel_id) {
            rel.comments_like_lists.insert(CommentId(comment_id));
        }
    }

    grouped
}
