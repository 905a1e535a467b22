use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;

use crate::{log_debug, log_warn};

use super::mapper::{self, RelationRows};
use crate::modules::channel::domain::{Channel, ChannelRepository, NewChannel, RelationDelta};
use crate::modules::channel::infrastructure::models::{ChannelModel, SubscriptionModel};
use crate::modules::comment::infrastructure::models::CommentLikeModel;
use crate::modules::video::infrastructure::models::VideoLikeModel;
use crate::schema::{channel, comment, comment_like, subscription, video, video_like};
use crate::shared::domain::ChannelId;
use crate::shared::infrastructure::DbConnection;
use crate::shared::utils::logger::{LogContext, TimedOperation};
use crate::shared::Database;
use crate::shared::{
    errors::{AppError, AppResult},
    utils::Validator,
};

pub struct ChannelRepositoryImpl {
    db: Arc<Database>,
}

impl ChannelRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ChannelRepository for ChannelRepositoryImpl {
    async fn insert(&self, new: &NewChannel) -> AppResult<Channel> {
        log_debug!("Repository inserting channel: {}", new.title);

        Validator::validate_channel(&new.title, new.description.as_deref())?;

        let db = Arc::clone(&self.db);
        let row = mapper::new_entity_to_model(new);

        let model = task::spawn_blocking(move || -> AppResult<ChannelModel> {
            let mut conn = db.get_connection()?;
            let model = diesel::insert_into(channel::table)
                .values(&row)
                .returning(ChannelModel::as_returning())
                .get_result::<ChannelModel>(&mut conn)?;
            Ok(model)
        })
        .await??;

        log_debug!(
            "Inserted channel: {} (ID: {})",
            model.title,
            model.channel_id
        );
        Ok(mapper::model_to_entity(model, Default::default()))
    }

    async fn find_by_id(&self, id: ChannelId) -> AppResult<Option<Channel>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Option<Channel>> {
            let mut conn = db.get_connection()?;

            let Some(model) = channel::table
                .find(id.value())
                .select(ChannelModel::as_select())
                .first::<ChannelModel>(&mut conn)
                .optional()?
            else {
                return Ok(None);
            };

            Ok(load_channels(&mut conn, vec![model])?.pop())
        })
        .await?
    }

    async fn find_by_ids(&self, ids: &[ChannelId]) -> AppResult<Vec<Channel>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let db = Arc::clone(&self.db);
        let ids: Vec<i64> = ids.iter().map(|id| id.value()).collect();

        task::spawn_blocking(move || -> AppResult<Vec<Channel>> {
            let mut conn = db.get_connection()?;
            let models = channel::table
                .filter(channel::channel_id.eq_any(ids))
                .order(channel::channel_id.asc())
                .select(ChannelModel::as_select())
                .load::<ChannelModel>(&mut conn)?;

            load_channels(&mut conn, models)
        })
        .await?
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Channel>> {
        let db = Arc::clone(&self.db);
        let title = title.to_string();

        task::spawn_blocking(move || -> AppResult<Option<Channel>> {
            let mut conn = db.get_connection()?;

            let Some(model) = channel::table
                .filter(channel::title.eq(&title))
                .select(ChannelModel::as_select())
                .first::<ChannelModel>(&mut conn)
                .optional()?
            else {
                return Ok(None);
            };

            Ok(load_channels(&mut conn, vec![model])?.pop())
        })
        .await?
    }

    async fn exists_by_title(&self, title: &str) -> AppResult<bool> {
        let db = Arc::clone(&self.db);
        let title = title.to_string();

        task::spawn_blocking(move || -> AppResult<bool> {
            let mut conn = db.get_connection()?;
            let exists = diesel::select(diesel::dsl::exists(
                channel::table.filter(channel::title.eq(&title)),
            ))
            .get_result::<bool>(&mut conn)?;
            Ok(exists)
        })
        .await?
    }

    async fn save(&self, entity: &Channel) -> AppResult<Channel> {
        log_debug!(
            "Repository saving channel: {} (ID: {})",
            entity.title(),
            entity.id()
        );

        Validator::validate_channel(entity.title(), entity.description())?;

        let db = Arc::clone(&self.db);
        let id = entity.id().value();
        let changeset = mapper::entity_to_changeset(entity);
        let changes = entity.pending_changes().clone();
        let timer = TimedOperation::new("channel_save");

        let saved = task::spawn_blocking(move || -> AppResult<Channel> {
            let mut conn = db.get_connection()?;

            conn.transaction::<Channel, AppError, _>(|conn| {
                let model = diesel::update(channel::table.find(id))
                    .set(&changeset)
                    .returning(ChannelModel::as_returning())
                    .get_result::<ChannelModel>(conn)
                    .optional()?
                    .ok_or_else(|| AppError::NotFound(format!("Channel {} not found", id)))?;

                apply_subscriptions(conn, id, &RawDelta::from(&changes.subscriptions))?;
                apply_owned_videos(conn, id, &RawDelta::from(&changes.videos))?;
                apply_owned_comments(conn, id, &RawDelta::from(&changes.comments))?;
                apply_video_likes(conn, id, &RawDelta::from(&changes.video_likes))?;
                apply_comment_likes(conn, id, &RawDelta::from(&changes.comment_likes))?;

                load_channels(conn, vec![model])?
                    .pop()
                    .ok_or_else(|| AppError::InternalError("Saved channel vanished".into()))
            })
        })
        .await??;

        timer.finish_with_info(&format!("channel {}", id));
        Ok(saved)
    }

    async fn delete(&self, id: ChannelId) -> AppResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;
            let deleted =
                diesel::delete(channel::table.find(id.value())).execute(&mut conn)?;

            if deleted == 0 {
                log_warn!("Attempted to delete missing channel {}", id);
                return Err(AppError::NotFound(format!("Channel {} not found", id)));
            }

            LogContext::db_operation("delete", "channel", None);
            Ok(())
        })
        .await?
    }

    async fn subscriber_count(&self, id: ChannelId) -> AppResult<i64> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<i64> {
            let mut conn = db.get_connection()?;
            let count = subscription::table
                .filter(subscription::subscriber_id.eq(id.value()))
                .count()
                .get_result::<i64>(&mut conn)?;
            Ok(count)
        })
        .await?
    }

    async fn find_subscribed_channels(&self, id: ChannelId) -> AppResult<Vec<Channel>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Vec<Channel>> {
            let mut conn = db.get_connection()?;
            let targets: Vec<i64> = subscription::table
                .filter(subscription::channel_id.eq(id.value()))
                .select(subscription::subscriber_id)
                .load(&mut conn)?;

            load_by_raw_ids(&mut conn, targets)
        })
        .await?
    }

    async fn find_subscribers(&self, id: ChannelId) -> AppResult<Vec<Channel>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Vec<Channel>> {
            let mut conn = db.get_connection()?;
            let followers: Vec<i64> = subscription::table
                .filter(subscription::subscriber_id.eq(id.value()))
                .select(subscription::channel_id)
                .load(&mut conn)?;

            load_by_raw_ids(&mut conn, followers)
        })
        .await?
    }
}

// -----------------------------------------------------------------------------
// Private helpers
// -----------------------------------------------------------------------------

/// A relation delta lowered to raw column values.
struct RawDelta {
    added: Vec<i64>,
    removed: Vec<i64>,
}

impl<T: Copy + Eq + Hash + Into<i64>> From<&RelationDelta<T>> for RawDelta {
    fn from(delta: &RelationDelta<T>) -> Self {
        Self {
            added: delta.added().iter().map(|id| (*id).into()).collect(),
            removed: delta.removed().iter().map(|id| (*id).into()).collect(),
        }
    }
}

fn load_by_raw_ids(conn: &mut DbConnection, ids: Vec<i64>) -> AppResult<Vec<Channel>> {
    if ids.is_empty() {
        return Ok(vec![]);
    }

    let models = channel::table
        .filter(channel::channel_id.eq_any(ids))
        .order(channel::title.asc())
        .select(ChannelModel::as_select())
        .load::<ChannelModel>(conn)?;

    load_channels(conn, models)
}

/// Attach relation sets to a batch of channel rows, keeping their order.
fn load_channels(conn: &mut DbConnection, models: Vec<ChannelModel>) -> AppResult<Vec<Channel>> {
    if models.is_empty() {
        return Ok(vec![]);
    }

    let ids: Vec<i64> = models.iter().map(|m| m.channel_id).collect();

    let rows = RelationRows {
        subscriptions: subscription::table
            .filter(
                subscription::channel_id
                    .eq_any(ids.clone())
                    .or(subscription::subscriber_id.eq_any(ids.clone())),
            )
            .select(SubscriptionModel::as_select())
            .load(conn)?,
        videos: video::table
            .filter(video::channel_id.eq_any(ids.clone()))
            .select((video::video_id, video::channel_id))
            .load(conn)?,
        video_likes: video_like::table
            .filter(video_like::channel_id.eq_any(ids.clone()))
            .select((video_like::channel_id, video_like::video_id))
            .load(conn)?,
        comments: comment::table
            .filter(comment::channel_id.eq_any(ids.clone()))
            .select((comment::comment_id, comment::channel_id))
            .load(conn)?,
        comment_likes: comment_like::table
            .filter(comment_like::channel_id.eq_any(ids.clone()))
            .select((comment_like::channel_id, comment_like::comment_id))
            .load(conn)?,
    };

    let mut grouped = mapper::group_relations(&ids, rows);

    Ok(models
        .into_iter()
        .map(|model| {
            let relations = grouped.remove(&model.channel_id).unwrap_or_default();
            mapper::model_to_entity(model, relations)
        })
        .collect())
}

/// Owning side only: rows where `channel_id` is this channel.
fn apply_subscriptions(conn: &mut DbConnection, id: i64, delta: &RawDelta) -> AppResult<()> {
    if !delta.removed.is_empty() {
        diesel::delete(
            subscription::table
                .filter(subscription::channel_id.eq(id))
                .filter(subscription::subscriber_id.eq_any(delta.removed.clone())),
        )
        .execute(conn)?;
    }
    if !delta.added.is_empty() {
        let rows: Vec<SubscriptionModel> = delta
            .added
            .iter()
            .map(|target| SubscriptionModel {
                channel_id: id,
                subscriber_id: *target,
            })
            .collect();
        diesel::insert_into(subscription::table)
            .values(&rows)
            .on_conflict_do_nothing()
            .execute(conn)?;
    }

    for target in &delta.removed {
        LogContext::relation_change("subscription", id, *target, false);
    }
    for target in &delta.added {
        LogContext::relation_change("subscription", id, *target, true);
    }
    Ok(())
}

/// Take over videos added to this channel, then delete the ones it removed
/// and still owns.
fn apply_owned_videos(conn: &mut DbConnection, id: i64, delta: &RawDelta) -> AppResult<()> {
    if !delta.added.is_empty() {
        let moved = diesel::update(video::table.filter(video::video_id.eq_any(delta.added.clone())))
            .set(video::channel_id.eq(id))
            .execute(conn)?;
        log_debug!("Moved {} video(s) to channel {}", moved, id);
    }

    if !delta.removed.is_empty() {
        let deleted = diesel::delete(
            video::table
                .filter(video::channel_id.eq(id))
                .filter(video::video_id.eq_any(delta.removed.clone())),
        )
        .execute(conn)?;
        log_debug!("Removed {} video(s) of channel {}", deleted, id);
    }
    Ok(())
}

/// Same as videos. Replies left out of the removal lose their parent
/// (`parent_id` is set to NULL) and stay stored.
fn apply_owned_comments(conn: &mut DbConnection, id: i64, delta: &RawDelta) -> AppResult<()> {
    if !delta.added.is_empty() {
        let moved =
            diesel::update(comment::table.filter(comment::comment_id.eq_any(delta.added.clone())))
                .set(comment::channel_id.eq(id))
                .execute(conn)?;
        log_debug!("Moved {} comment(s) to channel {}", moved, id);
    }

    if !delta.removed.is_empty() {
        let deleted = diesel::delete(
            comment::table
                .filter(comment::channel_id.eq(id))
                .filter(comment::comment_id.eq_any(delta.removed.clone())),
        )
        .execute(conn)?;
        log_debug!("Removed {} comment(s) of channel {}", deleted, id);
    }
    Ok(())
}

fn apply_video_likes(conn: &mut DbConnection, id: i64, delta: &RawDelta) -> AppResult<()> {
    if !delta.removed.is_empty() {
        diesel::delete(
            video_like::table
                .filter(video_like::channel_id.eq(id))
                .filter(video_like::video_id.eq_any(delta.removed.clone())),
        )
        .execute(conn)?;
    }
    if !delta.added.is_empty() {
        let rows: Vec<VideoLikeModel> = delta
            .added
            .iter()
            .map(|video_id| VideoLikeModel {
                channel_id: id,
                video_id: *video_id,
            })
            .collect();
        diesel::insert_into(video_like::table)
            .values(&rows)
            .on_conflict_do_nothing()
            .execute(conn)?;
    }
    Ok(())
}

fn apply_comment_likes(conn: &mut DbConnection, id: i64, delta: &RawDelta) -> AppResult<()> {
    if !delta.removed.is_empty() {
        diesel::delete(
            comment_like::table
                .filter(comment_like::channel_id.eq(id))
                .filter(comment_like::comment_id.eq_any(delta.removed.clone())),
        )
        .execute(conn)?;
    }
    if !delta.added.is_empty() {
        let rows: Vec<CommentLikeModel> = delta
            .added
            .iter()
            .map(|comment_id| CommentLikeModel {
                channel_id: id,
                comment_id: *comment_id,
            })
            .collect();
        diesel::insert_into(comment_like::table)
            .values(&rows)
            .on_conflict_do_nothing()
            .execute(conn)?;
    }
    Ok(())
}
