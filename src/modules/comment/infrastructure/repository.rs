use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;

use super::models::{CommentLikeModel, CommentModel};
use crate::modules::comment::domain::{Comment, CommentRepository};
use crate::schema::{comment, comment_like};
use crate::shared::domain::{ChannelId, CommentId};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::DbConnection;
use crate::shared::Database;

pub struct CommentRepositoryImpl {
    db: Arc<Database>,
}

impl CommentRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for CommentRepositoryImpl {
    async fn find_by_id(&self, id: CommentId) -> AppResult<Option<Comment>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Option<Comment>> {
            let mut conn = db.get_connection()?;

            let Some(root) = comment::table
                .find(id.value())
                .select(CommentModel::as_select())
                .first::<CommentModel>(&mut conn)
                .optional()?
            else {
                return Ok(None);
            };

            let thread = load_thread(&mut conn, root)?;
            Ok(Some(thread))
        })
        .await?
    }
}

// -----------------------------------------------------------------------------
// Private helpers
// -----------------------------------------------------------------------------

/// Load the reply thread under `root` level by level, then assemble it bottom-up.
fn load_thread(conn: &mut DbConnection, root: CommentModel) -> AppResult<Comment> {
    let mut models: Vec<CommentModel> = vec![root];
    let mut frontier: Vec<i64> = vec![models[0].comment_id];

    while !frontier.is_empty() {
        let children: Vec<CommentModel> = comment::table
            .filter(comment::parent_id.eq_any(frontier.clone()))
            .order(comment::created_at.asc())
            .select(CommentModel::as_select())
            .load(conn)?;

        frontier = children.iter().map(|c| c.comment_id).collect();
        models.extend(children);
    }

    let ids: Vec<i64> = models.iter().map(|m| m.comment_id).collect();
    let likes: Vec<CommentLikeModel> = comment_like::table
        .filter(comment_like::comment_id.eq_any(ids.clone()))
        .select(CommentLikeModel::as_select())
        .load(conn)?;

    let mut likes_by_comment: HashMap<i64, Vec<ChannelId>> = HashMap::new();
    for like in likes {
        likes_by_comment
            .entry(like.comment_id)
            .or_default()
            .push(ChannelId(like.channel_id));
    }

    let mut children_of: HashMap<i64, Vec<CommentModel>> = HashMap::new();
    let mut root_model = None;
    for model in models {
        match model.parent_id {
            Some(parent) if model.comment_id != ids[0] => {
                children_of.entry(parent).or_default().push(model)
            }
            _ => root_model = Some(model),
        }
    }

    // The root is always the first loaded row
    let root_model = root_model.ok_or_else(|| {
        AppError::InternalError("Comment thread lost its root".into())
    })?;

    Ok(assemble(root_model, &mut children_of, &mut likes_by_comment))
}

fn assemble(
    model: CommentModel,
    children_of: &mut HashMap<i64, Vec<CommentModel>>,
    likes_by_comment: &mut HashMap<i64, Vec<ChannelId>>,
) -> Comment {
    let mut node = Comment::new(
        CommentId(model.comment_id),
        ChannelId(model.channel_id),
        model.content,
    )
    .with_likes(likes_by_comment.remove(&model.comment_id).unwrap_or_default());

    for child in children_of.remove(&model.comment_id).unwrap_or_default() {
        node = node.with_reply(assemble(child, children_of, likes_by_comment));
    }

    node.parent_id = model.parent_id.map(CommentId);
    node
}
