use super::entities::Comment;
use crate::shared::domain::CommentId;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Load a comment with its likes and full reply thread
    async fn find_by_id(&self, id: CommentId) -> AppResult<Option<Comment>>;
}
