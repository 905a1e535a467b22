/// Test helper functions and service builders
use super::db::{acquire_test_lock, clean_test_db, test_db_pool, PgPool};
use std::sync::{Arc, MutexGuard};
use vidhub::modules::channel::{ChannelRepository, ChannelRepositoryImpl, ChannelService, ReplyDeletion};
use vidhub::modules::comment::{CommentRepository, CommentRepositoryImpl};
use vidhub::modules::video::{VideoRepository, VideoRepositoryImpl};
use vidhub::shared::Database;

pub struct TestServices {
    pub pool: Arc<PgPool>,
    pub channel_service: ChannelService,
    pub channel_repository: Arc<dyn ChannelRepository>,
    pub video_repository: Arc<dyn VideoRepository>,
    pub comment_repository: Arc<dyn CommentRepository>,
    _guard: MutexGuard<'static, ()>,
}

/// Lock, clean and wire the database-backed services.
///
/// Returns `None` (and the test should return early) when no test database
/// is configured.
pub fn setup(mode: ReplyDeletion) -> Option<TestServices> {
    let guard = acquire_test_lock();
    let Some(pool) = test_db_pool() else {
        eprintln!("TEST_DATABASE_URL not set, skipping database test");
        return None;
    };
    clean_test_db(&pool);

    // Use the singleton test pool instead of creating a new Database
    let db = Arc::new(Database::from_pool((*pool).clone()));

    let channel_repository: Arc<dyn ChannelRepository> =
        Arc::new(ChannelRepositoryImpl::new(db.clone()));
    let video_repository: Arc<dyn VideoRepository> = Arc::new(VideoRepositoryImpl::new(db.clone()));
    let comment_repository: Arc<dyn CommentRepository> =
        Arc::new(CommentRepositoryImpl::new(db.clone()));

    let channel_service = ChannelService::new(
        channel_repository.clone(),
        video_repository.clone(),
        comment_repository.clone(),
    )
    .with_reply_deletion(mode);

    Some(TestServices {
        pool,
        channel_service,
        channel_repository,
        video_repository,
        comment_repository,
        _guard: guard,
    })
}
