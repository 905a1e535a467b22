pub mod modules;
pub mod schema;
pub mod shared;

use modules::{
    channel::{ChannelRepository, ChannelRepositoryImpl, ChannelService},
    comment::{CommentRepository, CommentRepositoryImpl},
    video::{VideoRepository, VideoRepositoryImpl},
};
use shared::errors::AppResult;
use shared::utils::logger::init_logger;
use shared::{AppConfig, Database};
use std::sync::Arc;

/// Everything a host needs to serve channel use cases.
pub struct AppContext {
    pub config: AppConfig,
    pub database: Arc<Database>,
    pub channel_service: Arc<ChannelService>,
}

/// Load configuration, initialise logging, connect, migrate and wire services.
pub fn bootstrap() -> AppResult<AppContext> {
    let config = AppConfig::from_env()?;
    init_logger(config.log_level);

    let database = Arc::new(Database::new(&config.database)?);
    database.run_migrations()?;

    let channel_service = Arc::new(build_channel_service(
        Arc::clone(&database),
        &config,
    ));

    log_info!(
        "Channel service ready (reply deletion: {})",
        config.reply_deletion
    );

    Ok(AppContext {
        config,
        database,
        channel_service,
    })
}

/// Wire the diesel-backed repositories into a [`ChannelService`].
pub fn build_channel_service(database: Arc<Database>, config: &AppConfig) -> ChannelService {
    let channel_repo: Arc<dyn ChannelRepository> =
        Arc::new(ChannelRepositoryImpl::new(Arc::clone(&database)));
    let video_repo: Arc<dyn VideoRepository> =
        Arc::new(VideoRepositoryImpl::new(Arc::clone(&database)));
    let comment_repo: Arc<dyn CommentRepository> =
        Arc::new(CommentRepositoryImpl::new(Arc::clone(&database)));

    ChannelService::new(channel_repo, video_repo, comment_repo)
        .with_reply_deletion(config.reply_deletion)
}

/// Bring the schema up to date and report pool status.
pub fn run() -> AppResult<()> {
    let context = bootstrap()?;
    let status = context.database.pool_status();

    log_info!(
        "Database ready: {} connection(s) open, {} idle, max {}",
        status.connections,
        status.idle_connections,
        status.max_size
    );
    Ok(())
}
