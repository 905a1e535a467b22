pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::dto::{ChannelResponse, ChannelSummary};
pub use application::service::ChannelService;
pub use domain::{
    Channel, ChannelChanges, ChannelRelations, ChannelRepository, NewChannel, ReplyDeletion,
};
pub use infrastructure::persistence::ChannelRepositoryImpl;
