pub mod entities;
pub mod repositories;
pub mod value_objects;

// Re-exports for easy access
pub use entities::channel::{Channel, ChannelRelations, NewChannel};
pub use repositories::channel_repository::ChannelRepository;
pub use value_objects::{ChannelChanges, RelationDelta, ReplyDeletion};
