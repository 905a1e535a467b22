pub mod relation_changes;
pub mod reply_deletion;

pub use relation_changes::{ChannelChanges, RelationDelta};
pub use reply_deletion::ReplyDeletion;
