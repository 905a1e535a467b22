//! Surrogate keys assigned by the storage layer.
//!
//! Related entities refer to each other only through these ids, which keeps
//! mutual references (subscriptions in particular) acyclic in memory and
//! finite when serialized.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn value(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Primary key of the `channel` table (`channel_id`).
    ChannelId
);
entity_id!(
    /// Id of the member that created a channel. Members live in the auth context.
    MemberId
);
entity_id!(VideoId);
entity_id!(CommentId);
