use serde::{Deserialize, Serialize};

/// How far `Channel::delete_comment` reaches into a comment's reply thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyDeletion {
    /// The comment and its direct replies; replies of replies stay in the set.
    #[default]
    DirectReplies,
    /// The comment and every reply below it.
    WholeThread,
}

impl std::fmt::Display for ReplyDeletion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplyDeletion::DirectReplies => write!(f, "direct"),
            ReplyDeletion::WholeThread => write!(f, "thread"),
        }
    }
}

impl std::str::FromStr for ReplyDeletion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" | "direct_replies" => Ok(ReplyDeletion::DirectReplies),
            "thread" | "whole_thread" => Ok(ReplyDeletion::WholeThread),
            _ => Err(format!("Invalid reply deletion mode: {}", s)),
        }
    }
}
