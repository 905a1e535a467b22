pub mod dto;
pub mod service;

pub use dto::{ChannelResponse, ChannelSummary};
pub use service::ChannelService;
