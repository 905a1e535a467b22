pub mod channel_repository_impl;
pub mod mapper;

pub use channel_repository_impl::ChannelRepositoryImpl;
