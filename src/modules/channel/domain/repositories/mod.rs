pub mod channel_repository;
