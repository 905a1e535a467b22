pub mod entities;
pub mod repository;

pub use entities::Video;
pub use repository::VideoRepository;
