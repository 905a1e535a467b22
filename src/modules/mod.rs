pub mod channel;
pub mod comment;
pub mod video;
