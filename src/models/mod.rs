pub mod media;
pub mod tag_batch;

pub use media::{Caption, Comment, Likes, Media};
pub use tag_batch::{partition, TagBatch};
