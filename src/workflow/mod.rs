pub mod comment_flow;
pub mod media_ctx;

pub use comment_flow::{BatchOutcome, CommentFlow};
pub use media_ctx::MediaCtx;
