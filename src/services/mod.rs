pub mod comment_resolver;

pub use comment_resolver::CommentResolver;
