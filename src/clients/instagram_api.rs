//! Instagram API 能力接口
//!
//! 核心逻辑只依赖这个 trait，不关心认证和 HTTP 细节

use crate::error::ApiError;
use crate::models::{Comment, Media};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// 外部 API 能力
///
/// 实现需要支持并发调用（多个媒体任务共享同一个客户端）
#[async_trait]
pub trait InstagramApi: Send + Sync {
    /// 获取当前账号在 `since` 之后发布的媒体
    async fn recent_media(&self, since: DateTime<Utc>) -> Result<Vec<Media>, ApiError>;

    /// 获取单个媒体（包括标题和点赞数）
    async fn get_media(&self, media_id: &str) -> Result<Media, ApiError>;

    /// 发布评论，平台不返回评论 ID
    async fn add_comment(&self, media_id: &str, text: &str) -> Result<(), ApiError>;

    /// 列出媒体上的所有评论
    async fn list_comments(&self, media_id: &str) -> Result<Vec<Comment>, ApiError>;

    /// 删除评论
    async fn delete_comment(&self, media_id: &str, comment_id: &str) -> Result<(), ApiError>;
}
