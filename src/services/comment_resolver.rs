//! 评论 ID 解析服务 - 业务能力层
//!
//! 发布评论的接口不返回 ID，只能回读评论列表按正文找回

use crate::clients::InstagramApi;
use crate::error::ResolveError;
use std::time::Duration;
use tokio::time::sleep;
use tracing::trace;

/// 评论 ID 解析服务
///
/// 职责：
/// - 等待平台读写一致（宽限期）
/// - 在评论列表中按完整正文查找，找不到再看标题
/// - 不重试，不删除评论
pub struct CommentResolver {
    grace_period: Duration,
}

impl CommentResolver {
    pub fn new(grace_period: Duration) -> Self {
        Self { grace_period }
    }

    /// 找回刚发布评论的 ID
    ///
    /// 正文相同的多条评论取列表中第一条
    pub async fn resolve(
        &self,
        api: &dyn InstagramApi,
        media_id: &str,
        text: &str,
    ) -> Result<String, ResolveError> {
        // 发布后评论列表不一定马上能看到新评论
        sleep(self.grace_period).await;

        let comments = api.list_comments(media_id).await?;
        trace!("[媒体 {}] 找到 {} 条评论", media_id, comments.len());

        if let Some(comment) = comments.iter().find(|c| c.text == text) {
            trace!("[媒体 {}] 评论 ID: {}", media_id, comment.id);
            return Ok(comment.id.clone());
        }

        trace!(
            "[媒体 {}] 评论列表中没有刚发布的评论，尝试标题",
            media_id
        );

        let media = api.get_media(media_id).await?;
        match media.caption {
            Some(caption) if caption.text == text => {
                trace!("[媒体 {}] 评论以标题形式出现，ID: {}", media_id, caption.id);
                Ok(caption.id)
            }
            _ => Err(ResolveError::NotFound {
                media_id: media_id.to_string(),
            }),
        }
    }
}
