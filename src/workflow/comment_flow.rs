//! 评论生命周期 - 流程层
//!
//! 核心职责：定义"一批标签"的完整处理流程
//!
//! 流程顺序：
//! 1. 发布评论（失败则跳过本批）
//! 2. 找回评论 ID（找不到则停止后续批次，避免泄漏更多评论）
//! 3. 等待可见期
//! 4. 删除评论（失败则停止后续批次）

use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info, trace, warn};

use crate::clients::InstagramApi;
use crate::config::Config;
use crate::models::TagBatch;
use crate::services::CommentResolver;
use crate::workflow::media_ctx::MediaCtx;

/// 单批处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// 发布、等待、删除全部完成
    Completed,
    /// 发布失败，本批跳过
    PostFailed,
    /// 找不到评论 ID，评论可能泄漏
    Leaked,
    /// 删除失败
    DeleteFailed,
}

impl BatchOutcome {
    /// 是否可以继续处理下一批
    pub fn should_continue(self) -> bool {
        matches!(self, BatchOutcome::Completed | BatchOutcome::PostFailed)
    }
}

/// 评论生命周期流程
///
/// - 编排单批标签的 发布 → 解析 → 等待 → 删除
/// - 不持有客户端，由调用方传入
/// - 不关心批次之间的顺序
pub struct CommentFlow {
    resolver: CommentResolver,
    comment_interval: Duration,
}

impl CommentFlow {
    /// 创建新的评论流程
    pub fn new(config: &Config) -> Self {
        Self::with_timing(config.resolve_grace, config.comment_interval)
    }

    pub fn with_timing(resolve_grace: Duration, comment_interval: Duration) -> Self {
        Self {
            resolver: CommentResolver::new(resolve_grace),
            comment_interval,
        }
    }

    pub async fn run(
        &self,
        api: &dyn InstagramApi,
        batch: &TagBatch,
        ctx: &MediaCtx,
    ) -> BatchOutcome {
        let text = batch.text();

        // ========== 1. 发布 ==========
        if let Err(e) = api.add_comment(&ctx.media_id, &text).await {
            error!("{} ❌ 发布评论失败: {}", ctx, e);
            return BatchOutcome::PostFailed;
        }
        trace!("{} 评论已发布", ctx);

        // ========== 2. 找回 ID ==========
        let comment_id = match self.resolver.resolve(api, &ctx.media_id, &text).await {
            Ok(id) => id,
            Err(e) => {
                warn!("{} ⚠️ 无法找到评论 ID，可能泄漏: {}", ctx, e);
                return BatchOutcome::Leaked;
            }
        };
        info!("{} ✓ 评论 {} 已发布", ctx, comment_id);

        // ========== 3. 可见期 ==========
        sleep(self.comment_interval).await;

        // ========== 4. 删除 ==========
        if let Err(e) = api.delete_comment(&ctx.media_id, &comment_id).await {
            error!("{} ❌ 删除评论 {} 失败: {}", ctx, comment_id, e);
            return BatchOutcome::DeleteFailed;
        }
        trace!("{} 评论 {} 已删除", ctx, comment_id);

        BatchOutcome::Completed
    }
}
