//! 单个媒体处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责依次处理一个媒体的所有标签批次，是媒体级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **遍历批次**：严格按顺序处理 `[TagBatch]`，上一批删除完成后才发布下一批
//! 2. **流程调度**：每一批委托给 `CommentFlow`
//! 3. **提前终止**：评论泄漏或删除失败时停止剩余批次
//! 4. **统计输出**：最后重新读取媒体，记录点赞数

use crate::clients::InstagramApi;
use crate::models::{Media, TagBatch};
use crate::workflow::{BatchOutcome, CommentFlow, MediaCtx};
use tracing::{debug, info, trace, warn};

/// 媒体处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MediaStats {
    /// 完整走完生命周期的批次
    pub completed: usize,
    /// 发布失败被跳过的批次
    pub skipped: usize,
    /// 导致提前终止的批次结果
    pub aborted_by: Option<BatchOutcome>,
    /// 处理结束后读取到的点赞数
    pub final_likes: Option<u64>,
}

/// 处理单个媒体
///
/// # 参数
/// - `api`: API 客户端
/// - `media`: 新发现的媒体
/// - `batches`: 标签批次（所有任务共享）
/// - `flow`: 单批评论流程
///
/// # 返回
/// 返回处理统计，所有失败都已在内部记录日志
pub async fn process_media(
    api: &dyn InstagramApi,
    media: &Media,
    batches: &[TagBatch],
    flow: &CommentFlow,
) -> MediaStats {
    log_media_start(&media.id, batches.len());

    let mut stats = MediaStats::default();

    for (index, batch) in batches.iter().enumerate() {
        let ctx = MediaCtx::new(media.id.clone(), index + 1, batches.len());

        let outcome = flow.run(api, batch, &ctx).await;
        match outcome {
            BatchOutcome::Completed => {
                stats.completed += 1;
                trace!("{} 批次完成", ctx);
            }
            BatchOutcome::PostFailed => {
                stats.skipped += 1;
            }
            BatchOutcome::Leaked | BatchOutcome::DeleteFailed => {
                warn!("{} ⚠️ 停止处理剩余 {} 批", ctx, batches.len() - index - 1);
                stats.aborted_by = Some(outcome);
                break;
            }
        }
    }

    trace!("[媒体 {}] 处理结束", media.id);

    // 重新读取媒体，记录最终点赞数（失败不影响结果）
    match api.get_media(&media.id).await {
        Ok(refreshed) => {
            info!(
                "[媒体 {}] 👍 总点赞数 >>> {} <<< {}",
                refreshed.id,
                refreshed.likes.count,
                refreshed.link.as_deref().unwrap_or("")
            );
            stats.final_likes = Some(refreshed.likes.count);
        }
        Err(e) => debug!("[媒体 {}] 读取点赞数失败: {}", media.id, e),
    }

    log_media_complete(&media.id, &stats, batches.len());

    stats
}

// ========== 日志辅助函数 ==========

fn log_media_start(media_id: &str, batch_count: usize) {
    info!("[媒体 {}] 开始处理，共 {} 批标签", media_id, batch_count);
}

fn log_media_complete(media_id: &str, stats: &MediaStats, total: usize) {
    info!(
        "[媒体 {}] 批次统计: 完成 {}, 跳过 {}, 总计 {}",
        media_id, stats.completed, stats.skipped, total
    );
}
