//! 批次处理上下文
//!
//! 封装"我正在处理哪个媒体的第几批标签"这一信息

use std::fmt::Display;

/// 批次处理上下文
#[derive(Debug, Clone)]
pub struct MediaCtx {
    /// 媒体ID
    pub media_id: String,

    /// 批次序号（从1开始）
    pub batch_index: usize,

    /// 批次总数
    pub batch_count: usize,
}

impl MediaCtx {
    /// 创建新的批次上下文
    pub fn new(media_id: impl Into<String>, batch_index: usize, batch_count: usize) -> Self {
        Self {
            media_id: media_id.into(),
            batch_index,
            batch_count,
        }
    }
}

impl Display for MediaCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[媒体 {} 批次#{}/{}]",
            self.media_id, self.batch_index, self.batch_count
        )
    }
}
