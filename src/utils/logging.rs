/// 日志工具模块
///
/// 提供日志初始化和启动信息输出
use crate::config::Config;
use crate::models::TagBatch;
use std::time::Duration;
use tracing::{info, trace};
use tracing_subscriber::EnvFilter;

/// 初始化日志（输出到标准输出，带时间戳）
///
/// 默认级别为 info，可通过 `RUST_LOG` 覆盖，例如 `RUST_LOG=instagger=trace`
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // 已经初始化过（例如测试里重复调用）时保留原来的订阅者
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 配置
/// - `batches`: 生成的标签批次
pub fn log_startup(config: &Config, batches: &[TagBatch]) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 新媒体标签评论模式");
    info!(
        "🏷️ 找到 {} 个标签，每批 {} 个",
        config.hashtags.len(),
        config.hashtag_batch_size
    );
    info!("📋 标签批次: {}", format_batches(batches));
    info!("📦 批次总数: {}", batches.len());
    info!(
        "⏱️ 单个媒体预计耗时: ~{}",
        format_duration(end_to_end_estimate(config.comment_interval, batches.len()))
    );
    info!("💬 评论可见时长: {}", format_duration(config.comment_interval));
    info!("🔄 轮询间隔: {}", format_duration(config.poll_interval));
    info!("{}", "=".repeat(60));
    trace!("API 地址: {}", config.api_base_url);
}

/// 单个媒体的端到端耗时估算：批次数 × 可见时长
pub fn end_to_end_estimate(comment_interval: Duration, batch_count: usize) -> Duration {
    comment_interval.saturating_mul(u32::try_from(batch_count).unwrap_or(u32::MAX))
}

fn format_batches(batches: &[TagBatch]) -> String {
    batches
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 格式化时长，例如 `1h5m0s`、`20s`
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init();
        init();
        tracing::info!("日志已初始化");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(20)), "20s");
        assert_eq!(format_duration(Duration::from_secs(300)), "5m0s");
        assert_eq!(format_duration(Duration::from_secs(3900)), "1h5m0s");
    }

    #[test]
    fn test_end_to_end_estimate() {
        assert_eq!(
            end_to_end_estimate(Duration::from_secs(300), 3),
            Duration::from_secs(900)
        );
        assert_eq!(end_to_end_estimate(Duration::from_secs(300), 0), Duration::ZERO);
    }
}
