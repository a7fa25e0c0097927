//! 新媒体轮询器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责发现新媒体并为每个媒体启动独立任务。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：创建 API 客户端、生成标签批次、输出启动信息
//! 2. **定时轮询**：每个间隔查询水位线之后发布的媒体
//! 3. **推进水位线**：无论查询成功与否都推进到本次 tick 的时间
//! 4. **并发处理**：每个新媒体一个 tokio 任务，互不等待
//!
//! ## 设计特点
//!
//! - **水位线私有**：只有轮询器读写水位线，媒体任务看不到它
//! - **只读共享**：任务之间只共享标签批次和客户端
//! - **查询失败不重试**：失败窗口内发布的媒体会被跳过

use crate::clients::{InstagramApi, InstagramClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{partition, Media, TagBatch};
use crate::orchestrator::media_processor::{self, MediaStats};
use crate::utils::logging;
use crate::workflow::CommentFlow;
use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info, trace};

/// 新媒体轮询器
pub struct DiscoveryPoller {
    api: Arc<dyn InstagramApi>,
    batches: Arc<[TagBatch]>,
    flow: Arc<CommentFlow>,
    watermark: DateTime<Utc>,
    tasks: JoinSet<MediaStats>,
}

impl DiscoveryPoller {
    pub fn new(
        api: Arc<dyn InstagramApi>,
        batches: Vec<TagBatch>,
        flow: CommentFlow,
        watermark: DateTime<Utc>,
    ) -> Self {
        Self {
            api,
            batches: batches.into(),
            flow: Arc::new(flow),
            watermark,
            tasks: JoinSet::new(),
        }
    }

    /// 当前水位线
    pub fn watermark(&self) -> DateTime<Utc> {
        self.watermark
    }

    /// 正在运行的媒体任务数
    pub fn active_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// 查询水位线之后的新媒体，然后把水位线推进到 `observed_at`
    ///
    /// 查询失败时返回空列表，水位线照样推进
    pub async fn tick(&mut self, observed_at: DateTime<Utc>) -> Vec<Media> {
        let since = self.watermark;

        let media = match self.api.recent_media(since).await {
            Ok(media) => media,
            Err(e) => {
                error!("❌ 获取新媒体失败: {}", e);
                Vec::new()
            }
        };

        if media.is_empty() {
            trace!("Tick... 自 {} 以来没有新媒体", since.timestamp());
        } else {
            info!(
                "🆕 Tick... 自 {} 以来发现 {} 个新媒体",
                since.timestamp(),
                media.len()
            );
        }

        self.watermark = observed_at;
        media
    }

    /// 为一个媒体启动独立任务
    pub fn launch(&mut self, media: Media) {
        let api = Arc::clone(&self.api);
        let batches = Arc::clone(&self.batches);
        let flow = Arc::clone(&self.flow);

        self.tasks.spawn(async move {
            media_processor::process_media(api.as_ref(), &media, &batches, &flow).await
        });
    }

    /// 完整的一次轮询：查询、推进水位线、启动任务
    ///
    /// # 返回
    /// 返回本次启动的任务数
    pub async fn poll_once(&mut self, observed_at: DateTime<Utc>) -> usize {
        self.reap_finished();

        let media = self.tick(observed_at).await;
        let launched = media.len();
        for m in media {
            self.launch(m);
        }
        launched
    }

    /// 回收已经结束的任务
    pub fn reap_finished(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            if let Err(e) = result {
                error!("❌ 媒体任务异常退出: {}", e);
            }
        }
    }

    /// 等待所有任务结束
    pub async fn wait_all(&mut self) -> Vec<MediaStats> {
        let mut all_stats = Vec::new();
        while let Some(result) = self.tasks.join_next().await {
            match result {
                Ok(stats) => all_stats.push(stats),
                Err(e) => error!("❌ 媒体任务异常退出: {}", e),
            }
        }
        all_stats
    }

    /// 主循环，正常情况下永不返回
    pub async fn watch(&mut self, poll_interval: Duration) {
        let mut ticker = interval_at(Instant::now() + poll_interval, poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            self.poll_once(Utc::now()).await;
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    poller: DiscoveryPoller,
}

impl App {
    /// 初始化应用
    ///
    /// 只有 HTTP 客户端创建失败时返回错误
    pub fn initialize(config: Config) -> AppResult<Self> {
        let api: Arc<dyn InstagramApi> = Arc::new(InstagramClient::new(&config)?);
        Ok(Self::with_client(config, api))
    }

    /// 使用指定客户端初始化
    pub fn with_client(config: Config, api: Arc<dyn InstagramApi>) -> Self {
        let batches = partition(&config.hashtags, config.hashtag_batch_size);
        logging::log_startup(&config, &batches);

        let flow = CommentFlow::new(&config);
        let poller = DiscoveryPoller::new(api, batches, flow, Utc::now());

        Self { config, poller }
    }

    /// 运行应用主循环
    ///
    /// 主循环退出属于致命错误
    pub async fn run(mut self) -> Result<()> {
        trace!("开始主循环");
        self.poller.watch(self.config.poll_interval).await;
        bail!("主循环不应退出")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{ApiCall, MemoryClient};
    use chrono::TimeZone;
    use tokio_test::assert_ok;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn poller_with(client: Arc<MemoryClient>, tags: &[&str]) -> DiscoveryPoller {
        DiscoveryPoller::new(
            client,
            partition(tags, 4),
            CommentFlow::with_timing(Duration::from_secs(3), Duration::from_secs(300)),
            at(1_000),
        )
    }

    #[test]
    fn test_initialize_starts_watermark_now() {
        let config = Config {
            access_token: "t".to_string(),
            hashtags: vec!["#a".to_string()],
            ..Config::default()
        };
        let before = Utc::now();

        let app = assert_ok!(App::initialize(config));

        assert!(app.poller.watermark() >= before);
        assert_eq!(app.poller.active_tasks(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watermark_advances_on_success() {
        let client = Arc::new(MemoryClient::new());
        client.add_media(Media::new("m1", at(1_005)));
        let mut poller = poller_with(client.clone(), &["#a"]);

        let media = poller.tick(at(1_020)).await;

        assert_eq!(media.len(), 1);
        assert_eq!(poller.watermark(), at(1_020));
        assert_eq!(client.calls()[0], ApiCall::RecentMedia { since: at(1_000) });
    }

    #[tokio::test(start_paused = true)]
    async fn test_watermark_advances_on_failure() {
        let client = Arc::new(MemoryClient::new());
        client.add_media(Media::new("m1", at(1_005)));
        client.set_fail_recent_media(true);
        let mut poller = poller_with(client.clone(), &["#a"]);

        let media = poller.tick(at(1_020)).await;
        assert!(media.is_empty());
        assert_eq!(poller.watermark(), at(1_020));

        // 失败窗口里的媒体不会被补上
        client.set_fail_recent_media(false);
        let media = poller.tick(at(1_040)).await;
        assert!(media.is_empty());
        assert_eq!(poller.watermark(), at(1_040));
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_task_per_media() {
        let client = Arc::new(MemoryClient::new());
        client.add_media(Media::new("m1", at(1_005)));
        client.add_media(Media::new("m2", at(1_010)));
        let mut poller = poller_with(client.clone(), &["#a", "#b"]);

        assert_eq!(poller.poll_once(at(1_020)).await, 2);
        assert_eq!(poller.active_tasks(), 2);

        // 下一次轮询不会重复启动
        assert_eq!(poller.poll_once(at(1_040)).await, 0);

        let stats = poller.wait_all().await;
        assert_eq!(stats.len(), 2);
        assert!(stats.iter().all(|s| s.completed == 1));
        assert_eq!(client.post_count("m1"), 1);
        assert_eq!(client.post_count("m2"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_media_tasks_run_concurrently() {
        let client = Arc::new(MemoryClient::new());
        client.add_media(Media::new("m1", at(1_005)));
        client.add_media(Media::new("m2", at(1_010)));
        let mut poller = poller_with(client.clone(), &["#a"]);

        let started = Instant::now();
        poller.poll_once(at(1_020)).await;
        poller.wait_all().await;

        // 两个媒体各一批：并发时总耗时约为一个周期
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(303));
        assert!(elapsed < Duration::from_secs(606));
    }
}
