//! # Instagger
//!
//! 监听账号新发布的媒体，在每个媒体下分批发布标签评论，到期后自动删除
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 外部接口层（Clients）
//! - `clients/` - 只暴露 API 能力，不关心业务流程
//! - `InstagramApi` - 能力接口（查询媒体、发布/列出/删除评论）
//! - `InstagramClient` - 基于 reqwest 的实现
//! - `MemoryClient` - 内存实现，用于测试
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `CommentResolver` - 找回刚发布评论的 ID
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一批标签"的完整处理流程
//! - `MediaCtx` - 上下文封装（media_id + 批次序号）
//! - `CommentFlow` - 流程编排（发布 → 解析 → 等待 → 删除）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/poller` - 新媒体轮询器，管理水位线和并发任务
//! - `orchestrator/media_processor` - 单个媒体处理器，遍历标签批次

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{InstagramApi, InstagramClient, MemoryClient};
pub use config::Config;
pub use error::{ApiError, AppError, AppResult, ConfigError, ResolveError};
pub use models::{partition, Comment, Media, TagBatch};
pub use orchestrator::{process_media, App, DiscoveryPoller, MediaStats};
pub use workflow::{BatchOutcome, CommentFlow, MediaCtx};
