//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责发现新媒体和调度批次，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `poller` - 新媒体轮询器
//! - 管理应用生命周期（初始化、运行）
//! - 定时查询新媒体，维护水位线
//! - 每个新媒体启动一个独立任务（JoinSet）
//!
//! ### `media_processor` - 单个媒体处理器
//! - 按顺序遍历所有标签批次
//! - 每批委托给 `CommentFlow`
//! - 泄漏或删除失败时停止剩余批次
//! - 输出单个媒体的统计信息
//!
//! ## 层次关系
//!
//! ```text
//! poller (处理 Vec<Media>)
//!     ↓
//! media_processor (处理 [TagBatch])
//!     ↓
//! workflow::CommentFlow (处理单个 TagBatch)
//!     ↓
//! services::CommentResolver (找回评论 ID)
//!     ↓
//! clients::InstagramApi (外部 API)
//! ```

pub mod media_processor;
pub mod poller;

// 重新导出主要类型
pub use media_processor::{process_media, MediaStats};
pub use poller::{App, DiscoveryPoller};
