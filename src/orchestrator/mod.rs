//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量调度器
//! - 按单任务上限切分总量
//! - 每块一个并发任务，开工前检查取消
//! - 汇总成功结果，第一个错误取消整个作用域
//!
//! ### `pipeline` - 流水线驱动
//! - 准备阶段：磨豆批次与烧水批次并发，共享取消作用域
//! - 冲泡阶段：准备阶段成功后才开始
//!
//! ## 层次关系
//!
//! ```text
//! pipeline (两个阶段)
//!     ↓
//! batch_processor (处理 Vec<chunk>)
//!     ↓
//! services (工序：grind / boil / brew)
//!     ↓
//! models (数量类型)
//! ```

pub mod batch_processor;
pub mod pipeline;

// 重新导出主要类型
pub use batch_processor::{run_batch, run_chunks, BatchRequest, BatchStats, TaskState};
pub use pipeline::{plan_brew_chunks, BrewPlan, Pipeline};
