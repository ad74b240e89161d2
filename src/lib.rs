//! # Coffee Batch
//!
//! 一个把大批量原料切块、并发处理、失败即取消的咖啡流水线
//!
//! ## 架构设计
//!
//! ### ① 模型层（Models）
//! - `models/quantity` - 豆、粉、水、热水、咖啡各自独立的数量类型，以及配方换算
//!
//! ### ② 工序能力层（Services）
//! - `services/` - 只处理"一份"原料，带容量上限和模拟耗时
//! - `grind` - 磨豆（单次上限 20g）
//! - `boil` - 烧水（单次上限 600ml）
//! - `brew` - 冲泡（取较少的原料决定杯数）
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 按上限分块、并发执行、汇总、失败即取消
//! - `orchestrator/pipeline` - 两阶段流水线：磨豆 + 烧水 → 冲泡
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{PipelineError, Result};
pub use models::{Bean, Coffee, GroundBean, HotWater, Quantity, Water};
pub use orchestrator::{plan_brew_chunks, run_batch, run_chunks, BatchRequest, Pipeline};
