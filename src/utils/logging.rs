//! 日志工具模块
//!
//! 负责初始化 tracing 订阅者，并提供统一格式的日志输出函数

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::Coffee;

/// 初始化日志
///
/// - 控制台：按 `RUST_LOG` 过滤，未设置时为 `info`（详细模式为 `debug`）
/// - trace 文件：记录每个 span 的结束与耗时，`trace_file` 为空时不写
///
/// 重复初始化会返回错误，测试中可以忽略。
pub fn init(config: &Config) -> Result<()> {
    let default_level = if config.verbose_logging { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file_layer = if config.trace_file.is_empty() {
        None
    } else {
        let file = init_trace_file(&config.trace_file)?;
        Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE)
                .with_writer(Mutex::new(file)),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .try_init()
        .context("日志初始化失败")?;

    Ok(())
}

/// 初始化 trace 文件
///
/// 写入文件头后以追加模式打开
fn init_trace_file(path: &str) -> Result<fs::File> {
    let header = format!(
        "{}\n咖啡流水线 trace - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(path, header).with_context(|| format!("无法写入 trace 文件: {}", path))?;

    OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("无法打开 trace 文件: {}", path))
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 并发咖啡流水线");
    info!("☕ 目标杯数: {}", config.target_cups);
    info!("📋 每个冲泡任务: {} 杯", config.cups_per_brew);
    info!("{}", "=".repeat(60));
}

/// 记录阶段开始
///
/// # 参数
/// - `phase`: 阶段编号
/// - `name`: 阶段名称
pub fn log_phase_start(phase: usize, name: &str) {
    info!("\n{}", "─".repeat(60));
    info!("🧭 第 {} 阶段: {}", phase, name);
    info!("{}", "─".repeat(60));
}

/// 打印最终结果
pub fn log_final_result(coffee: Coffee, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 成品: {}", coffee);
    info!("{}", "=".repeat(60));
    if !config.trace_file.is_empty() {
        info!("\ntrace 已保存至: {}", config.trace_file);
    }
}
