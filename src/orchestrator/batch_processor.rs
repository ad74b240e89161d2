//! 批量调度器 - 编排层
//!
//! ## 职责
//!
//! 把一个总量按工序上限切成若干块，每块起一个并发任务，汇总结果。
//!
//! ## 核心流程
//!
//! 1. **分块**：`BatchRequest::chunks` 按上限切分，最后一块可能是余数
//! 2. **并发**：每块一个 `tokio::spawn` 任务（收集在 `JoinSet` 中）
//! 3. **检查点**：任务开工前检查取消令牌，已取消则直接跳过
//! 4. **汇总**：任务通过 join 结果把产物交回调度器，由调度器单线程累加，
//!    不需要共享锁
//! 5. **失败即取消**：第一个观察到的错误会取消整个作用域，并作为批次结果；
//!    已累加的部分结果直接丢弃
//!
//! 调度器会等所有已启动的任务结束后才返回，不会中途抢占正在运行的任务。

use std::fmt;
use std::future::Future;
use std::ops::Add;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, Instrument};

use crate::error::{PipelineError, Result};
use crate::models::Quantity;

/// 批次请求：总量 + 单任务上限
#[derive(Debug, Clone, Copy)]
pub struct BatchRequest<Q> {
    /// 批次名称（仅用于日志和 trace）
    pub label: &'static str,
    pub total: Q,
    pub capacity: Q,
}

impl<Q: Quantity> BatchRequest<Q> {
    pub fn new(label: &'static str, total: Q, capacity: Q) -> Self {
        Self {
            label,
            total,
            capacity,
        }
    }

    /// 切分为按顺序排列的块
    ///
    /// 除最后一块外都等于上限；总量为 0 时返回空列表（此时不检查上限）。
    pub fn chunks(&self) -> Result<Vec<Q>> {
        if self.total.is_zero() {
            return Ok(Vec::new());
        }
        if self.capacity.is_zero() {
            return Err(PipelineError::InvalidBatch {
                label: self.label.to_string(),
                reason: "单任务上限必须大于 0".to_string(),
            });
        }

        let mut remaining = self.total.value();
        let capacity = self.capacity.value();
        let mut chunks = Vec::with_capacity(remaining.div_ceil(capacity) as usize);
        while remaining > 0 {
            let chunk = remaining.min(capacity);
            remaining -= chunk;
            chunks.push(Q::from_value(chunk));
        }
        Ok(chunks)
    }
}

/// 单个任务的状态
///
/// `Pending -> Running -> {Succeeded, Failed, Cancelled}`，
/// 只有开工前的检查点才会进入 `Cancelled`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskState::Pending => "pending",
            TaskState::Running => "running",
            TaskState::Succeeded => "succeeded",
            TaskState::Failed => "failed",
            TaskState::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// 批次统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: usize,
}

impl BatchStats {
    fn record(&mut self, state: TaskState) {
        match state {
            TaskState::Succeeded => self.succeeded += 1,
            TaskState::Failed => self.failed += 1,
            TaskState::Cancelled => self.cancelled += 1,
            TaskState::Pending | TaskState::Running => {}
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.cancelled
    }
}

/// 按请求分块并批量执行
///
/// # 参数
/// - `token`: 取消作用域，任一任务失败时会被取消
/// - `request`: 总量与单任务上限
/// - `operation`: 处理单块的工序
///
/// # 返回
/// 全部成功时返回累加结果，否则返回第一个观察到的错误
pub async fn run_batch<Q, O, F, Fut>(
    token: &CancellationToken,
    request: BatchRequest<Q>,
    operation: F,
) -> Result<O>
where
    Q: Quantity,
    O: Default + Add<Output = O> + Send + 'static,
    F: Fn(CancellationToken, Q) -> Fut + Clone + Send + 'static,
    Fut: Future<Output = Result<O>> + Send + 'static,
{
    let chunks = request.chunks()?;
    run_chunks(token, request.label, chunks, operation).await
}

/// 对已经切好的块批量执行
///
/// 冲泡阶段的块由两种原料共同决定，不能由单一总量切出，所以单独暴露。
pub async fn run_chunks<I, O, F, Fut>(
    token: &CancellationToken,
    label: &'static str,
    chunks: Vec<I>,
    operation: F,
) -> Result<O>
where
    I: fmt::Debug + Send + 'static,
    O: Default + Add<Output = O> + Send + 'static,
    F: Fn(CancellationToken, I) -> Fut + Clone + Send + 'static,
    Fut: Future<Output = Result<O>> + Send + 'static,
{
    let total_tasks = chunks.len();
    log_batch_start(label, total_tasks);

    let mut join_set = JoinSet::new();
    for (index, chunk) in chunks.into_iter().enumerate() {
        let task_token = token.clone();
        let operation = operation.clone();
        let span = tracing::info_span!("chunk", batch = label, index);

        debug!(state = %TaskState::Pending, "[{}] 任务 #{} 已提交: {:?}", label, index, chunk);
        join_set.spawn(
            async move {
                // 检查点：作用域已取消则不开工
                if task_token.is_cancelled() {
                    debug!(state = %TaskState::Cancelled, "开工前检测到取消，跳过");
                    return Err(PipelineError::Cancelled);
                }
                debug!(state = %TaskState::Running, "开始处理 {:?}", chunk);
                operation(task_token, chunk).await
            }
            .instrument(span),
        );
    }

    // 等待所有任务结束
    let mut stats = BatchStats::default();
    let mut accumulated = O::default();
    let mut first_error: Option<PipelineError> = None;

    while let Some(joined) = join_set.join_next().await {
        let outcome = joined.unwrap_or_else(|e| {
            Err(PipelineError::TaskAborted {
                label: label.to_string(),
                reason: e.to_string(),
            })
        });

        match outcome {
            Ok(output) => {
                stats.record(TaskState::Succeeded);
                accumulated = accumulated + output;
            }
            Err(e) => {
                stats.record(if e.is_cancelled() {
                    TaskState::Cancelled
                } else {
                    TaskState::Failed
                });

                if first_error.is_none() {
                    error!("[{}] ❌ 任务失败，取消其余任务: {}", label, e);
                    token.cancel();
                    first_error = Some(e);
                } else {
                    debug!("[{}] 后续错误已忽略: {}", label, e);
                }
            }
        }
    }

    log_batch_complete(label, &stats);

    match first_error {
        // 部分结果直接丢弃
        Some(e) => Err(e),
        None => Ok(accumulated),
    }
}

// ========== 日志辅助函数 ==========

fn log_batch_start(label: &str, total_tasks: usize) {
    info!("📦 [{}] 开始处理: 共 {} 个任务", label, total_tasks);
}

fn log_batch_complete(label: &str, stats: &BatchStats) {
    if stats.failed == 0 && stats.cancelled == 0 {
        info!("✓ [{}] 完成: 成功 {}/{}", label, stats.succeeded, stats.total());
    } else {
        info!(
            "✗ [{}] 中止: 成功 {} | 失败 {} | 取消 {}",
            label, stats.succeeded, stats.failed, stats.cancelled
        );
    }
}
