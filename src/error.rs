use thiserror::Error;

/// 流水线错误类型
///
/// 任何一个任务出错都会中止所在批次，批次出错中止所在阶段，
/// 阶段出错中止整条流水线。只向调用方报告第一个错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// 单次处理量超过工序上限
    #[error("{operation}: 单次最多只能处理 {capacity}，实际请求 {requested}")]
    CapacityExceeded {
        operation: &'static str,
        requested: String,
        capacity: String,
    },

    /// 原料不足以做出一份产物
    #[error("{operation}: {material}不足，至少需要 {required}，实际只有 {actual}")]
    InsufficientInput {
        operation: &'static str,
        material: &'static str,
        required: String,
        actual: String,
    },

    /// 所在的取消作用域已被取消
    #[error("任务已取消")]
    Cancelled,

    /// 批次请求本身不合法（例如上限为 0）
    #[error("批次 {label} 不合法: {reason}")]
    InvalidBatch { label: String, reason: String },

    /// 任务 panic 或被运行时中止
    #[error("批次 {label} 的任务异常退出: {reason}")]
    TaskAborted { label: String, reason: String },
}

impl PipelineError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PipelineError::Cancelled)
    }

    pub(crate) fn capacity_exceeded(
        operation: &'static str,
        requested: impl std::fmt::Display,
        capacity: impl std::fmt::Display,
    ) -> Self {
        PipelineError::CapacityExceeded {
            operation,
            requested: requested.to_string(),
            capacity: capacity.to_string(),
        }
    }

    pub(crate) fn insufficient_input(
        operation: &'static str,
        material: &'static str,
        required: impl std::fmt::Display,
        actual: impl std::fmt::Display,
    ) -> Self {
        PipelineError::InsufficientInput {
            operation,
            material,
            required: required.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// 流水线结果类型
pub type Result<T> = std::result::Result<T, PipelineError>;
