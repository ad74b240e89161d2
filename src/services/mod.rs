//! 工序能力层（Services）
//!
//! 每个工序只处理"一份"原料：检查取消、检查容量、模拟耗时、返回产物。
//! 工序本身不知道批次和并发的存在。

pub mod boil;
pub mod brew;
pub mod grind;

pub use boil::{boil, BOIL_CAPACITY, BOIL_LATENCY};
pub use brew::{brew, BREW_LATENCY};
pub use grind::{grind, GRIND_CAPACITY, GRIND_LATENCY};

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{PipelineError, Result};

/// 开工前的取消检查点，已取消则不做任何工作
pub(crate) fn ensure_not_cancelled(token: &CancellationToken, operation: &str) -> Result<()> {
    if token.is_cancelled() {
        debug!("{} 开工前检测到取消", operation);
        return Err(PipelineError::Cancelled);
    }
    Ok(())
}
