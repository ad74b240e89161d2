//! 磨豆工序：咖啡豆 → 咖啡粉

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::models::{Bean, GroundBean};
use crate::services::ensure_not_cancelled;

/// 一次最多能磨的豆量
pub const GRIND_CAPACITY: Bean = Bean::new(20);

/// 磨一次豆的耗时
pub const GRIND_LATENCY: Duration = Duration::from_millis(200);

/// 磨豆
#[tracing::instrument(name = "grind", skip_all, fields(beans = %beans))]
pub async fn grind(token: &CancellationToken, beans: Bean) -> Result<GroundBean> {
    ensure_not_cancelled(token, "grind")?;

    if beans > GRIND_CAPACITY {
        return Err(PipelineError::capacity_exceeded("grind", beans, GRIND_CAPACITY));
    }

    tokio::time::sleep(GRIND_LATENCY).await;
    debug!("⚙️ 磨好 {}", beans);
    Ok(GroundBean::from(beans))
}
