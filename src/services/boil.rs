//! 烧水工序：冷水 → 热水

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::models::{HotWater, Water};
use crate::services::ensure_not_cancelled;

/// 一次最多能烧的水量
pub const BOIL_CAPACITY: Water = Water::new(600);

/// 烧一壶水的耗时
pub const BOIL_LATENCY: Duration = Duration::from_millis(400);

/// 烧水
///
/// 超过 [`BOIL_CAPACITY`] 立即返回 `CapacityExceeded`，不产生任何耗时。
#[tracing::instrument(name = "boil", skip_all, fields(water = %water))]
pub async fn boil(token: &CancellationToken, water: Water) -> Result<HotWater> {
    ensure_not_cancelled(token, "boil")?;

    if water > BOIL_CAPACITY {
        return Err(PipelineError::capacity_exceeded("boil", water, BOIL_CAPACITY));
    }

    tokio::time::sleep(BOIL_LATENCY).await;
    debug!("🔥 烧好 {}", water);
    Ok(HotWater::from(water))
}
