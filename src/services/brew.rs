//! 冲泡工序：热水 + 咖啡粉 → 咖啡

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::models::{Coffee, GroundBean, HotWater};
use crate::services::ensure_not_cancelled;

/// 冲泡一次的耗时
pub const BREW_LATENCY: Duration = Duration::from_millis(1000);

/// 冲泡咖啡
///
/// 产出杯数取决于较少的那种原料，向下取整，不会多做。
#[tracing::instrument(
    name = "brew",
    skip_all,
    fields(hot_water = %hot_water, ground_beans = %ground_beans)
)]
pub async fn brew(
    token: &CancellationToken,
    hot_water: HotWater,
    ground_beans: GroundBean,
) -> Result<Coffee> {
    ensure_not_cancelled(token, "brew")?;

    let one_cup = Coffee::new(1);
    if hot_water < one_cup.hot_water() {
        return Err(PipelineError::insufficient_input(
            "brew",
            "热水",
            one_cup.hot_water(),
            hot_water,
        ));
    }
    if ground_beans < one_cup.ground_beans() {
        return Err(PipelineError::insufficient_input(
            "brew",
            "咖啡粉",
            one_cup.ground_beans(),
            ground_beans,
        ));
    }

    tokio::time::sleep(BREW_LATENCY).await;

    // 少的一方决定杯数
    let by_water = hot_water / one_cup.hot_water();
    let by_beans = ground_beans / one_cup.ground_beans();
    let cups = Coffee::new(by_water.min(by_beans));
    debug!("☕ 冲好 {}", cups);
    Ok(cups)
}
