//! 流水线驱动 - 编排层
//!
//! ## 阶段划分
//!
//! 1. **准备阶段**：磨豆批次与烧水批次同时进行，共享同一个取消作用域
//! 2. **冲泡阶段**：准备阶段成功返回后，才按固定杯数把热水和咖啡粉分块冲泡
//!
//! 任一阶段失败都会直接返回第一个错误，不会进入下一阶段。

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::models::{Coffee, GroundBean, HotWater, Quantity, MAX_CUPS};
use crate::orchestrator::batch_processor::{run_batch, run_chunks, BatchRequest};
use crate::services::{boil, brew, grind, BOIL_CAPACITY, GRIND_CAPACITY};
use crate::utils::logging::log_phase_start;

/// 冲泡阶段的分块结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrewPlan {
    /// 每块的 (热水, 咖啡粉)
    pub chunks: Vec<(HotWater, GroundBean)>,
    /// 不够再做一块而剩下的热水
    pub leftover_hot_water: HotWater,
    /// 不够再做一块而剩下的咖啡粉
    pub leftover_ground_beans: GroundBean,
}

/// 按每块固定杯数切分冲泡任务
///
/// 只要两种原料都还够一块就继续切；剩余的零头不会被冲泡，也不会被报告为错误。
/// 每块杯数为 0 或超过 [`MAX_CUPS`] 时不切任何块。
pub fn plan_brew_chunks(
    mut hot_water: HotWater,
    mut ground_beans: GroundBean,
    cups_per_task: Coffee,
) -> BrewPlan {
    let mut chunks = Vec::new();

    if !cups_per_task.is_zero() && cups_per_task.get() <= MAX_CUPS {
        let need_water = cups_per_task.hot_water();
        let need_beans = cups_per_task.ground_beans();
        while let (Some(water_left), Some(beans_left)) = (
            hot_water.checked_sub(need_water),
            ground_beans.checked_sub(need_beans),
        ) {
            hot_water = water_left;
            ground_beans = beans_left;
            chunks.push((need_water, need_beans));
        }
    }

    BrewPlan {
        chunks,
        leftover_hot_water: hot_water,
        leftover_ground_beans: ground_beans,
    }
}

/// 咖啡流水线
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 运行完整流水线
    ///
    /// # 参数
    /// - `token`: 调用方的取消来源，流水线只读取不取消它
    ///
    /// # 返回
    /// 冲好的咖啡杯数，或第一个错误
    #[tracing::instrument(
        name = "make-coffee",
        skip_all,
        fields(target_cups = self.config.target_cups)
    )]
    pub async fn run(&self, token: &CancellationToken) -> Result<Coffee> {
        let target = Coffee::new(self.config.target_cups);

        let (ground_beans, hot_water) = self.prepare(token, target).await?;
        self.brew_all(token, hot_water, ground_beans).await
    }

    /// 准备阶段：同时磨豆和烧水
    pub async fn prepare(
        &self,
        token: &CancellationToken,
        target: Coffee,
    ) -> Result<(GroundBean, HotWater)> {
        if target.get() > MAX_CUPS {
            return Err(PipelineError::InvalidBatch {
                label: "prepare".to_string(),
                reason: format!("目标杯数不能超过 {}，实际为 {}", MAX_CUPS, target.get()),
            });
        }

        let water = target.water();
        let beans = target.beans();

        log_phase_start(1, "磨豆 + 烧水");
        info!("💧 需要 {}", water);
        info!("🫘 需要 {}", beans);

        // 两个批次共享一个作用域：任一失败，另一个也会被取消
        let scope = token.child_token();
        let grind_batch = run_batch(
            &scope,
            BatchRequest::new("grind", beans, GRIND_CAPACITY),
            |token, beans| async move { grind(&token, beans).await },
        );
        let boil_batch = run_batch(
            &scope,
            BatchRequest::new("boil", water, BOIL_CAPACITY),
            |token, water| async move { boil(&token, water).await },
        );

        match futures::future::join(grind_batch, boil_batch).await {
            (Ok(ground_beans), Ok(hot_water)) => {
                info!("✓ 准备完成: {} / {}", hot_water, ground_beans);
                Ok((ground_beans, hot_water))
            }
            (Err(e), Err(other)) => Err(triggering_error(e, other)),
            (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
        }
    }

    /// 冲泡阶段
    pub async fn brew_all(
        &self,
        token: &CancellationToken,
        hot_water: HotWater,
        ground_beans: GroundBean,
    ) -> Result<Coffee> {
        log_phase_start(2, "冲泡");

        let per_task = Coffee::new(self.config.cups_per_brew);
        let plan = plan_brew_chunks(hot_water, ground_beans, per_task);

        if !plan.leftover_hot_water.is_zero() || !plan.leftover_ground_beans.is_zero() {
            warn!(
                "⚠️ 剩余 {} / {} 不足 {}，将被丢弃",
                plan.leftover_hot_water, plan.leftover_ground_beans, per_task
            );
        }

        let scope = token.child_token();
        run_chunks(&scope, "brew", plan.chunks, |token, (hot_water, ground_beans)| async move {
            brew(&token, hot_water, ground_beans).await
        })
        .await
    }
}

/// 两个批次都失败时，优先报告引发取消的那个错误
///
/// 两个都不是 `Cancelled` 时无法区分先后，固定取 `first`（磨豆批次）。
fn triggering_error(first: PipelineError, second: PipelineError) -> PipelineError {
    if first.is_cancelled() && !second.is_cancelled() {
        second
    } else {
        first
    }
}
