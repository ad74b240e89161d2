use std::time::Duration;

use coffee_batch::services::{boil, BOIL_LATENCY, BREW_LATENCY};
use coffee_batch::{Coffee, Config, HotWater, Pipeline, PipelineError, Water};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

fn config(target_cups: u32) -> Config {
    Config {
        target_cups,
        trace_file: String::new(),
        ..Config::default()
    }
}

/// 20 杯：400g 豆 + 3600ml 水 → 20 个磨豆任务 + 6 个烧水任务 → 5 个冲泡任务
#[tokio::test(start_paused = true)]
async fn test_make_twenty_cups() {
    let _ = tracing_subscriber::fmt::try_init();

    let token = CancellationToken::new();
    let start = Instant::now();

    let coffee = Pipeline::new(config(20))
        .run(&token)
        .await
        .expect("流水线应该成功");

    assert_eq!(coffee, Coffee::new(20));

    // 两个阶段各自并行：约 400ms + 1000ms
    let expected = BOIL_LATENCY + BREW_LATENCY;
    assert!(start.elapsed() >= expected);
    assert!(start.elapsed() < expected + Duration::from_millis(100));
    assert!(!token.is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn test_zero_cups() {
    let token = CancellationToken::new();

    let coffee = Pipeline::new(config(0)).run(&token).await.unwrap();
    assert_eq!(coffee, Coffee::new(0));
}

/// 冲泡按 4 杯一块打包，零头原料被直接丢弃，不会报告
#[tokio::test(start_paused = true)]
async fn test_leftover_material_is_untracked() {
    let token = CancellationToken::new();

    let coffee = Pipeline::new(config(10)).run(&token).await.unwrap();
    assert_eq!(coffee, Coffee::new(8));
}

#[tokio::test(start_paused = true)]
async fn test_caller_cancellation_stops_pipeline() {
    let token = CancellationToken::new();
    token.cancel();
    let start = Instant::now();

    let result = Pipeline::new(config(20)).run(&token).await;

    assert_eq!(result, Err(PipelineError::Cancelled));
    assert_eq!(start.elapsed(), Duration::ZERO);
}

/// 直接用 700ml 烧水：立即失败，没有热水，也没有耗时
#[tokio::test(start_paused = true)]
async fn test_boil_over_capacity_fails_fast() {
    let token = CancellationToken::new();
    let start = Instant::now();

    let result = boil(&token, Water::new(700)).await;

    assert!(matches!(result, Err(PipelineError::CapacityExceeded { .. })));
    assert_eq!(result.unwrap_or_default(), HotWater::new(0));
    assert_eq!(start.elapsed(), Duration::ZERO);
}
