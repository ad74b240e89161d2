use anyhow::Result;
use coffee_batch::utils::logging;
use coffee_batch::{Config, Pipeline};
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(&config)?;
    logging::log_startup(&config);

    // Ctrl-C 取消整条流水线
    let token = CancellationToken::new();
    let ctrl_c_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("⚠️ 收到中断信号，正在取消...");
            ctrl_c_token.cancel();
        }
    });

    let coffee = Pipeline::new(config.clone()).run(&token).await?;

    logging::log_final_result(coffee, &config);
    println!("{}", coffee);

    Ok(())
}
