use workshop_edge::{WorkshopState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 配置, 日志)
    let config = setup_environment()?;

    tracing::info!("Workshop edge starting...");

    // 2. 打开存储
    let state = WorkshopState::initialize(&config)?;

    // 3. 启动流程 (孤儿班次、远程合并、演示数据)
    let report = state.run_startup().await;
    if let Some(seeded) = &report.seeded {
        tracing::info!(?seeded, "Demo data written");
    }

    Ok(())
}
