use anyhow::Result;
use instagger::utils::logging;
use instagger::{App, AppError, Config};
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置并初始化应用
    let app = Config::from_env()
        .map_err(AppError::from)
        .and_then(App::initialize)
        .map_err(|e| {
            error!("FATAL: {}", e);
            e
        })?;

    // 运行应用，主循环退出即为致命错误
    if let Err(e) = app.run().await {
        error!("FATAL: {}", e);
        return Err(e);
    }

    Ok(())
}
