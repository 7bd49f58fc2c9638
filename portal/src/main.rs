mod config;
mod error;
mod server;

#[cfg(test)]
mod tests;

use crate::config::{Config, LoggingConfig};
use crate::error::Result;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    init_tracing(&config.logging);
    info!("Starting portal storage service...");
    info!("Configuration loaded successfully");

    let settings = config.storage_settings()?;
    info!("Storing uploads under {}", settings.storage_root().display());

    // 初始化应用状态
    let app_state = server::init_app_state(settings);
    info!("Application state initialized");

    // 创建路由
    let app = server::create_router(app_state, config.max_request_body_size()?);
    info!("Router created");

    // 启动HTTP服务器
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

/// RUST_LOG 存在时覆盖配置中的日志级别
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
