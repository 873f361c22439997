//! Telnet 示範伺服器
//!
//! 設定檔路徑取自第一個命令列參數，其次為 `TELSERVER_CONFIG` 環境變數；
//! 兩者皆無時使用預設設定。

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use telserver::{ServerConfig, ServerError};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CONFIG_ENV: &str = "TELSERVER_CONFIG";

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // 初始化日誌
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match config_path() {
        Some(path) => ServerConfig::load(path)?,
        None => {
            info!("未指定設定檔，使用預設值");
            ServerConfig::default()
        }
    };

    let listener = TcpListener::bind(&config.bind_address).await?;
    info!("Telnet 伺服器已啟動: {}", listener.local_addr()?);

    telserver::serve(listener, Arc::new(config)).await;
    Ok(())
}

fn config_path() -> Option<PathBuf> {
    env::args_os()
        .nth(1)
        .or_else(|| env::var_os(CONFIG_ENV))
        .map(PathBuf::from)
}
