//! TCP 監聽迴圈

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::connection::handle_connection;

/// 接受連線並為每條連線產生獨立的任務
///
/// 只在監聽 socket 本身失效前持續運作；單一連線的錯誤只會記錄下來。
pub async fn serve(listener: TcpListener, config: Arc<ServerConfig>) {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("接受連線失敗: {}", e);
                continue;
            }
        };

        if let Err(e) = stream.set_nodelay(true) {
            warn!("設定 TCP_NODELAY 失敗: {}", e);
        }
        info!("新的客戶端連線: {}", peer);

        let config = Arc::clone(&config);
        tokio::spawn(async move {
            match handle_connection(stream, peer, &config).await {
                Ok(stats) => info!(
                    "連線 {} 結束：收到 {} 位元組（應用資料 {}），送出 {} 位元組",
                    peer, stats.bytes_received, stats.payload_bytes, stats.bytes_sent
                ),
                Err(e) => warn!("連線 {} 發生錯誤: {}", peer, e),
            }
        });
    }
}
