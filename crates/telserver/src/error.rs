//! 伺服器錯誤類型

use std::io;

use telcore::TelnetError;
use thiserror::Error;

/// Telnet 伺服器錯誤
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O 錯誤: {0}")]
    Io(#[from] io::Error),

    #[error("設定錯誤: {0}")]
    Config(String),

    #[error("設定檔格式錯誤: {0}")]
    ConfigFormat(#[from] serde_json::Error),

    #[error("Telnet 設定失敗: {0}")]
    Telnet(#[from] TelnetError),
}
