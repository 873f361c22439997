//! Telnet 示範伺服器
//!
//! 以 `telcore` 為每條 TCP 連線維護一個會話：
//! - `config`: JSON 設定檔
//! - `connection`: 單一連線的讀取、自動回覆與回送
//! - `server`: 監聽迴圈

pub mod config;
pub mod connection;
pub mod error;
pub mod server;

pub use config::{OptionSpec, ServerConfig};
pub use connection::{handle_connection, process_chunk, ConnectionStats};
pub use error::ServerError;
pub use server::serve;
