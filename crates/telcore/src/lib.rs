//! Telnet Core Library
//!
//! 不使用動態配置的 Telnet (RFC 854) 會話引擎：
//! - `protocol`: 命令、選項與子協商類型常數
//! - `packet`: 固定容量的封包模型
//! - `session`: 會話狀態、選項支援與子協商自動回覆設定
//! - `reader`: 原地壓縮緩衝區的解碼狀態機
//! - `response`: 選項協商的自動回覆策略
//! - `writer`: 封包編碼與應用資料的 IAC 跳脫

pub mod error;
pub mod packet;
pub mod protocol;
pub mod reader;
pub mod response;
pub mod session;
pub mod writer;

pub use error::TelnetError;
pub use packet::Packet;
pub use protocol::{
    SubnegotiationType, TelnetCommand, TelnetOption, IAC, MAX_PACKET_LEN, OPTION_COUNT,
    SUBNEGOTIATION_CAPACITY,
};
pub use reader::PacketCallback;
pub use response::auto_response;
pub use session::{ParseState, Session};
pub use writer::encode_packet;
