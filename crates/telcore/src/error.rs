//! 錯誤型別
//!
//! 只有設定類操作（選項、子協商回覆、組裝封包）會回傳錯誤；
//! `read` / `write` 永不失敗，異常輸入以回傳值與 `Packet::is_truncated` 表達。

use thiserror::Error;

use crate::protocol::TelnetOption;

/// Telnet 核心錯誤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TelnetError {
    #[error("選項 {0} (編號 {code}) 超出支援範圍", code = .0.as_byte())]
    UnsupportedOption(TelnetOption),

    #[error("子協商資料過長: {len} 位元組 (上限 {capacity})")]
    SubnegotiationOverflow { len: usize, capacity: usize },
}
