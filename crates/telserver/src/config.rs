//! 伺服器設定
//!
//! 以 JSON 檔描述，所有欄位皆可省略：
//! ```json
//! {
//!   "bind_address": "0.0.0.0:2323",
//!   "read_buffer_size": 256,
//!   "supported_options": ["SUPPRESS_GO_AHEAD", 1],
//!   "terminal_type": "XTERM",
//!   "echo_payload": true
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use telcore::{Session, TelnetOption};

use crate::error::ServerError;

/// 讀取緩衝區大小下限（至少容納一個完整的協商命令）
pub const MIN_READ_BUFFER: usize = 16;
/// 讀取緩衝區大小上限
pub const MAX_READ_BUFFER: usize = 64 * 1024;

/// 設定檔中的選項：名稱或編號皆可
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionSpec {
    Code(u8),
    Name(String),
}

impl OptionSpec {
    /// 轉換為可支援的 Telnet 選項
    pub fn resolve(&self) -> Result<TelnetOption, ServerError> {
        let option = match self {
            OptionSpec::Code(code) => TelnetOption::from_byte(*code),
            OptionSpec::Name(name) => TelnetOption::from_name(name)
                .ok_or_else(|| ServerError::Config(format!("未知的選項名稱: {}", name)))?,
        };
        if option.index().is_none() {
            return Err(ServerError::Config(format!(
                "選項編號 {} 超出支援範圍",
                option.as_byte()
            )));
        }
        Ok(option)
    }
}

impl From<TelnetOption> for OptionSpec {
    fn from(option: TelnetOption) -> Self {
        OptionSpec::Name(option.name().to_string())
    }
}

/// 伺服器設定
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 監聽位址
    pub bind_address: String,
    /// 每次讀取的緩衝區大小
    pub read_buffer_size: usize,
    /// 願意啟用的選項
    pub supported_options: Vec<OptionSpec>,
    /// 回覆 `SB TERMINAL-TYPE SEND` 的終端類型
    pub terminal_type: Option<String>,
    /// 是否將應用資料回送給客戶端
    pub echo_payload: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:2323".to_string(),
            read_buffer_size: 256,
            supported_options: vec![TelnetOption::SuppressGoAhead.into()],
            terminal_type: None,
            echo_payload: false,
        }
    }
}

impl ServerConfig {
    /// 從 JSON 字串解析並檢查設定
    pub fn from_json(content: &str) -> Result<Self, ServerError> {
        let config: ServerConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 從檔案載入設定
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ServerError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        tracing::info!("已載入設定檔: {}", path.display());
        Ok(config)
    }

    /// 檢查各欄位是否合理
    pub fn validate(&self) -> Result<(), ServerError> {
        if !(MIN_READ_BUFFER..=MAX_READ_BUFFER).contains(&self.read_buffer_size) {
            return Err(ServerError::Config(format!(
                "read_buffer_size 必須介於 {} 與 {} 之間，目前為 {}",
                MIN_READ_BUFFER, MAX_READ_BUFFER, self.read_buffer_size
            )));
        }
        self.resolved_options()?;
        Ok(())
    }

    /// 解析後的支援選項
    pub fn resolved_options(&self) -> Result<Vec<TelnetOption>, ServerError> {
        self.supported_options.iter().map(OptionSpec::resolve).collect()
    }

    /// 依設定初始化一個會話
    ///
    /// 終端類型回覆直接借用設定中的字串，會話不得比設定活得久。
    pub fn configure<'a, U>(&'a self, session: &mut Session<'a, U>) -> Result<(), ServerError> {
        for option in self.resolved_options()? {
            session.set_option(option, true)?;
        }
        if let Some(terminal) = &self.terminal_type {
            session.set_subnegotiation_response(
                TelnetOption::TerminalType,
                Some(terminal.as_bytes()),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, "0.0.0.0:2323");
        assert_eq!(config.read_buffer_size, 256);
        assert_eq!(
            config.resolved_options().unwrap(),
            vec![TelnetOption::SuppressGoAhead]
        );
        assert!(!config.echo_payload);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = ServerConfig::from_json("{}").unwrap();
        assert_eq!(config.read_buffer_size, 256);
        assert!(config.terminal_type.is_none());
    }

    #[test]
    fn test_options_by_name_and_code() {
        let config = ServerConfig::from_json(
            r#"{ "supported_options": ["echo", "terminal-type", 31], "echo_payload": true }"#,
        )
        .unwrap();
        assert_eq!(
            config.resolved_options().unwrap(),
            vec![
                TelnetOption::Echo,
                TelnetOption::TerminalType,
                TelnetOption::WindowSize
            ]
        );
        assert!(config.echo_payload);
    }

    #[test]
    fn test_unknown_option_name_rejected() {
        let err = ServerConfig::from_json(r#"{ "supported_options": ["TELEPATHY"] }"#).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn test_out_of_range_option_code_rejected() {
        let err = ServerConfig::from_json(r#"{ "supported_options": [200] }"#).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn test_read_buffer_bounds() {
        let err = ServerConfig::from_json(r#"{ "read_buffer_size": 0 }"#).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
        assert!(ServerConfig::from_json(r#"{ "read_buffer_size": 4096 }"#).is_ok());
    }

    #[test]
    fn test_malformed_json() {
        let err = ServerConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ServerError::ConfigFormat(_)));
    }

    #[test]
    fn test_configure_session() {
        let config = ServerConfig {
            supported_options: vec![OptionSpec::Code(1), TelnetOption::Binary.into()],
            terminal_type: Some("VT100".to_string()),
            ..Default::default()
        };
        let mut session: Session<'_> = Session::new();
        config.configure(&mut session).unwrap();

        assert!(session.get_option(TelnetOption::Echo));
        assert!(session.get_option(TelnetOption::Binary));
        assert!(!session.get_option(TelnetOption::SuppressGoAhead));
        assert_eq!(
            session.get_subnegotiation_response(TelnetOption::TerminalType),
            Some(&b"VT100"[..])
        );
    }

    #[test]
    fn test_oversized_terminal_type_rejected() {
        let config = ServerConfig {
            terminal_type: Some("X".repeat(100)),
            ..Default::default()
        };
        let mut session: Session<'_> = Session::new();
        let err = config.configure(&mut session).unwrap_err();
        assert!(matches!(err, ServerError::Telnet(_)));
    }

    #[test]
    fn test_serialize_roundtrip_keeps_names() {
        let json = serde_json::to_string(&ServerConfig::default()).unwrap();
        assert!(json.contains("\"SUPPRESS GO AHEAD\""));
        let back = ServerConfig::from_json(&json).unwrap();
        assert_eq!(back.supported_options, ServerConfig::default().supported_options);
    }
}
