//! Telnet 封包模型
//!
//! 一個封包代表一個已解析或待送出的控制單元，資料區為固定容量，不做動態配置。

use crate::error::TelnetError;
use crate::protocol::{SubnegotiationType, TelnetCommand, TelnetOption, SUBNEGOTIATION_CAPACITY};

/// Telnet 封包
///
/// 子協商資料長度永遠不會超過 [`SUBNEGOTIATION_CAPACITY`]。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub command: TelnetCommand,
    pub option: TelnetOption,
    pub subnegotiation_type: SubnegotiationType,
    subnegotiation_length: usize,
    subnegotiation_data: [u8; SUBNEGOTIATION_CAPACITY],
    /// 遠端送來的子協商超過容量，多餘位元組已被丟棄
    truncated: bool,
}

impl Packet {
    /// 創建預設封包（NOP / BINARY / IS，無資料）
    pub const fn new() -> Self {
        Self {
            command: TelnetCommand::Nop,
            option: TelnetOption::Binary,
            subnegotiation_type: SubnegotiationType::Is,
            subnegotiation_length: 0,
            subnegotiation_data: [0; SUBNEGOTIATION_CAPACITY],
            truncated: false,
        }
    }

    /// 單一命令封包，例如 `IAC NOP`
    pub fn command(command: TelnetCommand) -> Self {
        Self {
            command,
            ..Self::new()
        }
    }

    /// 選項協商封包，例如 `IAC WILL ECHO`
    pub fn negotiation(command: TelnetCommand, option: TelnetOption) -> Self {
        Self {
            command,
            option,
            ..Self::new()
        }
    }

    /// 子協商封包 `IAC SB <option> <type> <data> IAC SE`
    ///
    /// # Example
    /// ```
    /// use telcore::{Packet, SubnegotiationType, TelnetOption};
    ///
    /// let packet = Packet::subnegotiation(
    ///     TelnetOption::TerminalType,
    ///     SubnegotiationType::Is,
    ///     b"VT100",
    /// ).unwrap();
    /// assert_eq!(packet.subnegotiation_data(), b"VT100");
    /// ```
    pub fn subnegotiation(
        option: TelnetOption,
        subnegotiation_type: SubnegotiationType,
        data: &[u8],
    ) -> Result<Self, TelnetError> {
        let mut packet = Self {
            command: TelnetCommand::Sb,
            option,
            subnegotiation_type,
            ..Self::new()
        };
        packet.set_subnegotiation_data(data)?;
        Ok(packet)
    }

    /// 重設為預設值
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// 目前的子協商資料
    pub fn subnegotiation_data(&self) -> &[u8] {
        &self.subnegotiation_data[..self.subnegotiation_length]
    }

    pub fn subnegotiation_length(&self) -> usize {
        self.subnegotiation_length
    }

    /// 取代子協商資料，超過容量時不做任何修改
    pub fn set_subnegotiation_data(&mut self, data: &[u8]) -> Result<(), TelnetError> {
        if data.len() > SUBNEGOTIATION_CAPACITY {
            return Err(TelnetError::SubnegotiationOverflow {
                len: data.len(),
                capacity: SUBNEGOTIATION_CAPACITY,
            });
        }
        self.subnegotiation_data[..data.len()].copy_from_slice(data);
        self.subnegotiation_data[data.len()..].fill(0);
        self.subnegotiation_length = data.len();
        Ok(())
    }

    /// 附加一個子協商位元組
    ///
    /// 容量已滿時丟棄該位元組、標記為截斷並回傳 `false`
    pub fn push_subnegotiation_byte(&mut self, byte: u8) -> bool {
        if self.subnegotiation_length >= SUBNEGOTIATION_CAPACITY {
            self.truncated = true;
            return false;
        }
        self.subnegotiation_data[self.subnegotiation_length] = byte;
        self.subnegotiation_length += 1;
        true
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl Default for Packet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_packet() {
        let packet = Packet::default();
        assert_eq!(packet.command, TelnetCommand::Nop);
        assert_eq!(packet.option, TelnetOption::Binary);
        assert_eq!(packet.subnegotiation_type, SubnegotiationType::Is);
        assert_eq!(packet.subnegotiation_length(), 0);
        assert!(packet.subnegotiation_data().is_empty());
        assert!(!packet.is_truncated());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut packet = Packet::negotiation(TelnetCommand::Do, TelnetOption::Echo);
        packet.push_subnegotiation_byte(b'x');
        packet.reset();
        let once = packet.clone();
        packet.reset();
        assert_eq!(packet, once);
        assert_eq!(packet, Packet::new());
    }

    #[test]
    fn test_push_stops_at_capacity() {
        let mut packet = Packet::new();
        for i in 0..SUBNEGOTIATION_CAPACITY {
            assert!(packet.push_subnegotiation_byte(i as u8));
        }
        assert!(!packet.is_truncated());

        // 第 65 個位元組被丟棄
        assert!(!packet.push_subnegotiation_byte(0xAA));
        assert!(packet.is_truncated());
        assert_eq!(packet.subnegotiation_length(), SUBNEGOTIATION_CAPACITY);
        assert_eq!(packet.subnegotiation_data()[63], 63);
    }

    #[test]
    fn test_set_data_rejects_oversize() {
        let mut packet = Packet::new();
        packet.set_subnegotiation_data(b"ANSI").unwrap();

        let big = [0u8; SUBNEGOTIATION_CAPACITY + 1];
        let err = packet.set_subnegotiation_data(&big).unwrap_err();
        assert_eq!(
            err,
            TelnetError::SubnegotiationOverflow {
                len: 65,
                capacity: 64
            }
        );
        // 原資料保持不變
        assert_eq!(packet.subnegotiation_data(), b"ANSI");
    }

    #[test]
    fn test_set_shorter_data_clears_tail() {
        let mut packet = Packet::new();
        packet.set_subnegotiation_data(b"XTERM").unwrap();
        packet.set_subnegotiation_data(b"VT").unwrap();
        assert_eq!(packet.subnegotiation_data(), b"VT");
    }

    #[test]
    fn test_subnegotiation_constructor() {
        let packet =
            Packet::subnegotiation(TelnetOption::TerminalType, SubnegotiationType::Send, &[]).unwrap();
        assert_eq!(packet.command, TelnetCommand::Sb);
        assert_eq!(packet.option, TelnetOption::TerminalType);
        assert_eq!(packet.subnegotiation_type, SubnegotiationType::Send);
        assert!(Packet::subnegotiation(
            TelnetOption::TerminalType,
            SubnegotiationType::Is,
            &[b'a'; 100]
        )
        .is_err());
    }
}
