//! Telnet 編碼
//!
//! - [`encode_packet`]：將封包序列化到固定大小的緩衝區
//! - [`Session::write_packet`]：編碼後一次交給輸出函式
//! - [`Session::write`]：應用資料的 IAC 跳脫（IAC → IAC IAC），分段輸出不另配置緩衝區

use crate::packet::Packet;
use crate::protocol::{TelnetCommand, IAC, MAX_PACKET_LEN};
use crate::session::Session;

const ESCAPED_IAC: [u8; 2] = [IAC, IAC];

/// 將封包編碼到 `buffer`，回傳使用的位元組數
///
/// 子協商資料中的 0xFF 會被加倍，確保對端能正確還原
pub fn encode_packet(packet: &Packet, buffer: &mut [u8; MAX_PACKET_LEN]) -> usize {
    let mut len = 0;
    let mut put = |byte: u8| {
        buffer[len] = byte;
        len += 1;
    };

    put(IAC);
    put(packet.command.as_byte());
    match packet.command {
        TelnetCommand::Sb => {
            put(packet.option.as_byte());
            put(packet.subnegotiation_type.as_byte());
            for &byte in packet.subnegotiation_data() {
                put(byte);
                if byte == IAC {
                    put(IAC);
                }
            }
            put(IAC);
            put(TelnetCommand::Se.as_byte());
        }
        command if command.is_negotiation() => put(packet.option.as_byte()),
        _ => {}
    }
    len
}

impl<'a, U> Session<'a, U> {
    /// 編碼封包並呼叫 `writer` 一次送出
    pub fn write_packet<W>(&self, packet: &Packet, mut writer: W)
    where
        W: FnMut(&Session<'a, U>, &[u8]),
    {
        let mut buffer = [0u8; MAX_PACKET_LEN];
        let len = encode_packet(packet, &mut buffer);
        writer(self, &buffer[..len]);
    }

    /// 送出應用資料，將每個 0xFF 跳脫為 `IAC IAC`
    ///
    /// 資料依跳脫點分段交給 `writer`，最後一段（可能為空）一定會送出一次。
    /// 空資料不做任何事。
    ///
    /// # Example
    /// ```
    /// use telcore::Session;
    ///
    /// let session: Session<'_> = Session::new();
    /// let mut out = Vec::new();
    /// session.write(&[b'a', 0xFF, b'b'], |_, bytes| out.extend_from_slice(bytes));
    /// assert_eq!(out, vec![b'a', 0xFF, 0xFF, b'b']);
    /// ```
    pub fn write<W>(&self, data: &[u8], mut writer: W)
    where
        W: FnMut(&Session<'a, U>, &[u8]),
    {
        if data.is_empty() {
            return;
        }

        let mut start = 0;
        for (i, &byte) in data.iter().enumerate() {
            if byte == IAC {
                if start < i {
                    writer(self, &data[start..i]);
                }
                writer(self, &ESCAPED_IAC);
                start = i + 1;
            }
        }
        writer(self, &data[start..]);
    }
}
