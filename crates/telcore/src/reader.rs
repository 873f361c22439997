//! Telnet 解碼狀態機
//!
//! [`Session::read`] 逐位元組掃描輸入緩衝區：
//! - 控制序列從緩衝區中移除，剩餘的應用資料原地往前壓縮並保持原順序
//! - 每個完整封包交給回呼函式，再依 [`auto_response`] 自動回覆
//! - 狀態保存在會話中，序列可以跨多次呼叫
//!
//! 巢狀呼叫深度固定：`read` → 回呼 / `write_packet` → `writer`

use tracing::{debug, trace, warn};

use crate::packet::Packet;
use crate::protocol::{SubnegotiationType, TelnetCommand, TelnetOption, IAC, SUBNEGOTIATION_CAPACITY};
use crate::response::auto_response;
use crate::session::{ParseState, Session};

/// 封包回呼：回傳 `false` 可阻止該封包的自動回覆
pub type PacketCallback<'c, 'a, U> = dyn FnMut(&Session<'a, U>, &Packet) -> bool + 'c;

impl<'a, U> Session<'a, U> {
    /// 處理收到的資料，回傳剩餘應用資料的長度
    ///
    /// `data[..回傳值]` 為去除 Telnet 控制序列後的資料，其後的內容已無意義。
    ///
    /// # Example
    /// ```
    /// use telcore::{Session, TelnetOption};
    ///
    /// let mut session: Session<'_> = Session::new();
    /// session.set_option(TelnetOption::SuppressGoAhead, true).unwrap();
    ///
    /// // "hi" + IAC DO SUPPRESS-GO-AHEAD + "!"
    /// let mut data = [b'h', b'i', 255, 253, 3, b'!'];
    /// let mut replies = Vec::new();
    /// let len = session.read(&mut data, None, |_, bytes| replies.extend_from_slice(bytes));
    ///
    /// assert_eq!(&data[..len], b"hi!");
    /// assert_eq!(replies, vec![255, 251, 3]); // IAC WILL SUPPRESS-GO-AHEAD
    /// ```
    pub fn read<W>(
        &mut self,
        data: &mut [u8],
        mut callback: Option<&mut PacketCallback<'_, 'a, U>>,
        mut writer: W,
    ) -> usize
    where
        W: FnMut(&Session<'a, U>, &[u8]),
    {
        let mut kept = 0;
        let mut i = 0;

        while i < data.len() {
            let byte = data[i];
            let mut keep = false;
            let mut consumed = true;

            match self.state {
                ParseState::Ready => {
                    if byte == IAC {
                        self.packet.reset();
                        self.state = ParseState::InCommand;
                    } else {
                        keep = true;
                    }
                }
                ParseState::InCommand => {
                    if byte == IAC {
                        // IAC IAC：保留一個 0xFF 作為資料
                        keep = true;
                        self.state = ParseState::Ready;
                    } else {
                        let command = TelnetCommand::from_byte(byte);
                        self.packet.command = command;
                        if command.is_negotiation() {
                            self.state = ParseState::InOption;
                        } else if command == TelnetCommand::Sb {
                            self.state = ParseState::InSubnegotiationOption;
                        } else {
                            self.dispatch(callback.as_deref_mut(), &mut writer);
                            self.state = ParseState::Ready;
                        }
                    }
                }
                ParseState::InOption => {
                    self.packet.option = TelnetOption::from_byte(byte);
                    self.dispatch(callback.as_deref_mut(), &mut writer);
                    self.state = ParseState::Ready;
                }
                ParseState::InSubnegotiationOption => {
                    self.packet.option = TelnetOption::from_byte(byte);
                    self.state = ParseState::InSubnegotiationType;
                }
                ParseState::InSubnegotiationType => {
                    self.packet.subnegotiation_type = SubnegotiationType::from_byte(byte);
                    self.state = ParseState::InSubnegotiationValue;
                }
                ParseState::InSubnegotiationValue => {
                    if byte == IAC {
                        self.state = ParseState::InSbIac;
                    } else {
                        self.append_subnegotiation(byte);
                    }
                }
                ParseState::InSbIac => {
                    if byte == IAC {
                        self.append_subnegotiation(IAC);
                        self.state = ParseState::InSubnegotiationValue;
                    } else if byte == TelnetCommand::Se.as_byte() {
                        self.dispatch(callback.as_deref_mut(), &mut writer);
                        self.state = ParseState::Ready;
                    } else {
                        // 子協商未以 SE 結束就開始新命令：先送出目前封包，
                        // 再以 InCommand 重新處理此位元組
                        warn!(
                            option = %self.packet.option,
                            command = byte,
                            "子協商未以 IAC SE 結束"
                        );
                        self.dispatch(callback.as_deref_mut(), &mut writer);
                        self.packet.reset();
                        self.state = ParseState::InCommand;
                        consumed = false;
                    }
                }
            }

            if keep {
                data[kept] = byte;
                kept += 1;
            }
            if consumed {
                i += 1;
            }
        }

        kept
    }

    fn append_subnegotiation(&mut self, byte: u8) {
        let already_truncated = self.packet.is_truncated();
        if !self.packet.push_subnegotiation_byte(byte) && !already_truncated {
            warn!(
                option = %self.packet.option,
                capacity = SUBNEGOTIATION_CAPACITY,
                "子協商資料超過容量，多餘位元組將被丟棄"
            );
        }
    }

    /// 封包完成：呼叫回呼，允許時送出自動回覆
    fn dispatch<W>(&mut self, callback: Option<&mut PacketCallback<'_, 'a, U>>, writer: &mut W)
    where
        W: FnMut(&Session<'a, U>, &[u8]),
    {
        trace!(
            command = %self.packet.command,
            option = %self.packet.option,
            length = self.packet.subnegotiation_length(),
            "收到封包"
        );

        let allowed = match callback {
            Some(callback) => callback(&*self, &self.packet),
            None => true,
        };
        if !allowed {
            return;
        }

        if let Some(reply) = auto_response(&*self, &self.packet) {
            debug!(
                command = %reply.command,
                option = %reply.option,
                "自動回覆"
            );
            self.write_packet(&reply, &mut *writer);
        }
    }
}
