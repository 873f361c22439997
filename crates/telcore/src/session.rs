//! Telnet 會話狀態
//!
//! 一個 [`Session`] 對應一條邏輯連線，保存：
//! - 解析器狀態與正在組裝的封包
//! - 本端宣告支援的選項（位元集合）
//! - 自動回覆 `SB <option> SEND` 時使用的子協商資料（借用，不複製）
//! - 使用者自訂的關聯資料

use tracing::debug;

use crate::error::TelnetError;
use crate::packet::Packet;
use crate::protocol::{TelnetOption, OPTION_COUNT, SUBNEGOTIATION_CAPACITY};

/// 解析器狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseState {
    /// 一般資料
    #[default]
    Ready,
    /// 已讀到 IAC，等待命令位元組
    InCommand,
    /// 已讀到 WILL/WONT/DO/DONT，等待選項位元組
    InOption,
    /// 已讀到 SB，等待選項位元組
    InSubnegotiationOption,
    /// 等待子協商類型（IS / SEND ...）
    InSubnegotiationType,
    /// 收集子協商資料直到 IAC SE
    InSubnegotiationValue,
    /// 子協商資料中讀到 IAC
    InSbIac,
}

/// Telnet 會話
///
/// `'a` 為子協商自動回覆資料的借用期間；`U` 為使用者關聯資料的型別。
///
/// # Example
/// ```
/// use telcore::{Session, TelnetOption};
///
/// let mut session: Session<'_> = Session::new();
/// session.set_supported_options([TelnetOption::SuppressGoAhead]);
/// assert!(session.get_option(TelnetOption::SuppressGoAhead));
/// assert!(!session.get_option(TelnetOption::Echo));
/// ```
#[derive(Debug, Clone)]
pub struct Session<'a, U = ()> {
    pub(crate) state: ParseState,
    pub(crate) packet: Packet,
    options: u64,
    subnegotiation_responses: [Option<&'a [u8]>; OPTION_COUNT],
    user_data: Option<U>,
}

impl<'a, U> Session<'a, U> {
    /// 創建新的會話，所有選項預設為不支援
    pub fn new() -> Self {
        Self {
            state: ParseState::Ready,
            packet: Packet::new(),
            options: 0,
            subnegotiation_responses: [None; OPTION_COUNT],
            user_data: None,
        }
    }

    /// 重設為初始狀態（新連線時呼叫）
    ///
    /// 同時清除選項、子協商回覆與使用者資料
    pub fn reset(&mut self) {
        self.state = ParseState::Ready;
        self.packet.reset();
        self.options = 0;
        self.subnegotiation_responses = [None; OPTION_COUNT];
        self.user_data = None;
    }

    /// 目前的解析器狀態
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// 正在組裝（或剛送出）的封包
    pub fn packet(&self) -> &Packet {
        &self.packet
    }

    pub fn user_data(&self) -> Option<&U> {
        self.user_data.as_ref()
    }

    pub fn user_data_mut(&mut self) -> Option<&mut U> {
        self.user_data.as_mut()
    }

    pub fn set_user_data(&mut self, user_data: Option<U>) {
        self.user_data = user_data;
    }

    pub fn take_user_data(&mut self) -> Option<U> {
        self.user_data.take()
    }

    /// 本端是否宣告支援此選項，未知選項一律為 `false`
    pub fn get_option(&self, option: TelnetOption) -> bool {
        match option.index() {
            Some(i) => self.options & (1u64 << i) != 0,
            None => false,
        }
    }

    /// 設定本端是否支援此選項
    pub fn set_option(&mut self, option: TelnetOption, supported: bool) -> Result<(), TelnetError> {
        let i = option.index().ok_or(TelnetError::UnsupportedOption(option))?;
        if supported {
            self.options |= 1u64 << i;
        } else {
            self.options &= !(1u64 << i);
        }
        Ok(())
    }

    /// 一次宣告多個支援的選項，其餘選項維持原值
    ///
    /// 回傳實際套用的選項數量（未知選項會被略過）
    pub fn set_supported_options<I>(&mut self, options: I) -> usize
    where
        I: IntoIterator<Item = TelnetOption>,
    {
        let mut applied = 0;
        for option in options {
            match self.set_option(option, true) {
                Ok(()) => applied += 1,
                Err(e) => debug!("略過選項: {}", e),
            }
        }
        applied
    }

    /// 取得此選項的子協商自動回覆資料
    pub fn get_subnegotiation_response(&self, option: TelnetOption) -> Option<&'a [u8]> {
        option
            .index()
            .and_then(|i| self.subnegotiation_responses[i])
    }

    /// 設定（或以 `None` 清除）收到 `SB <option> SEND` 時自動回覆的資料
    ///
    /// 資料不會被複製，呼叫端需確保其存活期間涵蓋整個會話
    pub fn set_subnegotiation_response(
        &mut self,
        option: TelnetOption,
        response: Option<&'a [u8]>,
    ) -> Result<(), TelnetError> {
        let i = option.index().ok_or(TelnetError::UnsupportedOption(option))?;
        if let Some(data) = response {
            if data.len() > SUBNEGOTIATION_CAPACITY {
                return Err(TelnetError::SubnegotiationOverflow {
                    len: data.len(),
                    capacity: SUBNEGOTIATION_CAPACITY,
                });
            }
        }
        self.subnegotiation_responses[i] = response;
        Ok(())
    }
}

impl<U> Default for Session<'_, U> {
    fn default() -> Self {
        Self::new()
    }
}
