//! Telnet 協定常數與列舉
//!
//! 實作 RFC 854 / RFC 855 的命令與選項編號。
//! 未知的線上數值一律原樣保留於 `Unknown(u8)`，不視為錯誤。

use std::fmt;

/// Telnet IAC (Interpret As Command) - 0xFF
pub const IAC: u8 = 255;

/// 子協商資料的固定容量（位元組）
pub const SUBNEGOTIATION_CAPACITY: usize = 64;

/// 具名選項數量，選項支援位元集合只涵蓋 `0..OPTION_COUNT`
pub const OPTION_COUNT: usize = 50;

/// 單一封包編碼後的最大長度
///
/// `IAC SB <option> <type>` + 每個資料位元組都需跳脫時的兩倍長度 + `IAC SE`
pub const MAX_PACKET_LEN: usize = 4 + SUBNEGOTIATION_CAPACITY * 2 + 2;

/// Telnet 命令
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TelnetCommand {
    /// Sub-negotiation End
    Se,
    /// No Operation
    Nop,
    /// Data Mark
    DataMark,
    /// Break
    Break,
    /// Interrupt Process
    InterruptProcess,
    /// Abort Output
    AbortOutput,
    /// Are You There
    AreYouThere,
    /// Erase Character
    EraseCharacter,
    /// Erase Line
    EraseLine,
    /// Go Ahead
    GoAhead,
    /// Sub-negotiation Begin
    Sb,
    /// Will
    Will,
    /// Won't
    Wont,
    /// Do
    Do,
    /// Don't
    Dont,
    /// IAC 本身（資料中跳脫的 0xFF）
    Iac,
    /// 未定義的命令位元組
    Unknown(u8),
}

impl TelnetCommand {
    /// 從位元組解析 Telnet 命令
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            240 => Self::Se,
            241 => Self::Nop,
            242 => Self::DataMark,
            243 => Self::Break,
            244 => Self::InterruptProcess,
            245 => Self::AbortOutput,
            246 => Self::AreYouThere,
            247 => Self::EraseCharacter,
            248 => Self::EraseLine,
            249 => Self::GoAhead,
            250 => Self::Sb,
            251 => Self::Will,
            252 => Self::Wont,
            253 => Self::Do,
            254 => Self::Dont,
            255 => Self::Iac,
            other => Self::Unknown(other),
        }
    }

    /// 獲取命令的位元組值
    pub fn as_byte(&self) -> u8 {
        match self {
            Self::Se => 240,
            Self::Nop => 241,
            Self::DataMark => 242,
            Self::Break => 243,
            Self::InterruptProcess => 244,
            Self::AbortOutput => 245,
            Self::AreYouThere => 246,
            Self::EraseCharacter => 247,
            Self::EraseLine => 248,
            Self::GoAhead => 249,
            Self::Sb => 250,
            Self::Will => 251,
            Self::Wont => 252,
            Self::Do => 253,
            Self::Dont => 254,
            Self::Iac => 255,
            Self::Unknown(b) => *b,
        }
    }

    /// WILL / WONT / DO / DONT
    pub fn is_negotiation(&self) -> bool {
        matches!(self, Self::Will | Self::Wont | Self::Do | Self::Dont)
    }

    /// 命令名稱
    pub fn name(&self) -> &'static str {
        match self {
            Self::Se => "SE",
            Self::Nop => "NOP",
            Self::DataMark => "DM",
            Self::Break => "BRK",
            Self::InterruptProcess => "IP",
            Self::AbortOutput => "AO",
            Self::AreYouThere => "AYT",
            Self::EraseCharacter => "EC",
            Self::EraseLine => "EL",
            Self::GoAhead => "GA",
            Self::Sb => "SB",
            Self::Will => "WILL",
            Self::Wont => "WONT",
            Self::Do => "DO",
            Self::Dont => "DONT",
            Self::Iac => "IAC",
            Self::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for TelnetCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 子協商類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubnegotiationType {
    Is,
    Send,
    Unknown(u8),
}

impl SubnegotiationType {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Self::Is,
            1 => Self::Send,
            other => Self::Unknown(other),
        }
    }

    pub fn as_byte(&self) -> u8 {
        match self {
            Self::Is => 0,
            Self::Send => 1,
            Self::Unknown(b) => *b,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Is => "IS",
            Self::Send => "SEND",
            Self::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for SubnegotiationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 產生 `TelnetOption` 列舉及其轉換表
///
/// 每一列為 `變體 = 編號 => "名稱"`，編號必須為 `0..OPTION_COUNT` 且連續。
macro_rules! telnet_options {
    ($($(#[$doc:meta])* $variant:ident = $value:literal => $name:literal,)+) => {
        /// Telnet 選項
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TelnetOption {
            $($(#[$doc])* $variant,)+
            /// 未定義的選項位元組
            Unknown(u8),
        }

        impl TelnetOption {
            /// 全部具名選項，依編號排序
            pub const ALL: [TelnetOption; OPTION_COUNT] = [$(Self::$variant,)+];

            /// 從位元組解析 Telnet 選項
            pub fn from_byte(byte: u8) -> Self {
                match byte {
                    $($value => Self::$variant,)+
                    other => Self::Unknown(other),
                }
            }

            /// 獲取選項的位元組值
            pub fn as_byte(&self) -> u8 {
                match self {
                    $(Self::$variant => $value,)+
                    Self::Unknown(b) => *b,
                }
            }

            /// 選項名稱
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                    Self::Unknown(_) => "UNKNOWN",
                }
            }
        }
    };
}

telnet_options! {
    /// RFC 856
    Binary = 0 => "BINARY",
    /// RFC 857
    Echo = 1 => "ECHO",
    Reconnection = 2 => "RECONNECTION",
    /// RFC 858
    SuppressGoAhead = 3 => "SUPPRESS GO AHEAD",
    MsgSize = 4 => "MSG SIZE",
    /// RFC 859
    Status = 5 => "STATUS",
    /// RFC 860
    TimingMark = 6 => "TIMING MARK",
    Rcte = 7 => "REMOTE CONTROLLED TRANSMISSION AND ECHO",
    OutputLineWidth = 8 => "OUTPUT LINE WIDTH",
    OutputPageSize = 9 => "OUTPUT PAGE SIZE",
    OutputCrDisposition = 10 => "OUTPUT CR DISPOSITION",
    OutputHorizontalTab = 11 => "OUTPUT HORIZONTAL TAB",
    OutputHorizTabDisp = 12 => "OUTPUT HORIZONTAL TAB DISP",
    OutputFormFeed = 13 => "OUTPUT FORM FEED",
    OutputVerticalTab = 14 => "OUTPUT VERTICAL TAB",
    OutputVertTabDisp = 15 => "OUTPUT VERTICAL TAB DISP",
    OutputLineFeed = 16 => "OUTPUT LINE FEED",
    ExtendedAscii = 17 => "EXTENDED ASCII",
    Logout = 18 => "LOGOUT",
    ByteMacro = 19 => "BYTE MACRO",
    DataEntry = 20 => "DATA ENTRY",
    Supdup = 21 => "SUPDUP",
    SupdupOutput = 22 => "SUPDUP OUTPUT",
    SendLocation = 23 => "SEND LOCATION",
    /// RFC 1091
    TerminalType = 24 => "TERMINAL TYPE",
    EndOfRecord = 25 => "END OF RECORD",
    Tacacs = 26 => "TACACS",
    OutputMarking = 27 => "OUTPUT MARKING",
    TerminalLocation = 28 => "TERMINAL LOCATION",
    Tn3270 = 29 => "TN3270",
    X3Pad = 30 => "X3 PAD",
    /// RFC 1073 (NAWS)
    WindowSize = 31 => "WINDOW SIZE",
    TerminalSpeed = 32 => "TERMINAL SPEED",
    FlowControl = 33 => "FLOW CONTROL",
    /// RFC 1184
    LineMode = 34 => "LINE MODE",
    XDisplayLocation = 35 => "X DISPLAY LOCATION",
    Environ = 36 => "ENV",
    Authentication = 37 => "AUTHENTICATION",
    Encryption = 38 => "ENCRYPTION",
    /// RFC 1572
    NewEnviron = 39 => "NEW ENVIRON",
    Tn3270e = 40 => "TN3270E",
    Xauth = 41 => "XAUTH",
    /// RFC 2066
    Charset = 42 => "CHARSET",
    RemoteSerialPort = 43 => "REMOTE SERIAL PORT",
    /// RFC 2217
    ComPortControl = 44 => "COM PORT CONTROL",
    SuppressLocalEcho = 45 => "SUPPRESS LOCAL ECHO",
    StartTls = 46 => "START TLS",
    Kermit = 47 => "KERMIT",
    SendUrl = 48 => "SEND URL",
    ForwardX = 49 => "FORWARD X",
}

impl TelnetOption {
    /// 選項在支援位元集合中的索引，未知選項為 `None`
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Unknown(_) => None,
            known => Some(known.as_byte() as usize),
        }
    }

    /// 以名稱查詢選項（不分大小寫，空白、底線與連字號視為相同）
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim();
        Self::ALL.iter().copied().find(|option| {
            let known = option.name();
            known.len() == wanted.len()
                && known.bytes().zip(wanted.bytes()).all(|(a, b)| {
                    let b = match b {
                        b'_' | b'-' => b' ',
                        other => other.to_ascii_uppercase(),
                    };
                    a == b
                })
        })
    }
}

impl fmt::Display for TelnetOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
