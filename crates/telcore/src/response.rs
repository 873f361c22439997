//! 自動回覆策略
//!
//! 依 RFC 854 的協商對稱原則產生回覆：
//! - `WILL` → 支援則 `DO`，否則 `DONT`
//! - `WONT` → `DONT`
//! - `DO` → 支援則 `WILL`，否則 `WONT`
//! - `DONT` → `WONT`
//! - `SB <option> SEND` → 若已登錄回覆資料則 `SB <option> IS <data>`
//!
//! 其他命令不回覆。

use crate::packet::Packet;
use crate::protocol::{SubnegotiationType, TelnetCommand};
use crate::session::Session;

/// 計算收到 `packet` 後應自動送出的回覆封包
///
/// # Example
/// ```
/// use telcore::{auto_response, Packet, Session, TelnetCommand, TelnetOption};
///
/// let mut session: Session<'_> = Session::new();
/// session.set_option(TelnetOption::Echo, true).unwrap();
///
/// let will_echo = Packet::negotiation(TelnetCommand::Will, TelnetOption::Echo);
/// let reply = auto_response(&session, &will_echo).unwrap();
/// assert_eq!(reply.command, TelnetCommand::Do);
/// assert_eq!(reply.option, TelnetOption::Echo);
/// ```
pub fn auto_response<U>(session: &Session<'_, U>, packet: &Packet) -> Option<Packet> {
    let supported = session.get_option(packet.option);
    let command = match packet.command {
        TelnetCommand::Will if supported => TelnetCommand::Do,
        TelnetCommand::Will | TelnetCommand::Wont => TelnetCommand::Dont,
        TelnetCommand::Do if supported => TelnetCommand::Will,
        TelnetCommand::Do | TelnetCommand::Dont => TelnetCommand::Wont,
        TelnetCommand::Sb if packet.subnegotiation_type == SubnegotiationType::Send => {
            let data = session.get_subnegotiation_response(packet.option)?;
            return Packet::subnegotiation(packet.option, SubnegotiationType::Is, data).ok();
        }
        _ => return None,
    };
    Some(Packet::negotiation(command, packet.option))
}
