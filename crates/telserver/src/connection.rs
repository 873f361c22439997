//! 單一客戶端連線處理
//!
//! 每條連線擁有自己的 [`Session`]，使用者資料為對端位址。
//! 讀入的資料在固定大小的緩衝區中原地解碼，自動回覆先累積在
//! `BytesMut` 中，處理完一次讀取後才寫回 socket。

use std::net::SocketAddr;

use bytes::BytesMut;
use telcore::{Packet, Session, TelnetCommand};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::error::ServerError;

/// 連線結束時的統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionStats {
    /// 從 socket 讀到的位元組數
    pub bytes_received: usize,
    /// 去除 Telnet 命令後的應用資料位元組數
    pub payload_bytes: usize,
    /// 寫回 socket 的位元組數
    pub bytes_sent: usize,
}

/// 服務一條連線直到對端關閉
pub async fn handle_connection<S>(
    mut stream: S,
    peer: SocketAddr,
    config: &ServerConfig,
) -> Result<ConnectionStats, ServerError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut session: Session<'_, SocketAddr> = Session::new();
    config.configure(&mut session)?;
    session.set_user_data(Some(peer));

    let mut buffer = vec![0u8; config.read_buffer_size];
    let mut outbound = BytesMut::with_capacity(config.read_buffer_size);
    let mut stats = ConnectionStats::default();

    loop {
        let n = stream.read(&mut buffer).await?;
        if n == 0 {
            info!("客戶端 {} 已斷線", peer);
            break;
        }
        stats.bytes_received += n;
        stats.payload_bytes +=
            process_chunk(&mut session, &mut buffer[..n], &mut outbound, config.echo_payload);

        if !outbound.is_empty() {
            stream.write_all(&outbound).await?;
            stream.flush().await?;
            stats.bytes_sent += outbound.len();
            outbound.clear();
        }
    }

    Ok(stats)
}

/// 解碼一次讀到的資料，回覆與回送內容附加到 `outbound`
///
/// 回傳應用資料長度，資料已壓縮到 `data` 的開頭。
pub fn process_chunk(
    session: &mut Session<'_, SocketAddr>,
    data: &mut [u8],
    outbound: &mut BytesMut,
    echo: bool,
) -> usize {
    let mut callback = log_packet;
    let len = session.read(data, Some(&mut callback), |_, bytes| {
        outbound.extend_from_slice(bytes)
    });

    if len > 0 {
        debug!(
            "收到 {} 位元組資料: {:?}",
            len,
            String::from_utf8_lossy(&data[..len])
        );
        if echo {
            session.write(&data[..len], |_, bytes| outbound.extend_from_slice(bytes));
        }
    }
    len
}

/// 記錄收到的命令，並讓自動回覆照常進行
fn log_packet(session: &Session<'_, SocketAddr>, packet: &Packet) -> bool {
    let peer = session
        .user_data()
        .map_or_else(String::new, ToString::to_string);

    match packet.command {
        TelnetCommand::Sb => info!(
            "{} <IAC SB {} {} {:?}>",
            peer,
            packet.option,
            packet.subnegotiation_type,
            String::from_utf8_lossy(packet.subnegotiation_data())
        ),
        command if command.is_negotiation() => {
            info!("{} <IAC {} {}>", peer, command, packet.option)
        }
        command => info!("{} <IAC {}>", peer, command),
    }
    true
}
