//! 透過真實 TCP 連線測試監聽迴圈

use std::sync::Arc;

use telcore::IAC;
use telserver::{serve, ServerConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const WILL: u8 = 251;
const WONT: u8 = 252;
const DO: u8 = 253;

async fn start(config: ServerConfig) -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, Arc::new(config)));
    addr
}

#[tokio::test]
async fn negotiates_over_tcp() {
    let addr = start(ServerConfig::default()).await;
    let mut client = TcpStream::connect(addr).await.unwrap();

    client.write_all(&[IAC, DO, 3, IAC, DO, 1]).await.unwrap();
    let mut reply = [0u8; 6];
    client.read_exact(&mut reply).await.unwrap();
    assert_eq!(reply, [IAC, WILL, 3, IAC, WONT, 1]);
}

#[tokio::test]
async fn connections_have_independent_sessions() {
    let addr = start(ServerConfig {
        echo_payload: true,
        ..Default::default()
    })
    .await;

    let mut first = TcpStream::connect(addr).await.unwrap();
    let mut second = TcpStream::connect(addr).await.unwrap();

    // 第一條連線停在命令中途，不影響第二條
    first.write_all(&[IAC]).await.unwrap();
    second.write_all(b"hello").await.unwrap();
    let mut echoed = [0u8; 5];
    second.read_exact(&mut echoed).await.unwrap();
    assert_eq!(&echoed, b"hello");

    first.write_all(&[DO, 3, b'!']).await.unwrap();
    let mut reply = [0u8; 4];
    first.read_exact(&mut reply).await.unwrap();
    assert_eq!(reply, [IAC, WILL, 3, b'!']);
}
