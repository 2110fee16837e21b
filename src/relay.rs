use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use tokio::net::UdpSocket;

/// Receive capacity per datagram. Longer payloads are truncated by the socket.
pub const BUFFER_SIZE: usize = 1024;

/// Sending side of the relay, held by the HTTP handlers.
#[derive(Debug, Clone, Copy)]
pub struct RelayClient {
    target: SocketAddr,
}

impl RelayClient {
    pub fn new(target: SocketAddr) -> Self {
        RelayClient { target }
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Send one payload as a single datagram from a fresh ephemeral socket.
    /// No acknowledgement is expected.
    pub async fn send(&self, payload: &[u8]) -> io::Result<usize> {
        let local: SocketAddr = if self.target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(local).await?;
        socket.send_to(payload, self.target).await
    }
}

/// Bind the receiving endpoint.
pub async fn bind(addr: SocketAddr) -> io::Result<UdpSocket> {
    UdpSocket::bind(addr).await
}
