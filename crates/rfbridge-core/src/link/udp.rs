use std::io::ErrorKind;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use crate::config::RadioSettings;
use crate::error::{BridgeError, Result};
use crate::link::{LinkDirection, RadioLink};

/// Frames carried as UDP datagrams between two processes.
///
/// Stands in for the radio during development: run a second process (or the
/// `rfbridge send` bench tool) on the peer address and the service works
/// end-to-end without hardware. One datagram is one frame; datagrams longer
/// than the requested frame size are truncated by the read.
#[derive(Debug)]
pub struct UdpLink {
    socket: UdpSocket,
    peer: SocketAddr,
}

impl UdpLink {
    pub fn connect(bind: &str, peer: &str) -> Result<Self> {
        let socket = UdpSocket::bind(bind)?;
        socket.set_nonblocking(true)?;
        let peer = peer
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| BridgeError::Link(format!("peer address did not resolve: {peer}")))?;
        socket.connect(peer)?;
        Ok(Self { socket, peer })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }
}

impl RadioLink for UdpLink {
    fn configure(&mut self, _radio: &RadioSettings) -> Result<()> {
        tracing::debug!(peer = %self.peer, "udp link configured");
        Ok(())
    }

    // A socket is full-duplex; direction is tracked by the transaction
    // manager and needs no driver action here.
    fn set_mode(&mut self, _direction: LinkDirection) {}

    fn send(&mut self, frame: &[u8]) -> bool {
        match self.socket.send(frame) {
            Ok(n) => n == frame.len(),
            Err(e) => {
                tracing::warn!(peer = %self.peer, error = %e, "udp send failed");
                false
            }
        }
    }

    fn has_incoming(&mut self) -> bool {
        let mut probe = [0u8; 1];
        match self.socket.peek(&mut probe) {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::WouldBlock => false,
            Err(e) => {
                tracing::debug!(error = %e, "udp availability check failed");
                false
            }
        }
    }

    fn receive(&mut self, max_len: usize) -> Vec<u8> {
        let mut buf = vec![0u8; max_len];
        match self.socket.recv(&mut buf) {
            Ok(n) => {
                buf.truncate(n);
                buf
            }
            Err(e) => {
                if e.kind() != ErrorKind::WouldBlock {
                    tracing::warn!(error = %e, "udp receive failed");
                }
                Vec::new()
            }
        }
    }

    fn power_down(&mut self) {
        tracing::debug!(peer = %self.peer, "udp link closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bind two links on OS-assigned ports, pointed at each other.
    fn link_pair() -> (UdpLink, UdpLink) {
        let a = UdpSocket::bind("127.0.0.1:0").unwrap();
        let b = UdpSocket::bind("127.0.0.1:0").unwrap();
        a.set_nonblocking(true).unwrap();
        b.set_nonblocking(true).unwrap();
        let a_addr = a.local_addr().unwrap();
        let b_addr = b.local_addr().unwrap();
        a.connect(b_addr).unwrap();
        b.connect(a_addr).unwrap();
        (
            UdpLink {
                socket: a,
                peer: b_addr,
            },
            UdpLink {
                socket: b,
                peer: a_addr,
            },
        )
    }

    #[test]
    fn frames_cross_the_pair() {
        let (mut left, mut right) = link_pair();
        assert!(left.send(b"btlvl"));

        // Datagram delivery on loopback is fast but not instantaneous.
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(1);
        while !right.has_incoming() {
            assert!(std::time::Instant::now() < deadline, "frame never arrived");
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        assert_eq!(right.receive(32), b"btlvl");
    }

    #[test]
    fn receive_truncates_to_frame_size() {
        let (mut left, mut right) = link_pair();
        assert!(left.send(b"0123456789"));

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(1);
        while !right.has_incoming() {
            assert!(std::time::Instant::now() < deadline, "frame never arrived");
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        assert_eq!(right.receive(4), b"0123");
    }

    #[test]
    fn has_incoming_is_non_blocking() {
        let (mut left, _right) = link_pair();
        assert!(!left.has_incoming());
        assert!(left.receive(32).is_empty());
    }

    #[test]
    fn connect_binds_an_ephemeral_port() {
        let peer = UdpSocket::bind("127.0.0.1:0").unwrap();
        let link =
            UdpLink::connect("127.0.0.1:0", &peer.local_addr().unwrap().to_string()).unwrap();
        let local = link.local_addr().unwrap();
        assert_ne!(local.port(), 0);
        assert!(local.ip().is_loopback());
    }

    #[test]
    fn unresolvable_peer_is_an_error() {
        let err = UdpLink::connect("127.0.0.1:0", "definitely-not-a-host:0");
        assert!(err.is_err());
    }
}
