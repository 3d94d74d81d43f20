//! The seam between a [`super::Listener`] and the websocket connection.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::{Error, Result};

/// A bidirectional text-frame connection.
///
/// Implementations wrap a websocket client. `receive` returns `Ok(None)`
/// once the peer has closed the connection.
#[async_trait]
pub trait ListenerTransport: Send {
    async fn send(&mut self, text: String) -> Result<()>;

    async fn receive(&mut self) -> Result<Option<String>>;

    async fn close(&mut self) -> Result<()>;
}

/// A transport backed by in-process channels. The other end is a
/// [`ChannelPeer`], typically driven by a task that owns the real socket.
#[derive(Debug)]
pub struct ChannelTransport {
    outgoing: Option<mpsc::UnboundedSender<String>>,
    incoming: mpsc::UnboundedReceiver<String>,
}

/// The far end of a [`ChannelTransport`].
#[derive(Debug)]
pub struct ChannelPeer {
    inbound: mpsc::UnboundedSender<String>,
    sent: mpsc::UnboundedReceiver<String>,
}

impl ChannelTransport {
    pub fn pair() -> (ChannelTransport, ChannelPeer) {
        let (outgoing, sent) = mpsc::unbounded_channel();
        let (inbound, incoming) = mpsc::unbounded_channel();
        (
            ChannelTransport {
                outgoing: Some(outgoing),
                incoming,
            },
            ChannelPeer { inbound, sent },
        )
    }
}

#[async_trait]
impl ListenerTransport for ChannelTransport {
    async fn send(&mut self, text: String) -> Result<()> {
        let outgoing = self
            .outgoing
            .as_ref()
            .ok_or_else(|| Error::Transport("transport is closed".to_string()))?;
        outgoing
            .send(text)
            .map_err(|_| Error::Transport("peer hung up".to_string()))
    }

    async fn receive(&mut self) -> Result<Option<String>> {
        Ok(self.incoming.recv().await)
    }

    async fn close(&mut self) -> Result<()> {
        self.outgoing = None;
        self.incoming.close();
        Ok(())
    }
}

impl ChannelPeer {
    /// Deliver a frame to the transport. Fails once the transport is gone.
    pub fn push(&self, text: impl Into<String>) -> Result<()> {
        self.inbound
            .send(text.into())
            .map_err(|_| Error::Transport("listener hung up".to_string()))
    }

    /// The next frame the transport sent, or `None` once it closed.
    pub async fn next_sent(&mut self) -> Option<String> {
        self.sent.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn frames_cross_both_ways() {
        let (mut transport, mut peer) = ChannelTransport::pair();
        transport.send("out".into()).await.unwrap();
        assert_eq!(peer.next_sent().await.as_deref(), Some("out"));
        peer.push("in").unwrap();
        assert_eq!(transport.receive().await.unwrap().as_deref(), Some("in"));
    }

    #[tokio::test]
    async fn closed_transport_rejects_sends() {
        let (mut transport, mut peer) = ChannelTransport::pair();
        transport.close().await.unwrap();
        assert!(matches!(transport.send("x".into()).await, Err(Error::Transport(_))));
        assert_eq!(peer.next_sent().await, None);
        assert!(peer.push("late").is_err());
    }

    #[tokio::test]
    async fn dropped_peer_ends_the_stream() {
        let (mut transport, peer) = ChannelTransport::pair();
        drop(peer);
        assert_eq!(transport.receive().await.unwrap(), None);
    }
}
