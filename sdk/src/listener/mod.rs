//! # Listener
//!
//! Subscribes to a node's websocket channels and classifies what arrives.
//! The socket itself is abstracted by [`ListenerTransport`]; the listener
//! owns the subscription protocol:
//!
//! 1. the node greets with `{"uid": "..."}`;
//! 2. the client sends `{"uid", "subscribe": path}` per channel;
//! 3. every later frame is classified into a [`ListenerMessage`].
//!
//! [`Listener::next`] takes `&mut self`, so at most one receive is in
//! flight. A [`ListenerHandle`] cancels a pending `next` from another task.

pub mod channel;
pub mod message;
pub mod transport;

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::watch;

pub use channel::ListenerChannel;
pub use message::{classify, classify_text, ListenerMessage};
pub use transport::{ChannelPeer, ChannelTransport, ListenerTransport};

use crate::codec::dto;
use crate::error::{Error, Result};
use crate::model::account::Address;

/// Cancels the [`Listener`] it was taken from. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ListenerHandle {
    cancel: Arc<watch::Sender<bool>>,
}

impl ListenerHandle {
    /// Wake any pending [`Listener::next`], which then returns `None`, as do
    /// all later calls.
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }
}

pub struct Listener<T: ListenerTransport> {
    transport: T,
    uid: Option<String>,
    cancel_tx: Arc<watch::Sender<bool>>,
    cancel_rx: watch::Receiver<bool>,
}

impl<T: ListenerTransport> Listener<T> {
    pub fn new(transport: T) -> Self {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        Self {
            transport,
            uid: None,
            cancel_tx: Arc::new(cancel_tx),
            cancel_rx,
        }
    }

    pub fn handle(&self) -> ListenerHandle {
        ListenerHandle {
            cancel: Arc::clone(&self.cancel_tx),
        }
    }

    /// The connection id from the node's greeting, read on first use.
    pub async fn uid(&mut self) -> Result<&str> {
        if self.uid.is_none() {
            let greeting = self
                .transport
                .receive()
                .await?
                .ok_or_else(|| Error::Transport("connection closed before the uid greeting".to_string()))?;
            let data: Value = serde_json::from_str(&greeting)?;
            let obj = dto::as_object(&data, "uid greeting")?;
            let uid = dto::string(obj, "uid")?.to_string();
            tracing::debug!(%uid, "listener connected");
            self.uid = Some(uid);
        }
        self.uid
            .as_deref()
            .ok_or_else(|| Error::Transport("missing uid".to_string()))
    }

    pub async fn subscribe(&mut self, channel: ListenerChannel) -> Result<()> {
        self.request("subscribe", &channel).await
    }

    pub async fn unsubscribe(&mut self, channel: ListenerChannel) -> Result<()> {
        self.request("unsubscribe", &channel).await
    }

    async fn request(&mut self, action: &str, channel: &ListenerChannel) -> Result<()> {
        let uid = self.uid().await?.to_string();
        let path = channel.path();
        tracing::debug!(action, %path, "listener request");
        let request = json!({ "uid": uid, action: path });
        self.transport.send(request.to_string()).await
    }

    pub async fn new_block(&mut self) -> Result<()> {
        self.subscribe(ListenerChannel::Block).await
    }

    pub async fn confirmed(&mut self, address: Address) -> Result<()> {
        self.subscribe(ListenerChannel::ConfirmedAdded(address)).await
    }

    pub async fn unconfirmed_added(&mut self, address: Address) -> Result<()> {
        self.subscribe(ListenerChannel::UnconfirmedAdded(address)).await
    }

    pub async fn unconfirmed_removed(&mut self, address: Address) -> Result<()> {
        self.subscribe(ListenerChannel::UnconfirmedRemoved(address)).await
    }

    pub async fn aggregate_bonded_added(&mut self, address: Address) -> Result<()> {
        self.subscribe(ListenerChannel::PartialAdded(address)).await
    }

    pub async fn aggregate_bonded_removed(&mut self, address: Address) -> Result<()> {
        self.subscribe(ListenerChannel::PartialRemoved(address)).await
    }

    pub async fn status(&mut self, address: Address) -> Result<()> {
        self.subscribe(ListenerChannel::Status(address)).await
    }

    pub async fn cosignature_added(&mut self, address: Address) -> Result<()> {
        self.subscribe(ListenerChannel::Cosignature(address)).await
    }

    /// The next classified frame.
    ///
    /// `None` once cancelled or once the transport has closed. A frame that
    /// fails to classify yields `Some(Err(..))` and the stream continues.
    pub async fn next(&mut self) -> Option<Result<ListenerMessage>> {
        if *self.cancel_rx.borrow() {
            return None;
        }
        let frame = tokio::select! {
            frame = self.transport.receive() => frame,
            _ = self.cancel_rx.changed() => {
                tracing::debug!("listener cancelled");
                return None;
            }
        };
        match frame {
            Ok(Some(text)) => {
                tracing::trace!(bytes = text.len(), "listener frame");
                Some(classify_text(&text))
            }
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }

    /// Cancel pending reads and close the transport.
    pub async fn close(&mut self) -> Result<()> {
        self.cancel_tx.send_replace(true);
        self.transport.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const RAW: &str = "SBGS2IGUED476REYI5ZZGISVSEHAF6YIQZV6YJFQ";

    fn connected() -> (Listener<ChannelTransport>, ChannelPeer) {
        let (transport, peer) = ChannelTransport::pair();
        peer.push(r#"{"uid": "abc-123"}"#).unwrap();
        (Listener::new(transport), peer)
    }

    #[tokio::test]
    async fn subscribe_sends_uid_and_path() {
        let (mut listener, mut peer) = connected();
        let address = Address::create_from_raw_address(RAW).unwrap();
        listener.unconfirmed_added(address).await.unwrap();
        listener.new_block().await.unwrap();
        listener.unsubscribe(ListenerChannel::Block).await.unwrap();

        let sent: Value = serde_json::from_str(&peer.next_sent().await.unwrap()).unwrap();
        assert_eq!(sent, json!({"uid": "abc-123", "subscribe": format!("unconfirmedAdded/{RAW}")}));
        let sent: Value = serde_json::from_str(&peer.next_sent().await.unwrap()).unwrap();
        assert_eq!(sent["subscribe"], "block");
        let sent: Value = serde_json::from_str(&peer.next_sent().await.unwrap()).unwrap();
        assert_eq!(sent, json!({"uid": "abc-123", "unsubscribe": "block"}));
    }

    #[tokio::test]
    async fn uid_is_read_once() {
        let (mut listener, peer) = connected();
        assert_eq!(listener.uid().await.unwrap(), "abc-123");
        peer.push(r#"{"meta": {"channelName": "confirmedAdded", "hash": "AA"}}"#).unwrap();
        assert_eq!(listener.uid().await.unwrap(), "abc-123");
        let message = listener.next().await.unwrap().unwrap();
        assert_eq!(message.channel_name(), "confirmedAdded");
    }

    #[tokio::test]
    async fn bad_frame_does_not_end_the_stream() {
        let (mut listener, peer) = connected();
        listener.uid().await.unwrap();
        peer.push(r#"{"foo": 1}"#).unwrap();
        peer.push(r#"{"meta": {"channelName": "partialRemoved", "hash": "BB"}}"#).unwrap();
        assert!(matches!(
            listener.next().await,
            Some(Err(Error::UnrecognizedMessage { .. }))
        ));
        assert!(matches!(listener.next().await, Some(Ok(ListenerMessage::Notice { .. }))));
    }

    #[tokio::test]
    async fn cancel_wakes_pending_next() {
        let (mut listener, _peer) = connected();
        listener.uid().await.unwrap();
        let handle = listener.handle();
        let task = tokio::spawn(async move { listener.next().await.is_none() });
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.cancel();
        assert!(task.await.unwrap());
        assert!(handle.is_cancelled());
    }

    #[tokio::test]
    async fn closed_peer_ends_the_stream() {
        let (mut listener, peer) = connected();
        listener.uid().await.unwrap();
        drop(peer);
        assert!(listener.next().await.is_none());
    }

    #[tokio::test]
    async fn missing_greeting_is_a_transport_error() {
        let (transport, peer) = ChannelTransport::pair();
        drop(peer);
        let mut listener = Listener::new(transport);
        assert!(matches!(listener.subscribe(ListenerChannel::Block).await, Err(Error::Transport(_))));
    }
}
