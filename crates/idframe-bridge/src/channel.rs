//! Duplex message channel to one embedded surface.
//!
//! [`FrameChannel::pair`] creates both ends at once: the widget side
//! ([`FrameChannel`]) and the surface side ([`FrameHandle`]). In
//! production the handle sits behind the platform's cross-context
//! messaging; in tests it doubles as the embedded surface itself.
//!
//! Provenance is attached per delivery: the transport stamps each
//! inbound message with the sender's origin, and the channel forwards
//! every delivery regardless of sender - filtering is the bridge's job.

use crate::error::ChannelError;
use crate::message::WireMessage;
use idframe_types::Origin;
use tokio::sync::mpsc;

/// Default buffer size for both directions.
pub const DEFAULT_BUFFER_SIZE: usize = 64;

/// One inbound delivery: the message plus the sender's origin.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundFrame {
    /// The delivered message.
    pub message: WireMessage,
    /// Origin reported by the transport for the sender.
    pub origin: Origin,
}

/// Widget-side end of the transport.
///
/// Within one instance inbound messages are delivered in receipt order;
/// nothing is guaranteed across distinct instances or across the two
/// directions.
pub struct FrameChannel {
    inbound_rx: mpsc::Receiver<InboundFrame>,
    outbound_tx: Option<mpsc::Sender<WireMessage>>,
    destroyed: bool,
}

/// Surface-side end of the transport.
///
/// Held by the embedded surface (or a test standing in for it).
pub struct FrameHandle {
    inbound_tx: mpsc::Sender<InboundFrame>,
    outbound_rx: mpsc::Receiver<WireMessage>,
}

impl FrameChannel {
    /// Creates a connected channel/handle pair.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - Buffer size for each direction
    #[must_use]
    pub fn pair(buffer_size: usize) -> (Self, FrameHandle) {
        let (inbound_tx, inbound_rx) = mpsc::channel(buffer_size);
        let (outbound_tx, outbound_rx) = mpsc::channel(buffer_size);

        let channel = Self {
            inbound_rx,
            outbound_tx: Some(outbound_tx),
            destroyed: false,
        };
        let handle = FrameHandle {
            inbound_tx,
            outbound_rx,
        };

        (channel, handle)
    }

    /// Creates a pair with the default buffer size.
    #[must_use]
    pub fn with_defaults() -> (Self, FrameHandle) {
        Self::pair(DEFAULT_BUFFER_SIZE)
    }

    /// Receives the next inbound delivery (async, waits).
    ///
    /// Returns `None` once the channel is destroyed or every surface
    /// handle is dropped and the buffer is drained.
    pub async fn recv(&mut self) -> Option<InboundFrame> {
        self.inbound_rx.recv().await
    }

    /// Receives one inbound delivery without blocking.
    #[must_use]
    pub fn try_recv(&mut self) -> Option<InboundFrame> {
        self.inbound_rx.try_recv().ok()
    }

    /// Drains all buffered inbound deliveries without blocking.
    pub fn drain(&mut self) -> Vec<InboundFrame> {
        let mut frames = Vec::new();
        while let Some(frame) = self.try_recv() {
            frames.push(frame);
        }
        frames
    }

    /// Enqueues a message to the embedded surface.
    ///
    /// # Errors
    ///
    /// [`ChannelError::Closed`] after [`destroy`](Self::destroy) or once
    /// the surface side is gone; [`ChannelError::Full`] when the
    /// outbound buffer has no room.
    pub fn send(&self, message: WireMessage) -> Result<(), ChannelError> {
        let Some(tx) = &self.outbound_tx else {
            return Err(ChannelError::Closed);
        };
        tx.try_send(message).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => ChannelError::Full,
            mpsc::error::TrySendError::Closed(_) => ChannelError::Closed,
        })
    }

    /// Releases the association with the embedded surface.
    ///
    /// Closes the inbound half and drops the outbound sender. Idempotent:
    /// calling it any number of times is safe.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.inbound_rx.close();
        self.outbound_tx = None;
        self.destroyed = true;
    }

    /// Returns `true` once [`destroy`](Self::destroy) has run.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl std::fmt::Debug for FrameChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameChannel")
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

impl FrameHandle {
    /// Delivers a message to the widget side, stamped with `origin`.
    ///
    /// The origin parameter models the transport attaching sender
    /// provenance to each delivery - callers cannot omit it.
    ///
    /// # Errors
    ///
    /// [`ChannelError::Closed`] once the widget side has been destroyed.
    pub async fn send(&self, origin: Origin, message: WireMessage) -> Result<(), ChannelError> {
        self.inbound_tx
            .send(InboundFrame { message, origin })
            .await
            .map_err(|_| ChannelError::Closed)
    }

    /// Receives the next widget→surface message (async, waits).
    ///
    /// Returns `None` once the widget side is gone.
    pub async fn recv(&mut self) -> Option<WireMessage> {
        self.outbound_rx.recv().await
    }

    /// Returns `true` once the widget side can no longer receive.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inbound_tx.is_closed()
    }
}

impl std::fmt::Debug for FrameHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameHandle").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_origin() -> Origin {
        Origin::new("https://id.idframe.dev")
    }

    #[tokio::test]
    async fn inbound_fifo_within_instance() {
        let (mut channel, handle) = FrameChannel::with_defaults();

        for i in 0..3 {
            handle
                .send(test_origin(), WireMessage::new("tick", json!(i)))
                .await
                .expect("send");
        }

        let frames = channel.drain();
        assert_eq!(frames.len(), 3);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.message.params, json!(i));
            assert_eq!(frame.origin, test_origin());
        }
    }

    #[tokio::test]
    async fn outbound_reaches_handle() {
        let (channel, mut handle) = FrameChannel::with_defaults();

        channel.send(WireMessage::named("init")).expect("send");
        let msg = handle.recv().await.expect("recv");
        assert_eq!(msg.handler, "init");
    }

    #[tokio::test]
    async fn destroy_is_idempotent() {
        let (mut channel, handle) = FrameChannel::with_defaults();

        channel.destroy();
        assert!(channel.is_destroyed());
        channel.destroy();
        channel.destroy();
        assert!(channel.is_destroyed());

        // Surface side observes the teardown
        assert!(handle.is_closed());
    }

    #[tokio::test]
    async fn send_after_destroy_fails() {
        let (mut channel, _handle) = FrameChannel::with_defaults();
        channel.destroy();

        assert_eq!(
            channel.send(WireMessage::named("init")),
            Err(ChannelError::Closed)
        );
    }

    #[tokio::test]
    async fn recv_after_destroy_drains_then_ends() {
        let (mut channel, handle) = FrameChannel::with_defaults();
        handle
            .send(test_origin(), WireMessage::named("load"))
            .await
            .expect("send");

        channel.destroy();

        // Buffered delivery still drains, then the stream ends
        assert!(channel.recv().await.is_some());
        assert!(channel.recv().await.is_none());
    }

    #[tokio::test]
    async fn handle_send_after_destroy_fails() {
        let (mut channel, handle) = FrameChannel::with_defaults();
        channel.destroy();
        // Allow the close to propagate through the channel internals
        let result = handle.send(test_origin(), WireMessage::named("load")).await;
        assert_eq!(result, Err(ChannelError::Closed));
    }

    #[tokio::test]
    async fn full_buffer_reports_full() {
        let (channel, mut handle) = FrameChannel::pair(1);

        channel.send(WireMessage::named("a")).expect("first send");
        assert_eq!(
            channel.send(WireMessage::named("b")),
            Err(ChannelError::Full)
        );

        // Draining makes room again
        handle.recv().await.expect("recv");
        channel.send(WireMessage::named("c")).expect("send after drain");
    }
}
