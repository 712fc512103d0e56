//! Origin-validated message relay.

use crate::channel::{FrameChannel, InboundFrame};
use crate::error::ChannelError;
use crate::message::{FrameMessage, WireMessage};
use idframe_event::{Dispatcher, Subscription};
use idframe_types::Origin;
use tracing::debug;

/// Bridge-level event.
///
/// `Message` fires for every validated inbound protocol message; the
/// routing by handler name happens downstream in the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeEvent {
    /// A validated inbound message arrived.
    Message,
}

/// Binds one [`FrameChannel`] to one expected origin and one event
/// surface.
///
/// The bridge owns teardown of its channel, holds no timers, and has no
/// side effects beyond listener registration and removal.
///
/// # Validation Policy
///
/// A delivery is accepted only when its origin matches the configured
/// expected origin exactly. Mismatches are dropped silently - no event,
/// no log - because an open message surface routinely sees unrelated
/// traffic.
pub struct Bridge {
    channel: Option<FrameChannel>,
    expected_origin: Origin,
    events: Dispatcher<BridgeEvent, FrameMessage>,
}

impl Bridge {
    /// Binds `channel` to `expected_origin`.
    #[must_use]
    pub fn new(channel: FrameChannel, expected_origin: Origin) -> Self {
        debug!(origin = %expected_origin, "bridge bound");
        Self {
            channel: Some(channel),
            expected_origin,
            events: Dispatcher::new(),
        }
    }

    /// Returns the origin this bridge accepts messages from.
    #[must_use]
    pub fn expected_origin(&self) -> &Origin {
        &self.expected_origin
    }

    /// Subscribes to bridge-level events.
    pub fn on(
        &self,
        event: BridgeEvent,
        handler: impl Fn(&FrameMessage) + Send + Sync + 'static,
    ) -> Subscription<BridgeEvent> {
        self.events.on(event, handler)
    }

    /// Unsubscribes a handler registered with [`on`](Self::on).
    pub fn off(&self, subscription: &Subscription<BridgeEvent>) {
        self.events.off(subscription);
    }

    /// Waits for the next validated inbound message.
    ///
    /// Origin-mismatched deliveries are skipped without surfacing.
    /// Returns `None` once the channel is destroyed or the surface side
    /// is gone.
    pub async fn recv(&mut self) -> Option<FrameMessage> {
        loop {
            let frame = self.channel.as_mut()?.recv().await?;
            if let Some(message) = self.validate(frame) {
                self.events.emit(&BridgeEvent::Message, &message);
                return Some(message);
            }
        }
    }

    /// Drains and validates all buffered inbound deliveries.
    ///
    /// Emits [`BridgeEvent::Message`] for each accepted message, in
    /// receipt order.
    pub fn drain(&mut self) -> Vec<FrameMessage> {
        let Some(channel) = self.channel.as_mut() else {
            return Vec::new();
        };

        let mut messages = Vec::new();
        for frame in channel.drain() {
            if let Some(message) = self.validate(frame) {
                self.events.emit(&BridgeEvent::Message, &message);
                messages.push(message);
            }
        }
        messages
    }

    /// Forwards a message to the embedded surface.
    ///
    /// # Errors
    ///
    /// [`ChannelError::Closed`] after [`destroy`](Self::destroy).
    pub fn send(&self, message: WireMessage) -> Result<(), ChannelError> {
        match &self.channel {
            Some(channel) => channel.send(message),
            None => Err(ChannelError::Closed),
        }
    }

    /// Performs scoped release: destroys the channel and clears every
    /// handler registration.
    ///
    /// Safe to call on a bridge that never fully initialized and safe to
    /// call any number of times.
    pub fn destroy(&mut self) {
        if let Some(mut channel) = self.channel.take() {
            channel.destroy();
            debug!(origin = %self.expected_origin, "bridge destroyed");
        }
        self.events.clear();
    }

    /// Returns `true` once [`destroy`](Self::destroy) has run.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.channel.is_none()
    }

    // Provenance check. Mismatch is noise from an open message surface,
    // not a protocol fault: drop with no event and no log.
    fn validate(&self, frame: InboundFrame) -> Option<FrameMessage> {
        if frame.origin != self.expected_origin {
            return None;
        }
        Some(FrameMessage {
            handler: frame.message.handler,
            params: frame.message.params,
            origin: frame.origin,
        })
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("expected_origin", &self.expected_origin)
            .field("destroyed", &self.is_destroyed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn frame_origin() -> Origin {
        Origin::new("https://id.idframe.dev")
    }

    fn setup() -> (Bridge, crate::channel::FrameHandle) {
        let (channel, handle) = FrameChannel::with_defaults();
        (Bridge::new(channel, frame_origin()), handle)
    }

    #[tokio::test]
    async fn matching_origin_is_delivered_and_published() {
        let (mut bridge, handle) = setup();
        let seen = Arc::new(AtomicUsize::new(0));

        let seen2 = Arc::clone(&seen);
        bridge.on(BridgeEvent::Message, move |msg| {
            assert_eq!(msg.handler, "load");
            seen2.fetch_add(1, Ordering::SeqCst);
        });

        handle
            .send(frame_origin(), WireMessage::named("load"))
            .await
            .expect("send");

        let msg = bridge.recv().await.expect("validated message");
        assert_eq!(msg.handler, "load");
        assert_eq!(msg.origin, frame_origin());
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn mismatched_origin_is_silently_dropped() {
        let (mut bridge, handle) = setup();
        let seen = Arc::new(AtomicUsize::new(0));

        let seen2 = Arc::clone(&seen);
        bridge.on(BridgeEvent::Message, move |_| {
            seen2.fetch_add(1, Ordering::SeqCst);
        });

        handle
            .send(
                Origin::new("https://id.idframe.dev.evil.example"),
                WireMessage::named("load"),
            )
            .await
            .expect("send");
        handle
            .send(frame_origin(), WireMessage::named("close"))
            .await
            .expect("send");

        // recv skips the forged delivery and returns the genuine one
        let msg = bridge.recv().await.expect("validated message");
        assert_eq!(msg.handler, "close");
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn drain_filters_and_preserves_order() {
        let (mut bridge, handle) = setup();

        handle
            .send(frame_origin(), WireMessage::new("resize", json!({"height": 100})))
            .await
            .expect("send");
        handle
            .send(Origin::new("https://noise.example"), WireMessage::named("load"))
            .await
            .expect("send");
        handle
            .send(frame_origin(), WireMessage::named("load"))
            .await
            .expect("send");

        let messages = bridge.drain();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].handler, "resize");
        assert_eq!(messages[1].handler, "load");
    }

    #[tokio::test]
    async fn destroy_is_idempotent_and_clears_handlers() {
        let (mut bridge, handle) = setup();
        bridge.on(BridgeEvent::Message, |_| {});

        bridge.destroy();
        assert!(bridge.is_destroyed());
        bridge.destroy();
        bridge.destroy();
        assert!(bridge.is_destroyed());
        assert!(handle.is_closed());

        // Post-destroy operations are inert
        assert!(bridge.drain().is_empty());
        assert!(bridge.recv().await.is_none());
        assert_eq!(bridge.send(WireMessage::named("ping")), Err(ChannelError::Closed));
    }

    #[tokio::test]
    async fn outbound_send_reaches_surface() {
        let (bridge, mut handle) = setup();

        bridge.send(WireMessage::named("init")).expect("send");
        let msg = handle.recv().await.expect("recv");
        assert_eq!(msg.handler, "init");
    }

    #[tokio::test]
    async fn unsubscribe_stops_delivery() {
        let (mut bridge, handle) = setup();
        let seen = Arc::new(AtomicUsize::new(0));

        let seen2 = Arc::clone(&seen);
        let sub = bridge.on(BridgeEvent::Message, move |_| {
            seen2.fetch_add(1, Ordering::SeqCst);
        });
        bridge.off(&sub);

        handle
            .send(frame_origin(), WireMessage::named("load"))
            .await
            .expect("send");
        bridge.recv().await.expect("message");
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }
}
