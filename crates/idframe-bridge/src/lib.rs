//! Message bridge between a host page and its embedded surface.
//!
//! This crate provides the two transport-facing layers of the SDK:
//!
//! - [`FrameChannel`] - a duplex, asynchronous message transport bound to
//!   one embedded surface. Delivers named, parameterized messages in each
//!   direction; FIFO within one direction per instance, no ordering
//!   guarantee across directions. The channel never inspects payload
//!   semantics.
//! - [`Bridge`] - wraps one channel plus one expected origin; converts
//!   raw inbound deliveries into validated, typed protocol messages and
//!   publishes them through a [`Dispatcher`](idframe_event::Dispatcher).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Embedded Surface                        │
//! │                      (FrameHandle)                           │
//! └───────────┬─────────────────────────────────▲────────────────┘
//!             │ InboundFrame                    │ WireMessage
//!             ▼                                 │
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       FrameChannel                           │
//! │   inbound_rx: Receiver<InboundFrame>                         │
//! │   outbound_tx: Sender<WireMessage>                           │
//! └───────────────────────────┬──────────────────────────────────┘
//!                             │ origin == expected?
//!                             ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Bridge                              │
//! │   BridgeEvent::Message ──► Dispatcher ──► Widget             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Origin Policy
//!
//! An inbound message is accepted only when its origin matches the
//! bridge's expected origin exactly. Everything else is dropped without
//! an event and without a log line: an open message surface receives
//! unrelated browser traffic all the time, and mismatches are noise, not
//! protocol faults.

mod bridge;
mod channel;
mod error;
mod message;

pub use bridge::{Bridge, BridgeEvent};
pub use channel::{FrameChannel, FrameHandle, InboundFrame, DEFAULT_BUFFER_SIZE};
pub use error::ChannelError;
pub use message::{FrameMessage, WireMessage};
