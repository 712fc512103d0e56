//! Protocol messages accepted from the embedded surface.
//!
//! Inbound routing is a tagged-variant dispatch over a closed set of
//! message kinds. Unrecognized handler names and malformed payloads
//! parse to `None` and are ignored: the hosted surface's message set
//! evolves independently of this SDK, so unknown traffic is expected,
//! not a fault.

use idframe_bridge::FrameMessage;
use serde_json::Value;

/// Handler name for the load confirmation.
pub const HANDLER_LOAD: &str = "load";
/// Handler name for the remote-initiated close.
pub const HANDLER_CLOSE: &str = "close";
/// Handler name for a remote fault report.
pub const HANDLER_ERROR: &str = "error";
/// Handler name for a height change.
pub const HANDLER_RESIZE: &str = "resize";

/// A recognized, well-formed protocol message.
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolMessage {
    /// The embedded surface finished loading.
    Load,
    /// The embedded surface asks to be closed.
    Close,
    /// The embedded surface reported a fault; diagnostics are opaque.
    Error(Option<Value>),
    /// The embedded surface reports its rendered height in pixels.
    Resize {
        /// Reported height in pixels.
        height: f64,
    },
}

impl ProtocolMessage {
    /// Parses a validated bridge message into a protocol message.
    ///
    /// Returns `None` for unknown handler names and for a `resize`
    /// without a numeric height.
    #[must_use]
    pub fn parse(message: &FrameMessage) -> Option<Self> {
        match message.handler.as_str() {
            HANDLER_LOAD => Some(Self::Load),
            HANDLER_CLOSE => Some(Self::Close),
            HANDLER_ERROR => {
                let details = (!message.params.is_null()).then(|| message.params.clone());
                Some(Self::Error(details))
            }
            HANDLER_RESIZE => message
                .params
                .get("height")
                .and_then(Value::as_f64)
                .map(|height| Self::Resize { height }),
            _ => None,
        }
    }
}
