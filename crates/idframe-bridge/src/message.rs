//! Protocol message types.

use idframe_types::Origin;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named, parameterized message as it travels over the channel.
///
/// The handler name selects the receiver-side routine; `params` is an
/// opaque payload the transport never inspects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    /// Handler name (e.g. `"load"`, `"resize"`).
    pub handler: String,
    /// Opaque parameter payload.
    #[serde(default)]
    pub params: Value,
}

impl WireMessage {
    /// Creates a message with a parameter payload.
    #[must_use]
    pub fn new(handler: impl Into<String>, params: Value) -> Self {
        Self {
            handler: handler.into(),
            params,
        }
    }

    /// Creates a message with no parameters.
    #[must_use]
    pub fn named(handler: impl Into<String>) -> Self {
        Self {
            handler: handler.into(),
            params: Value::Null,
        }
    }
}

/// A validated inbound protocol message.
///
/// Produced by the bridge once provenance has been checked; immutable
/// from then on. The origin is retained so downstream consumers can
/// audit where a message came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameMessage {
    /// Handler name.
    pub handler: String,
    /// Opaque parameter payload.
    pub params: Value,
    /// Verified sender origin.
    pub origin: Origin,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn named_has_null_params() {
        let msg = WireMessage::named("load");
        assert_eq!(msg.handler, "load");
        assert!(msg.params.is_null());
    }

    #[test]
    fn params_default_on_deserialize() {
        let msg: WireMessage = serde_json::from_str(r#"{"handler":"close"}"#).expect("parse");
        assert_eq!(msg.handler, "close");
        assert!(msg.params.is_null());
    }

    #[test]
    fn wire_round_trip() {
        let msg = WireMessage::new("resize", json!({"height": 320}));
        let json = serde_json::to_string(&msg).expect("serialize");
        let back: WireMessage = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(msg, back);
    }
}
