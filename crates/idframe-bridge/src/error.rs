//! Bridge layer errors.
//!
//! # Error Code Convention
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`Closed`](ChannelError::Closed) | `CHANNEL_CLOSED` | No |
//! | [`Full`](ChannelError::Full) | `CHANNEL_FULL` | Yes |

use idframe_types::ErrorCode;
use thiserror::Error;

/// Transport failure on the widget→surface direction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The channel was destroyed or the remote side dropped its handle.
    ///
    /// **Not recoverable** - the association with the embedded surface
    /// is gone; only a fresh render creates a new one.
    #[error("channel closed")]
    Closed,

    /// The outbound buffer is full.
    ///
    /// **Recoverable** - the surface is alive but slow; retry later.
    #[error("channel buffer full")]
    Full,
}

impl ErrorCode for ChannelError {
    fn code(&self) -> &'static str {
        match self {
            Self::Closed => "CHANNEL_CLOSED",
            Self::Full => "CHANNEL_FULL",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idframe_types::assert_error_codes;

    #[test]
    fn all_error_codes_valid() {
        assert_error_codes(&[ChannelError::Closed, ChannelError::Full], "CHANNEL_");
    }

    #[test]
    fn recoverability() {
        assert!(!ChannelError::Closed.is_recoverable());
        assert!(ChannelError::Full.is_recoverable());
    }
}
