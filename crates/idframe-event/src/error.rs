//! Widget error value.
//!
//! Timeouts and remote-reported faults are never thrown: they travel to
//! the host as [`WidgetError`] values inside `Error` lifecycle events,
//! and the widget itself recovers to its unloaded state so the host can
//! retry.
//!
//! # Error Code Convention
//!
//! | Code | When | Recoverable |
//! |------|------|-------------|
//! | `WIDGET_TIMEOUT_EXCEEDED` | Load did not finish within budget | Yes |
//! | `WIDGET_INTERNAL_ERROR` | Embedded surface reported a fault | Yes |

use idframe_types::ErrorCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of widget error classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetErrorCode {
    /// The embedded surface did not confirm load within the budget.
    TimeoutExceeded,
    /// The embedded surface reported a runtime fault.
    InternalError,
}

impl WidgetErrorCode {
    /// Returns the canonical human-readable text for this code.
    #[must_use]
    pub fn text(&self) -> &'static str {
        match self {
            Self::TimeoutExceeded => "The widget frame did not load in time",
            Self::InternalError => "The widget frame reported an internal error",
        }
    }
}

impl ErrorCode for WidgetErrorCode {
    fn code(&self) -> &'static str {
        match self {
            Self::TimeoutExceeded => "WIDGET_TIMEOUT_EXCEEDED",
            Self::InternalError => "WIDGET_INTERNAL_ERROR",
        }
    }

    /// Both classifications describe transient runtime conditions; the
    /// host may re-render and try again.
    fn is_recoverable(&self) -> bool {
        true
    }
}

/// Error value delivered through the `Error` lifecycle event.
///
/// A pure value with no identity: equal code/text/details means equal
/// error. `details` is an opaque diagnostic payload forwarded verbatim
/// from the embedded surface (present only for `InternalError`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{text}")]
pub struct WidgetError {
    /// Classification code.
    pub code: WidgetErrorCode,
    /// Human-readable text.
    pub text: String,
    /// Free-form diagnostic payload from the embedded surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl WidgetError {
    /// Creates the load-timeout error.
    #[must_use]
    pub fn timeout_exceeded() -> Self {
        Self {
            code: WidgetErrorCode::TimeoutExceeded,
            text: WidgetErrorCode::TimeoutExceeded.text().to_string(),
            details: None,
        }
    }

    /// Creates the remote-fault error, preserving the surface's
    /// diagnostic payload.
    #[must_use]
    pub fn internal(details: Option<serde_json::Value>) -> Self {
        Self {
            code: WidgetErrorCode::InternalError,
            text: WidgetErrorCode::InternalError.text().to_string(),
            details,
        }
    }
}

impl ErrorCode for WidgetError {
    fn code(&self) -> &'static str {
        self.code.code()
    }

    fn is_recoverable(&self) -> bool {
        self.code.is_recoverable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idframe_types::assert_error_codes;
    use serde_json::json;

    #[test]
    fn all_error_codes_valid() {
        assert_error_codes(
            &[
                WidgetErrorCode::TimeoutExceeded,
                WidgetErrorCode::InternalError,
            ],
            "WIDGET_",
        );
    }

    #[test]
    fn timeout_error() {
        let err = WidgetError::timeout_exceeded();
        assert_eq!(err.code, WidgetErrorCode::TimeoutExceeded);
        assert_eq!(ErrorCode::code(&err), "WIDGET_TIMEOUT_EXCEEDED");
        assert!(err.is_recoverable());
        assert!(err.details.is_none());
        assert!(err.to_string().contains("did not load in time"));
    }

    #[test]
    fn internal_error_preserves_details() {
        let details = json!({"reason": "session expired"});
        let err = WidgetError::internal(Some(details.clone()));
        assert_eq!(err.code, WidgetErrorCode::InternalError);
        assert_eq!(err.details, Some(details));
    }

    #[test]
    fn error_is_pure_value() {
        assert_eq!(WidgetError::timeout_exceeded(), WidgetError::timeout_exceeded());
        assert_ne!(WidgetError::timeout_exceeded(), WidgetError::internal(None));
    }

    #[test]
    fn serde_skips_absent_details() {
        let json = serde_json::to_string(&WidgetError::timeout_exceeded()).expect("serialize");
        assert!(!json.contains("details"));
    }
}
