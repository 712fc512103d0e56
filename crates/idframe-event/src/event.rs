//! Widget lifecycle events.
//!
//! The widget re-emits its state changes as lifecycle events for
//! host-page code. `AuthenticationInfo` is internal-only: sibling
//! features use it to track whether fast-path re-authentication is
//! currently available; host pages should not rely on it.

use crate::WidgetError;
use serde::{Deserialize, Serialize};

/// Lifecycle event emitted by a widget instance.
///
/// | Event | When | Payload |
/// |-------|------|---------|
/// | `StartLoad` | Load sequence begins | none |
/// | `Load` | Embedded surface confirmed ready | none |
/// | `Error` | Timeout or remote fault | [`WidgetError`] |
/// | `Close` | Widget torn down | none |
/// | `Show` / `Hide` | Visibility toggled | none |
/// | `AuthenticationInfo` | Internal availability signal | `is_online` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetEvent {
    /// The load sequence has started (frame source set, timer armed).
    StartLoad,
    /// The embedded surface finished loading.
    Load,
    /// The widget entered the error path; payload carries the error.
    Error,
    /// The widget was fully torn down.
    Close,
    /// The scaffold became visible.
    Show,
    /// The scaffold was hidden.
    Hide,
    /// Internal authentication-availability signal.
    AuthenticationInfo,
}

impl WidgetEvent {
    /// Returns the event's wire name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartLoad => "start_load",
            Self::Load => "load",
            Self::Error => "error",
            Self::Close => "close",
            Self::Show => "show",
            Self::Hide => "hide",
            Self::AuthenticationInfo => "authentication_info",
        }
    }

    /// Returns `true` for the internal-only availability signal.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::AuthenticationInfo)
    }
}

impl std::fmt::Display for WidgetEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Payload delivered with a [`WidgetEvent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WidgetEventPayload {
    /// No payload (StartLoad, Load, Close, Show, Hide).
    Empty,
    /// The error that moved the widget back to its unloaded state.
    Error(WidgetError),
    /// Whether fast-path authentication is currently reachable.
    AuthenticationInfo {
        /// `false` when a load fails; sibling features treat the signal
        /// as an availability downgrade.
        is_online: bool,
    },
}

impl WidgetEventPayload {
    /// Returns the carried error, if any.
    #[must_use]
    pub fn as_error(&self) -> Option<&WidgetError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}
