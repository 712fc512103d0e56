//! Widget lifecycle state.
//!
//! # State Lifecycle
//!
//! ```text
//!              render()            load confirmed + settle
//! NotLoaded ───────────► Loading ─────────────────────────► Loaded
//!     ▲                     │
//!     └─────────────────────┘
//!        timeout / error
//! ```
//!
//! Teardown (`close()`) is a terminal condition tracked separately, not
//! a state: a closed widget keeps its last state but refuses every
//! operation except a fresh `render()`.

use serde::{Deserialize, Serialize};

/// Mutually exclusive lifecycle state; one active value per instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetState {
    /// No load in progress; the scaffold (if any) shows its placeholder.
    #[default]
    NotLoaded,

    /// Frame source set, waiting for the surface to confirm load.
    ///
    /// Entering this state always (re)arms the load-timeout timer;
    /// leaving it always cancels the timer.
    Loading,

    /// The embedded surface is ready and visible.
    Loaded,
}

impl WidgetState {
    /// Returns the value written to the scaffold's `data-state`
    /// attribute.
    #[must_use]
    pub fn data_state(&self) -> &'static str {
        match self {
            Self::NotLoaded => "not_loaded",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
        }
    }

    /// Returns `true` while a load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns `true` once the surface is ready.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }
}

impl std::fmt::Display for WidgetState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.data_state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_loaded() {
        assert_eq!(WidgetState::default(), WidgetState::NotLoaded);
    }

    #[test]
    fn data_state_values() {
        assert_eq!(WidgetState::NotLoaded.data_state(), "not_loaded");
        assert_eq!(WidgetState::Loading.data_state(), "loading");
        assert_eq!(WidgetState::Loaded.data_state(), "loaded");
    }

    #[test]
    fn predicates() {
        assert!(WidgetState::Loading.is_loading());
        assert!(!WidgetState::Loading.is_loaded());
        assert!(WidgetState::Loaded.is_loaded());
    }

    #[test]
    fn display_matches_data_state() {
        assert_eq!(WidgetState::Loading.to_string(), "loading");
    }
}
