//! Core types for the IDFrame widget SDK.
//!
//! This crate provides the foundational identifier and value types shared
//! by every layer of the SDK.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Host SDK Layer                            │
//! │  (External, SemVer stable, safe to depend on)               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  idframe-types  : WidgetId, Origin, ErrorCode  ◄── HERE     │
//! │  idframe-event  : Dispatcher, WidgetEvent, WidgetError      │
//! │  idframe-bridge : FrameChannel, Bridge                      │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Widget Layer                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  idframe-widget : Config, Scaffold, Widget state machine    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Identifier Design
//!
//! Widget identifiers are UUID-based so a host page can address any number
//! of simultaneously mounted widgets without coordination, and so the
//! scaffold contract ("root container identifiable by the widget's unique
//! id") holds across embedding contexts.
//!
//! # Example
//!
//! ```
//! use idframe_types::{WidgetId, Origin};
//!
//! // Named widget kinds get deterministic UUIDs
//! let one_tap = WidgetId::named("one-tap");
//! assert_eq!(one_tap, WidgetId::named("one-tap"));
//!
//! // Anonymous instances are unique
//! let a = WidgetId::new();
//! let b = WidgetId::new();
//! assert_ne!(a, b);
//!
//! // Origins compare exactly, nothing more
//! let origin = Origin::new("https://id.idframe.dev");
//! assert!(origin.matches("https://id.idframe.dev"));
//! assert!(!origin.matches("https://id.idframe.dev.evil.example"));
//! ```

mod error;
mod id;
mod locale;
mod origin;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::WidgetId;
pub use locale::{Language, Scheme};
pub use origin::Origin;
