//! Widget layer of the IDFrame SDK.
//!
//! A widget embeds a remotely hosted authentication surface into a host
//! page and supervises its lifecycle: loading with a timeout budget,
//! erroring, resizing, and closing, driven by a structured message
//! protocol validated by the bridge layer.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          Host Page                               │
//! │        render() / close() / show() / hide()   lifecycle events   │
//! └───────────────┬──────────────────────────────────▲───────────────┘
//!                 ▼                                  │
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                       Widget (this crate)                        │
//! │   WidgetState machine · ScheduledTask timers · Scaffold          │
//! └───────────────┬──────────────────────────────────▲───────────────┘
//!                 │ frame URL                        │ FrameMessage
//!                 ▼                                  │
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                 idframe-bridge (Bridge / FrameChannel)           │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use idframe_widget::{Config, MemoryScaffold, RenderParams, Widget, WidgetState};
//! use idframe_types::Origin;
//!
//! let config = Config::new(7_503_123, "https://host.example/auth");
//! let mut widget = Widget::new("one-tap", config, Origin::new("https://host.example"));
//!
//! widget
//!     .render(RenderParams::new(Box::new(MemoryScaffold::new())))
//!     .expect("mount target present, config valid");
//! assert_eq!(widget.state(), WidgetState::Loading);
//!
//! widget.close();
//! assert!(widget.is_closed());
//! ```

mod config;
mod protocol;
mod scaffold;
mod state;
mod timer;
mod widget;

pub mod url;

pub use config::{
    AuthCallback, AuthMode, Config, ConfigError, Prompt, Timeouts, DEFAULT_FRAME_DOMAIN,
};
pub use protocol::{
    ProtocolMessage, HANDLER_CLOSE, HANDLER_ERROR, HANDLER_LOAD, HANDLER_RESIZE,
};
pub use scaffold::{widget_markup, MemoryScaffold, Scaffold};
pub use state::WidgetState;
pub use timer::ScheduledTask;
pub use widget::{RenderParams, Widget};

// Re-export the event surface and leaf types for convenience
pub use idframe_event::{WidgetError, WidgetErrorCode, WidgetEvent, WidgetEventPayload};
pub use idframe_types::{Language, Origin, Scheme, WidgetId};
