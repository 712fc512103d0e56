//! Event system for the IDFrame widget SDK.
//!
//! This crate provides the generic typed publish/subscribe hub used on
//! both sides of the widget:
//!
//! - the **bridge** publishes validated protocol messages through it, and
//! - the **widget** publishes lifecycle notifications to host-page code
//!   through it.
//!
//! # Event Flow
//!
//! ```text
//! embedded surface ──FrameChannel──► Bridge ──Dispatcher──► Widget
//!                                                              │
//!                                              Dispatcher      ▼
//! host page ◄──────────────────────── lifecycle events (StartLoad,
//!                                      Load, Error, Close, Show, Hide)
//! ```
//!
//! # Emission Semantics
//!
//! [`Dispatcher::emit`] invokes the handlers registered for an event in
//! insertion order, each at most once per emission, synchronously on the
//! emitting call's stack. The handler list is snapshotted before the
//! first invocation, so a handler that subscribes during emission takes
//! effect on the NEXT emission - never the current one.
//!
//! # Example
//!
//! ```
//! use idframe_event::{Dispatcher, WidgetEvent, WidgetEventPayload};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! let dispatcher = Dispatcher::new();
//! let seen = Arc::new(AtomicUsize::new(0));
//! let seen2 = Arc::clone(&seen);
//!
//! dispatcher.on(WidgetEvent::Load, move |_payload| {
//!     seen2.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! dispatcher.emit(&WidgetEvent::Load, &WidgetEventPayload::Empty);
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//! ```

mod dispatcher;
mod error;
mod event;

pub use dispatcher::{Dispatcher, Subscription};
pub use error::{WidgetError, WidgetErrorCode};
pub use event::{WidgetEvent, WidgetEventPayload};
