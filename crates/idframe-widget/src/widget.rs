//! Widget state machine.
//!
//! One [`Widget`] supervises one embedded surface: it mounts the
//! scaffold, starts the load sequence with a timeout budget, relays
//! validated protocol messages into state transitions, and guarantees
//! idempotent, leak-free teardown on every exit path (explicit close,
//! remote-initiated close, error, timeout).
//!
//! # Driving the Machine
//!
//! The core is synchronous and clock-driven: [`Widget::pump`] fires due
//! timers and drains the bridge for an explicit `now`, which is what the
//! unit tests call directly. [`Widget::drive`] is the async supervision
//! loop for production use - it sleeps until the next deadline or the
//! next inbound message and calls the same synchronous core.
//!
//! # Ownership
//!
//! Everything the widget supervises is owned state: the scaffold, the
//! bridge, and both timers. `close()` releases all of it; nothing leaks
//! regardless of which path tears the widget down.

use crate::config::{Config, ConfigError};
use crate::protocol::ProtocolMessage;
use crate::scaffold::Scaffold;
use crate::state::WidgetState;
use crate::timer::ScheduledTask;
use crate::url;
use idframe_bridge::{
    Bridge, BridgeEvent, ChannelError, FrameChannel, FrameHandle, FrameMessage, WireMessage,
};
use idframe_event::{Dispatcher, Subscription, WidgetError, WidgetEvent, WidgetEventPayload};
use idframe_types::{ErrorCode, Language, Origin, Scheme, WidgetId};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, trace};

/// Caller-supplied render parameters.
///
/// The mount target is required; everything else is optional. Extra
/// query parameters are merged into the frame URL.
#[derive(Debug, Default)]
pub struct RenderParams {
    container: Option<Box<dyn Scaffold>>,
    fast_auth_disabled: bool,
    query: BTreeMap<String, String>,
}

impl RenderParams {
    /// Creates parameters with a mount target.
    #[must_use]
    pub fn new(container: Box<dyn Scaffold>) -> Self {
        Self {
            container: Some(container),
            fast_auth_disabled: false,
            query: BTreeMap::new(),
        }
    }

    /// Creates parameters without a mount target.
    ///
    /// `render()` rejects these; useful mostly to exercise the failure
    /// path.
    #[must_use]
    pub fn bare() -> Self {
        Self::default()
    }

    /// Suppresses the automatic load sequence.
    ///
    /// Render then stops at the mounted scaffold: no bridge, no frame
    /// source, no timers.
    #[must_use]
    pub fn fast_auth_disabled(mut self, disabled: bool) -> Self {
        self.fast_auth_disabled = disabled;
        self
    }

    /// Adds a query parameter for the frame URL.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }
}

/// Supervisor for one embedded authentication surface.
pub struct Widget {
    id: WidgetId,
    app_name: String,
    lang: Language,
    scheme: Scheme,
    host_origin: Origin,
    config: Config,
    state: WidgetState,
    closed: bool,
    scaffold: Option<Box<dyn Scaffold>>,
    bridge: Option<Bridge>,
    surface_handle: Option<FrameHandle>,
    load_timeout: Option<ScheduledTask>,
    settle: Option<ScheduledTask>,
    events: Dispatcher<WidgetEvent, WidgetEventPayload>,
}

impl Widget {
    /// Creates a widget for the named hosted application.
    ///
    /// Configuration and the caller origin are injected here - widgets
    /// hold no global state.
    #[must_use]
    pub fn new(app_name: impl Into<String>, config: Config, host_origin: Origin) -> Self {
        Self {
            id: WidgetId::new(),
            app_name: app_name.into(),
            lang: Language::default(),
            scheme: Scheme::default(),
            host_origin,
            config,
            state: WidgetState::NotLoaded,
            closed: false,
            scaffold: None,
            bridge: None,
            surface_handle: None,
            load_timeout: None,
            settle: None,
            events: Dispatcher::new(),
        }
    }

    /// Sets the interface language.
    #[must_use]
    pub fn with_language(mut self, lang: Language) -> Self {
        self.lang = lang;
        self
    }

    /// Sets the visual scheme.
    #[must_use]
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Returns this widget's identity.
    #[must_use]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> WidgetState {
        self.state
    }

    /// Returns `true` once the widget has been torn down.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns `true` while the load-timeout timer is armed.
    #[must_use]
    pub fn has_pending_timeout(&self) -> bool {
        self.load_timeout.is_some()
    }

    /// Returns `true` while the settle-delay timer is armed.
    #[must_use]
    pub fn has_pending_settle(&self) -> bool {
        self.settle.is_some()
    }

    /// Returns the mounted scaffold, if any.
    #[must_use]
    pub fn scaffold(&self) -> Option<&dyn Scaffold> {
        self.scaffold.as_deref()
    }

    /// Returns the bridge, if a load sequence created one.
    #[must_use]
    pub fn bridge(&self) -> Option<&Bridge> {
        self.bridge.as_ref()
    }

    /// Takes the surface side of the transport.
    ///
    /// Transport glue binds this to the actual embedded frame; tests use
    /// it to play the embedded surface.
    #[must_use]
    pub fn take_frame_handle(&mut self) -> Option<FrameHandle> {
        self.surface_handle.take()
    }

    /// Subscribes to lifecycle events.
    pub fn on(
        &self,
        event: WidgetEvent,
        handler: impl Fn(&WidgetEventPayload) + Send + Sync + 'static,
    ) -> Subscription<WidgetEvent> {
        self.events.on(event, handler)
    }

    /// Unsubscribes a lifecycle handler.
    pub fn off(&self, subscription: &Subscription<WidgetEvent>) {
        self.events.off(subscription);
    }

    /// Mounts the scaffold and, unless suppressed, starts the load
    /// sequence.
    ///
    /// A fresh render resets a previously closed widget.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingContainer`] without a mount target
    /// - configuration validation failures ([`Config::validate`])
    /// - [`ConfigError::InvalidUrl`] when the frame URL cannot be built
    pub fn render(&mut self, params: RenderParams) -> Result<(), ConfigError> {
        let RenderParams {
            container,
            fast_auth_disabled,
            query,
        } = params;
        let mut scaffold = container.ok_or(ConfigError::MissingContainer)?;
        self.config.validate()?;

        self.closed = false;
        self.load_timeout = None;
        self.settle = None;

        scaffold.mount(&self.id);
        self.scaffold = Some(scaffold);
        self.state = WidgetState::NotLoaded;
        self.write_data_state();

        if fast_auth_disabled {
            debug!(id = %self.id, "rendered without automatic load");
            return Ok(());
        }

        self.load_frame(query)
    }

    /// Tears the widget down: cancels timers, removes the scaffold,
    /// releases the bridge, emits `Close`.
    ///
    /// Safe from any state, including before render and after a
    /// previous close; repeat calls are no-ops. Only a fresh `render()`
    /// brings the instance back.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.load_timeout = None;
        self.settle = None;
        self.state = WidgetState::NotLoaded;

        if let Some(mut scaffold) = self.scaffold.take() {
            scaffold.remove_root();
        }
        if let Some(mut bridge) = self.bridge.take() {
            bridge.destroy();
        }
        self.surface_handle = None;

        debug!(id = %self.id, "widget closed");
        self.events.emit(&WidgetEvent::Close, &WidgetEventPayload::Empty);
    }

    /// Makes the scaffold visible and emits `Show`.
    ///
    /// A no-op when no scaffold exists or the widget is closed.
    pub fn show(&mut self) -> &mut Self {
        if !self.closed {
            if let Some(scaffold) = self.scaffold.as_deref_mut() {
                scaffold.set_visible(true);
                self.events.emit(&WidgetEvent::Show, &WidgetEventPayload::Empty);
            }
        }
        self
    }

    /// Hides the scaffold and emits `Hide`.
    ///
    /// A no-op when no scaffold exists or the widget is closed.
    pub fn hide(&mut self) -> &mut Self {
        if !self.closed {
            if let Some(scaffold) = self.scaffold.as_deref_mut() {
                scaffold.set_visible(false);
                self.events.emit(&WidgetEvent::Hide, &WidgetEventPayload::Empty);
            }
        }
        self
    }

    /// Forwards a message to the embedded surface.
    ///
    /// # Errors
    ///
    /// [`ChannelError::Closed`] when no load sequence is active.
    pub fn send(&self, message: WireMessage) -> Result<(), ChannelError> {
        match &self.bridge {
            Some(bridge) => bridge.send(message),
            None => Err(ChannelError::Closed),
        }
    }

    /// Builds the redirect target carrying an authentication payload.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidUrl`] when the configured redirect target
    /// does not parse.
    pub fn redirect_url(&self, payload: &Value) -> Result<String, ConfigError> {
        url::redirect_with_payload_url(payload, &self.config)
    }

    /// Runs one clock-driven supervision step.
    ///
    /// Fires due timers, then drains and routes buffered bridge
    /// messages. The explicit `now` keeps the core deterministic for
    /// tests; [`drive`](Self::drive) passes the real clock.
    pub fn pump(&mut self, now: Instant) {
        if self.closed {
            return;
        }

        if self.load_timeout.is_some_and(|t| t.is_due(now)) {
            self.load_timeout = None;
            self.on_error(WidgetError::timeout_exceeded());
        }

        if !self.closed && self.settle.is_some_and(|t| t.is_due(now)) {
            self.settle = None;
            self.finish_load();
        }

        if self.closed {
            return;
        }
        let messages = match self.bridge.as_mut() {
            Some(bridge) => bridge.drain(),
            None => Vec::new(),
        };
        for message in messages {
            self.on_bridge_message(message);
            if self.closed {
                break;
            }
        }
    }

    /// Supervises the widget until it closes or the surface goes away.
    ///
    /// Sleeps until the earlier of the next timer deadline and the next
    /// inbound message, then runs the synchronous core. Returns when the
    /// widget is closed, when no load sequence is active, or when the
    /// surface side of the transport is gone.
    pub async fn drive(&mut self) {
        loop {
            if self.closed {
                return;
            }
            let deadline = self.next_deadline();
            let Some(bridge) = self.bridge.as_mut() else {
                return;
            };

            let inbound = match deadline {
                Some(due) => {
                    tokio::select! {
                        message = bridge.recv() => Some(message),
                        () = tokio::time::sleep_until(tokio::time::Instant::from_std(due)) => None,
                    }
                }
                None => Some(bridge.recv().await),
            };

            match inbound {
                Some(Some(message)) => {
                    self.on_bridge_message(message);
                    self.pump(Instant::now());
                }
                Some(None) => {
                    // Surface side gone; fire anything already due and stop
                    self.pump(Instant::now());
                    return;
                }
                None => self.pump(Instant::now()),
            }
        }
    }

    // === Load sequence ===

    fn load_frame(&mut self, query: BTreeMap<String, String>) -> Result<(), ConfigError> {
        let mut query = query;
        query
            .entry("lang".to_string())
            .or_insert_with(|| self.lang.code().to_string());
        query
            .entry("scheme".to_string())
            .or_insert_with(|| self.scheme.code().to_string());

        // Build the URL before touching any state so a bad config fails
        // the render without arming timers
        let src = url::frame_url(&self.app_name, &self.host_origin, &query, &self.config)?;

        self.start_load();

        let (channel, handle) = FrameChannel::with_defaults();
        let bridge = Bridge::new(channel, self.config.frame_origin());
        let widget_id = self.id;
        bridge.on(BridgeEvent::Message, move |message| {
            trace!(widget = %widget_id, handler = %message.handler, "bridge message");
        });
        self.surface_handle = Some(handle);
        self.bridge = Some(bridge);

        if let Some(scaffold) = self.scaffold.as_deref_mut() {
            scaffold.set_frame_src(&src);
        }
        Ok(())
    }

    fn start_load(&mut self) {
        self.state = WidgetState::Loading;
        self.write_data_state();
        // Entering Loading always (re)arms the budget
        self.load_timeout = Some(ScheduledTask::after(self.config.timeouts.load()));
        self.settle = None;
        debug!(id = %self.id, budget_ms = self.config.timeouts.load_ms, "load started");
        self.events
            .emit(&WidgetEvent::StartLoad, &WidgetEventPayload::Empty);
    }

    fn finish_load(&mut self) {
        self.state = WidgetState::Loaded;
        self.write_data_state();
        debug!(id = %self.id, "widget loaded");
        self.events.emit(&WidgetEvent::Load, &WidgetEventPayload::Empty);
    }

    // === Inbound protocol routing ===

    fn on_bridge_message(&mut self, message: FrameMessage) {
        if self.closed {
            return;
        }
        match ProtocolMessage::parse(&message) {
            Some(ProtocolMessage::Load) => self.on_load(),
            Some(ProtocolMessage::Close) => self.close(),
            Some(ProtocolMessage::Error(details)) => {
                self.on_error(WidgetError::internal(details));
            }
            Some(ProtocolMessage::Resize { height }) => {
                if let Some(scaffold) = self.scaffold.as_deref_mut() {
                    scaffold.set_height(height);
                }
            }
            None => {
                trace!(handler = %message.handler, "ignoring unrecognized protocol message");
            }
        }
    }

    fn on_load(&mut self) {
        // A confirmation arriving after the error path already ran (or
        // after the settle already completed) must not transition again
        if self.state != WidgetState::Loading {
            trace!(id = %self.id, state = %self.state, "stale load confirmation ignored");
            return;
        }
        self.load_timeout = None;
        self.settle = Some(ScheduledTask::after(self.config.timeouts.settle()));
        debug!(id = %self.id, settle_ms = self.config.timeouts.settle_ms, "load confirmed");
    }

    fn on_error(&mut self, error: WidgetError) {
        self.load_timeout = None;
        self.settle = None;
        self.state = WidgetState::NotLoaded;
        self.write_data_state();
        debug!(id = %self.id, code = %error.code.code(), "widget error");

        self.events.emit(
            &WidgetEvent::AuthenticationInfo,
            &WidgetEventPayload::AuthenticationInfo { is_online: false },
        );
        self.events
            .emit(&WidgetEvent::Error, &WidgetEventPayload::Error(error));

        // The frame goes, the scaffold stays: the host may retry
        if let Some(scaffold) = self.scaffold.as_deref_mut() {
            scaffold.remove_frame();
        }
    }

    // === Helpers ===

    fn write_data_state(&mut self) {
        let state = self.state;
        if let Some(scaffold) = self.scaffold.as_deref_mut() {
            scaffold.set_state(state);
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        match (self.load_timeout, self.settle) {
            (Some(a), Some(b)) => Some(a.due_at().min(b.due_at())),
            (Some(a), None) => Some(a.due_at()),
            (None, Some(b)) => Some(b.due_at()),
            (None, None) => None,
        }
    }
}

impl std::fmt::Debug for Widget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Widget")
            .field("id", &self.id)
            .field("app_name", &self.app_name)
            .field("state", &self.state)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
