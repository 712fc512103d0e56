//! Generic typed publish/subscribe hub.
//!
//! One [`Dispatcher`] instance owns one private subscriber registry -
//! nothing is shared across widget instances. The registry maps an event
//! key to an ordered list of handlers; emission walks a snapshot of that
//! list so re-entrant subscription from inside a handler cannot corrupt
//! iteration.
//!
//! # Failure Policy
//!
//! Handlers are infallible closures. A panicking handler unwinds through
//! [`Dispatcher::emit`] into the emitting call - nothing is swallowed and
//! no sibling handler runs after the panic. Hosts that need isolation
//! should catch at their own boundary.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

type Handler<P> = Arc<dyn Fn(&P) + Send + Sync>;

struct Registry<E, P> {
    next_id: u64,
    handlers: HashMap<E, Vec<(u64, Handler<P>)>>,
}

/// Token returned by [`Dispatcher::on`], used to unsubscribe.
///
/// Dropping the token does NOT unsubscribe; pass it to
/// [`Dispatcher::off`]. Destroying the owning dispatcher (or calling
/// [`Dispatcher::clear`]) releases every handler at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription<E> {
    event: E,
    id: u64,
}

/// Typed publish/subscribe hub.
///
/// Generic over the event key `E` and the payload `P`. The same type
/// serves the bridge (protocol messages) and the widget (lifecycle
/// notifications).
///
/// # Ordering
///
/// Handlers for one event run in insertion order, each at most once per
/// emission, synchronously in the emitting call's context.
pub struct Dispatcher<E, P> {
    registry: Arc<Mutex<Registry<E, P>>>,
}

impl<E, P> Dispatcher<E, P>
where
    E: Eq + Hash + Clone,
{
    /// Creates an empty dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                handlers: HashMap::new(),
            })),
        }
    }

    /// Registers `handler` for `event`.
    ///
    /// Handlers registered while an emission for the same event is in
    /// flight run from the next emission onward.
    pub fn on(&self, event: E, handler: impl Fn(&P) + Send + Sync + 'static) -> Subscription<E> {
        let mut registry = self.registry.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .handlers
            .entry(event.clone())
            .or_default()
            .push((id, Arc::new(handler)));
        Subscription { event, id }
    }

    /// Removes the handler identified by `subscription`.
    ///
    /// Removing twice, or removing after [`clear`](Self::clear), is a
    /// no-op.
    pub fn off(&self, subscription: &Subscription<E>) {
        let mut registry = self.registry.lock();
        if let Some(handlers) = registry.handlers.get_mut(&subscription.event) {
            handlers.retain(|(id, _)| *id != subscription.id);
        }
    }

    /// Invokes every handler currently registered for `event`.
    ///
    /// The handler list is snapshotted before the first invocation and
    /// the registry lock is released, so handlers may freely subscribe,
    /// unsubscribe, or emit again without deadlocking.
    pub fn emit(&self, event: &E, payload: &P) {
        let snapshot: Vec<Handler<P>> = {
            let registry = self.registry.lock();
            registry
                .handlers
                .get(event)
                .map(|handlers| handlers.iter().map(|(_, h)| Arc::clone(h)).collect())
                .unwrap_or_default()
        };

        for handler in snapshot {
            handler(payload);
        }
    }

    /// Returns the number of handlers registered for `event`.
    #[must_use]
    pub fn handler_count(&self, event: &E) -> usize {
        self.registry
            .lock()
            .handlers
            .get(event)
            .map_or(0, Vec::len)
    }

    /// Removes every handler for every event.
    pub fn clear(&self) {
        self.registry.lock().handlers.clear();
    }
}

impl<E, P> Default for Dispatcher<E, P>
where
    E: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, P> Clone for Dispatcher<E, P> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E, P> std::fmt::Debug for Dispatcher<E, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}
