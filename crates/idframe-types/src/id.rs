//! Widget identifier.
//!
//! Every widget instance owns a unique id. The id doubles as the DOM
//! anchor: the template generator stamps it on the root container, and
//! the widget finds its scaffold elements through it.

use serde::{Deserialize, Serialize};
use uuid::{uuid, Uuid};

/// IDFrame namespace UUID for deterministic UUID v5 generation.
///
/// Used as the namespace when deriving stable UUIDs for named widget
/// kinds via UUID v5 (SHA-1 based).
const IDFRAME_NAMESPACE: Uuid = uuid!("6c1f9e4a-52d7-4be1-9a83-27f0c04d11b5");

/// Identifier for one mounted widget instance.
///
/// # UUID Strategy
///
/// - **Anonymous instances**: UUID v4 (random) - every `render()` target
///   on a page gets its own identity.
/// - **Named widget kinds**: UUID v5 (deterministic from the kind name) -
///   useful when a host wants a stable anchor across reloads.
///
/// # Example
///
/// ```
/// use idframe_types::WidgetId;
///
/// let a = WidgetId::new();
/// let b = WidgetId::new();
/// assert_ne!(a, b);              // Anonymous ids are unique
///
/// let t1 = WidgetId::named("one-tap");
/// let t2 = WidgetId::named("one-tap");
/// assert_eq!(t1, t2);            // Named ids are stable
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetId(pub Uuid);

impl WidgetId {
    /// Creates a new [`WidgetId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a deterministic [`WidgetId`] for a named widget kind.
    ///
    /// The UUID is derived from the IDFrame namespace UUID and the kind
    /// name, so the same name always produces the same id.
    ///
    /// # Example
    ///
    /// ```
    /// use idframe_types::WidgetId;
    ///
    /// let one_tap = WidgetId::named("one-tap");
    /// let floating = WidgetId::named("floating-one-tap");
    /// assert_ne!(one_tap, floating);
    /// ```
    #[must_use]
    pub fn named(kind: &str) -> Self {
        Self(Uuid::new_v5(&IDFRAME_NAMESPACE, kind.as_bytes()))
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// Returns the id in DOM-attribute form (`idframe-<uuid>`).
    ///
    /// This is the value the template generator writes into the root
    /// container's `id` attribute.
    #[must_use]
    pub fn dom_id(&self) -> String {
        format!("idframe-{}", self.0)
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "widget:{}", self.0)
    }
}
