//! Message provenance.
//!
//! An [`Origin`] is the scheme+host[+port] string a browsing context
//! reports as the sender of a cross-context message. The bridge accepts a
//! message only when its origin matches the expected origin EXACTLY -
//! no suffix matching, no normalization beyond what the constructor does.
//! Anything looser opens the door to `id.example.evil.com` lookalikes.

use serde::{Deserialize, Serialize};

/// An exact-match origin string (e.g. `https://id.idframe.dev`).
///
/// # Comparison Semantics
///
/// Two origins are equal iff their strings are byte-equal. A trailing
/// slash, a different scheme, or a different port all make a different
/// origin. This mirrors how browsing contexts compare origins and is the
/// only safe default for message filtering.
///
/// # Example
///
/// ```
/// use idframe_types::Origin;
///
/// let expected = Origin::new("https://id.idframe.dev");
/// assert!(expected.matches("https://id.idframe.dev"));
/// assert!(!expected.matches("https://id.idframe.dev:8443"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Origin(String);

impl Origin {
    /// Creates an origin from its string form.
    ///
    /// Trailing whitespace is trimmed; everything else is kept verbatim.
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        let s: String = origin.into();
        Self(s.trim().to_string())
    }

    /// Builds the `https://<host>` origin for a hosted frame domain.
    ///
    /// # Example
    ///
    /// ```
    /// use idframe_types::Origin;
    ///
    /// let origin = Origin::https("id.idframe.dev");
    /// assert_eq!(origin.as_str(), "https://id.idframe.dev");
    /// ```
    #[must_use]
    pub fn https(host: &str) -> Self {
        Self(format!("https://{host}"))
    }

    /// Returns the origin string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` iff `other` is byte-equal to this origin.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Origin {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
