//! Unified error interface.
//!
//! Every error enum in the SDK implements [`ErrorCode`] so hosts can
//! branch on stable machine-readable codes instead of display strings,
//! and so retry affordances can be driven off recoverability.
//!
//! # Example
//!
//! ```
//! use idframe_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum LoadError {
//!     Timeout,
//!     BadParams(String),
//! }
//!
//! impl ErrorCode for LoadError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Timeout => "LOAD_TIMEOUT",
//!             Self::BadParams(_) => "LOAD_BAD_PARAMS",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Timeout)
//!     }
//! }
//!
//! assert_eq!(LoadError::Timeout.code(), "LOAD_TIMEOUT");
//! assert!(LoadError::Timeout.is_recoverable());
//! ```

/// Stable, machine-readable error code interface.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**: e.g. `"WIDGET_TIMEOUT_EXCEEDED"`
/// - **Domain-prefixed**: `"WIDGET_"`, `"BRIDGE_"`, `"CONFIG_"`, ...
/// - **Stable**: once published, a code never changes (API contract)
///
/// # Recoverability
///
/// An error is recoverable when retrying the operation may succeed (a
/// transient condition like a load timeout) or the user can fix it
/// without a code change. Programmer errors - missing mount target,
/// conflicting configuration - are not.
pub trait ErrorCode {
    /// Returns the machine-readable code for this error.
    fn code(&self) -> &'static str;

    /// Returns whether retrying may succeed.
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows SDK conventions.
///
/// # Checks
///
/// 1. Code is non-empty
/// 2. Code starts with the expected prefix
/// 3. Code is UPPER_SNAKE_CASE
///
/// # Panics
///
/// Panics with a descriptive message if any check fails. Intended for
/// use in tests.
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );
    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Validates every variant of an error enum at once.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }
    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
