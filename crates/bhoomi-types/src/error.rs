//! Unified error interface.
//!
//! Every fallible layer of the dashboard core (profile store, config,
//! app wiring) implements [`ErrorCode`] so callers can react to a stable
//! machine-readable code instead of matching on display strings.
//!
//! # Design
//!
//! - **Machine-readable codes**: stable `UPPER_SNAKE_CASE` identifiers,
//!   prefixed per layer (`STORE_`, `CONFIG_`, `APP_`).
//! - **Recoverability**: a single hint separating "retry may help" (a
//!   store that timed out) from "retry cannot help" (a config file that
//!   does not parse). The session machine uses exactly this hint to
//!   decide whether a failed resolution is worth surfacing as retryable.
//!
//! # Example
//!
//! ```
//! use bhoomi_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum LookupError {
//!     Timeout,
//!     BadKey(String),
//! }
//!
//! impl ErrorCode for LookupError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Timeout => "LOOKUP_TIMEOUT",
//!             Self::BadKey(_) => "LOOKUP_BAD_KEY",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Timeout)
//!     }
//! }
//!
//! assert_eq!(LookupError::Timeout.code(), "LOOKUP_TIMEOUT");
//! assert!(LookupError::Timeout.is_recoverable());
//! ```

/// Stable error code interface implemented by every error enum in the
/// workspace.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**: e.g. `"STORE_UNAVAILABLE"`
/// - **Layer-prefixed**: `"STORE_"`, `"CONFIG_"`, `"APP_"`
/// - **Stable**: a published code never changes meaning (API contract)
///
/// # Recoverability
///
/// Recoverable errors are transient conditions where retrying the same
/// operation may succeed: an unreachable store, a timeout. Unrecoverable
/// errors will fail identically on retry: malformed config, a builder
/// missing a required collaborator.
pub trait ErrorCode {
    /// Returns the machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether retrying the failed operation may succeed.
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows workspace conventions.
///
/// Checks, in order: the code is non-empty, carries the expected layer
/// prefix, and is UPPER_SNAKE_CASE.
///
/// # Panics
///
/// Panics with a descriptive message when any check fails. Intended for
/// use inside tests.
///
/// # Example
///
/// ```
/// use bhoomi_types::{assert_error_code, ErrorCode};
///
/// #[derive(Debug)]
/// struct Unreachable;
///
/// impl ErrorCode for Unreachable {
///     fn code(&self) -> &'static str { "STORE_UNAVAILABLE" }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// assert_error_code(&Unreachable, "STORE_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");

    assert!(
        code.starts_with(expected_prefix),
        "Error code '{code}' must start with prefix '{expected_prefix}'"
    );

    assert!(
        is_upper_snake_case(code),
        "Error code '{code}' must be UPPER_SNAKE_CASE"
    );
}

/// Validates every variant of an error enum at once.
///
/// # Example
///
/// ```
/// use bhoomi_types::{assert_error_codes, ErrorCode};
///
/// #[derive(Debug)]
/// enum StoreError { Unavailable, Malformed }
///
/// impl ErrorCode for StoreError {
///     fn code(&self) -> &'static str {
///         match self {
///             Self::Unavailable => "STORE_UNAVAILABLE",
///             Self::Malformed => "STORE_MALFORMED_RECORD",
///         }
///     }
///     fn is_recoverable(&self) -> bool {
///         matches!(self, Self::Unavailable)
///     }
/// }
///
/// assert_error_codes(&[StoreError::Unavailable, StoreError::Malformed], "STORE_");
/// ```
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

/// Checks if a string is UPPER_SNAKE_CASE.
fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }

    if s.starts_with('_') || s.ends_with('_') {
        return false;
    }

    if s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
