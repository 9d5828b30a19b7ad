//! Error kinds for hyperact operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Match on this to decide how to handle a specific failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// Invalid argument passed to function
    InvalidArgument,

    // =========================================================================
    // Input errors
    // =========================================================================
    /// Failed to parse an input file
    ParseFailed,

    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    // =========================================================================
    // Registry errors
    // =========================================================================
    /// No action registered under the requested name
    ActionNotFound,

    /// A graph element referenced by id does not exist
    ElementNotFound,

    /// An action was registered into a collection with another name
    NameMismatch,

    /// A registry invariant would have been broken
    InvariantViolation,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Whether this kind marks registry corruption rather than bad input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ErrorKind::InvariantViolation)
    }
}
