//! # hyperact-error
//!
//! Error type shared by the hyperact crates.
//!
//! - **ErrorKind**: what went wrong (e.g. `ParseFailed`, `InvariantViolation`)
//! - **Operation**: where it went wrong, chained as the error travels up
//! - **Context**: ordered key/value pairs that help locate the cause
//!
//! ```rust
//! use hyperact_error::{Error, ErrorKind};
//!
//! fn example() -> hyperact_error::Result<()> {
//!     Err(Error::new(ErrorKind::ParseFailed, "unknown record")
//!         .with_operation("graph::load")
//!         .with_context("line", "7"))
//! }
//! ```
//!
//! The action registry itself reports through booleans and logging; these
//! values are what it logs, and what the outer layers return.

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using hyperact Error
pub type Result<T> = std::result::Result<T, Error>;
