//! Source Error Types
//!
//! Structured errors using `exn` for automatic location tracking. These
//! only cover source *construction* (seed loading); once a source is
//! running, every failure collapses into the `NotAvailable` read outcome
//! instead of surfacing here.

use derive_more::{Display, Error};

/// A source error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for source construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("seed asset not found: {_0}")]
    SeedNotFound(#[error(not(source))] String),
    #[display("invalid seed data")]
    InvalidSeed,
}
