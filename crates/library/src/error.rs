//! Library Error Types
//!
//! Structured errors using `exn` for automatic location tracking. These
//! cover configuration loading and stack wiring; repository reads use the
//! two-outcome [`Fetched`](shelf_source::Fetched) contract instead and
//! never produce an `Error`.

use derive_more::{Display, Error};

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("configuration error")]
    Config,
    #[display("could not open the local store")]
    Store,
    #[display("could not seed the remote stand-in")]
    Seed,
}
