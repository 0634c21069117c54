//! The common book data-source contract and its implementations.
//!
//! [`BookDataSource`] is the single read/write interface the repository
//! composes over. Exactly two production variants conform to it:
//! [`LocalSource`], which funnels every operation through one background
//! worker over the on-device store, and [`RemoteSource`], a backend
//! stand-in seeded from a bundled JSON asset. `MockSource` (behind the
//! `mock` feature) is a scriptable third variant for tests.
//!
//! Reads resolve to [`Fetched`]: the payload, or the unified "no data"
//! outcome. Writes are fire-and-forget and expose no failure channel.

mod contract;
pub mod error;
mod local;
#[cfg(feature = "mock")]
mod mock;
mod remote;
mod seed;

pub use crate::contract::{BookDataSource, Fetched, SourceHandle};
pub use crate::local::LocalSource;
#[cfg(feature = "mock")]
pub use crate::mock::MockSource;
pub use crate::remote::RemoteSource;
