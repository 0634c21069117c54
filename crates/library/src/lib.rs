//! Coordination layer over the local and remote book sources.
//!
//! [`Repository`] owns the in-memory cache and implements the
//! cache/local/remote fetch policy. [`Library`] wires a whole stack
//! together from a [`LibraryConfig`]; [`BookFilter`] and [`Statistics`]
//! are the pure projections the list and statistics screens sit on.

pub mod config;
pub mod error;
mod filter;
mod library;
mod repository;
mod stats;

pub use crate::config::LibraryConfig;
pub use crate::filter::BookFilter;
pub use crate::library::Library;
pub use crate::repository::Repository;
pub use crate::stats::Statistics;
