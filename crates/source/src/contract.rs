use async_trait::async_trait;
use shelf_model::{Book, BookId};
use std::sync::Arc;

/// Outcome of a read against a data source.
///
/// There are exactly two terminal outcomes: the payload, or the unified
/// "no data" signal. An empty result set and an unclassified storage
/// failure are indistinguishable to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    Loaded(T),
    NotAvailable,
}

impl<T> Fetched<T> {
    /// Convert into an `Option`, discarding the not-available marker.
    pub fn loaded(self) -> Option<T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::NotAvailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Map the payload, propagating `NotAvailable`.
    pub fn map<U>(self, op: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Self::Loaded(value) => Fetched::Loaded(op(value)),
            Self::NotAvailable => Fetched::NotAvailable,
        }
    }
}
impl<T> From<Option<T>> for Fetched<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Loaded(value),
            None => Self::NotAvailable,
        }
    }
}

/// Shared handle to a data source, as composed by the repository.
pub type SourceHandle = Arc<dyn BookDataSource + Send + Sync>;

/// Unified interface for book data sources.
///
/// Reads resolve to [`Fetched`]. Writes are fire-and-forget: they carry no
/// failure channel, and callers must not assume the record is durable when
/// the call returns.
#[async_trait]
pub trait BookDataSource: Send + Sync {
    /// Name of the source (used for logging only).
    fn name(&self) -> &str;

    /// Load every record.
    ///
    /// Resolves to `NotAvailable` when the source holds no records; a
    /// missing table and an empty one are indistinguishable, and that
    /// signal is what triggers fallback to the next source.
    async fn load_all(&self) -> Fetched<Vec<Book>>;

    /// Load one record by id.
    async fn get_one(&self, id: &BookId) -> Fetched<Book>;

    /// Insert or replace one record.
    async fn save(&self, book: Book);

    /// Insert or replace a batch of records.
    async fn save_all(&self, books: Vec<Book>);

    /// Remove one record by id.
    async fn delete(&self, id: &BookId);

    /// Remove every record.
    async fn delete_all(&self);
}
