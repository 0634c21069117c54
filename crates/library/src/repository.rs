//! The cache-over-local-over-remote coordinator.

use indexmap::IndexMap;
use shelf_model::{Book, BookId};
use shelf_source::{Fetched, SourceHandle};
use tracing::debug;

/// Coordinates the remote and local sources behind an in-memory cache.
///
/// Synchronisation between locally persisted data and the backend is
/// deliberately dumb: the remote source is consulted only when the local
/// table is missing or empty, or when a refresh has marked the cache
/// dirty.
///
/// The cache is an insertion-ordered id-to-record map, authoritative while
/// clean. It is only ever touched through `&mut self` — there is no
/// internal locking, and none is needed. The repository is a plain owned
/// value: construct it once and pass it to whoever drives it.
pub struct Repository {
    remote: SourceHandle,
    local: SourceHandle,
    cache: Option<IndexMap<BookId, Book>>,
    dirty: bool,
}

impl Repository {
    pub fn new(remote: SourceHandle, local: SourceHandle) -> Self {
        Self { remote, local, cache: None, dirty: false }
    }

    /// Load every book from cache, local store or remote source, whichever
    /// answers first.
    ///
    /// A successful full load replaces the cache wholesale and clears the
    /// dirty flag. A remote result is additionally persisted into the
    /// local source so the next cold start is served locally. Resolves to
    /// `NotAvailable` only when both sources do, leaving the cache
    /// untouched.
    pub async fn get_all(&mut self) -> Fetched<Vec<Book>> {
        // Respond immediately with the cache if present and not dirty.
        if !self.dirty
            && let Some(cache) = &self.cache
        {
            return Fetched::Loaded(cache.values().cloned().collect());
        }
        if self.dirty {
            return self.get_all_from_remote().await;
        }
        match self.local.load_all().await {
            Fetched::Loaded(books) => {
                self.refill_cache(&books);
                Fetched::Loaded(books)
            }
            Fetched::NotAvailable => self.get_all_from_remote().await,
        }
    }

    async fn get_all_from_remote(&mut self) -> Fetched<Vec<Book>> {
        match self.remote.load_all().await {
            Fetched::Loaded(books) => {
                self.refill_cache(&books);
                self.local.save_all(books.clone()).await;
                Fetched::Loaded(books)
            }
            Fetched::NotAvailable => {
                debug!("no data available from either source");
                Fetched::NotAvailable
            }
        }
    }

    /// Look up one book by id from cache, local store or remote source.
    ///
    /// Hits below the cache are inserted into it; a remote hit is not
    /// written back to the local store.
    pub async fn get_one(&mut self, id: &BookId) -> Fetched<Book> {
        if let Some(book) = self.cache.as_ref().and_then(|cache| cache.get(id)) {
            return Fetched::Loaded(book.clone());
        }
        match self.local.get_one(id).await {
            Fetched::Loaded(book) => {
                self.cache_upsert(book.clone());
                Fetched::Loaded(book)
            }
            Fetched::NotAvailable => match self.remote.get_one(id).await {
                Fetched::Loaded(book) => {
                    self.cache_upsert(book.clone());
                    Fetched::Loaded(book)
                }
                Fetched::NotAvailable => Fetched::NotAvailable,
            },
        }
    }

    /// Write a book to both sources and update the cache immediately.
    ///
    /// The underlying writes are fire-and-forget: the cache reflects the
    /// record before either source has made it durable.
    pub async fn save(&mut self, book: Book) {
        self.remote.save(book.clone()).await;
        self.local.save(book.clone()).await;
        self.cache_upsert(book);
    }

    /// Flip the favorite flag on a record, writing through the save path.
    ///
    /// Resolves to the updated record, or `NotAvailable` when no source
    /// knows the id.
    pub async fn set_favorite(&mut self, id: &BookId, favorite: bool) -> Fetched<Book> {
        match self.get_one(id).await {
            Fetched::Loaded(mut book) => {
                book.favorite = favorite;
                self.save(book.clone()).await;
                Fetched::Loaded(book)
            }
            Fetched::NotAvailable => Fetched::NotAvailable,
        }
    }

    /// Delete one record from both sources and the cache.
    ///
    /// The cache change is immediate even though the source deletes may
    /// still be in flight.
    pub async fn delete(&mut self, id: &BookId) {
        self.remote.delete(id).await;
        self.local.delete(id).await;
        if let Some(cache) = &mut self.cache {
            cache.shift_remove(id);
        }
    }

    /// Delete every record from both sources and the cache.
    pub async fn delete_all(&mut self) {
        self.remote.delete_all().await;
        self.local.delete_all().await;
        self.cache.get_or_insert_default().clear();
    }

    /// Mark the cache dirty: the next full load bypasses the local source,
    /// refreshes from remote and overwrites the cache.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn refill_cache(&mut self, books: &[Book]) {
        let cache = self.cache.get_or_insert_default();
        cache.clear();
        for book in books {
            cache.insert(book.id().clone(), book.clone());
        }
        self.dirty = false;
    }

    fn cache_upsert(&mut self, book: Book) {
        self.cache.get_or_insert_default().insert(book.id().clone(), book);
    }
}
