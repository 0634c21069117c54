//! Scriptable data source for tests.

use crate::contract::{BookDataSource, Fetched};
use async_trait::async_trait;
use indexmap::IndexMap;
use shelf_model::{Book, BookId};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory data source with per-operation call counters.
///
/// Behaves like a fully working source over an insertion-ordered table
/// (`load_all` reports `NotAvailable` when empty, writes land
/// synchronously), while counting how often each operation was invoked so
/// tests can assert on the repository's routing.
#[derive(Default)]
pub struct MockSource {
    table: Mutex<IndexMap<BookId, Book>>,
    load_all_count: AtomicUsize,
    get_one_count: AtomicUsize,
    save_count: AtomicUsize,
    save_all_count: AtomicUsize,
    delete_count: AtomicUsize,
    delete_all_count: AtomicUsize,
}

impl MockSource {
    /// Create an empty mock: every read resolves to `NotAvailable`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a mock pre-populated with records.
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        let mock = Self::default();
        mock.table
            .lock()
            .unwrap()
            .extend(books.into_iter().map(|book| (book.id().clone(), book)));
        mock
    }

    /// Snapshot of the mock's current table, in insertion order.
    pub fn books(&self) -> Vec<Book> {
        self.table.lock().unwrap().values().cloned().collect()
    }

    pub fn load_all_calls(&self) -> usize {
        self.load_all_count.load(Ordering::Relaxed)
    }

    pub fn get_one_calls(&self) -> usize {
        self.get_one_count.load(Ordering::Relaxed)
    }

    pub fn save_calls(&self) -> usize {
        self.save_count.load(Ordering::Relaxed)
    }

    pub fn save_all_calls(&self) -> usize {
        self.save_all_count.load(Ordering::Relaxed)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_count.load(Ordering::Relaxed)
    }

    pub fn delete_all_calls(&self) -> usize {
        self.delete_all_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl BookDataSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn load_all(&self) -> Fetched<Vec<Book>> {
        self.load_all_count.fetch_add(1, Ordering::Relaxed);
        let table = self.table.lock().unwrap();
        if table.is_empty() {
            return Fetched::NotAvailable;
        }
        Fetched::Loaded(table.values().cloned().collect())
    }

    async fn get_one(&self, id: &BookId) -> Fetched<Book> {
        self.get_one_count.fetch_add(1, Ordering::Relaxed);
        self.table.lock().unwrap().get(id).cloned().into()
    }

    async fn save(&self, book: Book) {
        self.save_count.fetch_add(1, Ordering::Relaxed);
        self.table.lock().unwrap().insert(book.id().clone(), book);
    }

    async fn save_all(&self, books: Vec<Book>) {
        self.save_all_count.fetch_add(1, Ordering::Relaxed);
        let mut table = self.table.lock().unwrap();
        for book in books {
            table.insert(book.id().clone(), book);
        }
    }

    async fn delete(&self, id: &BookId) {
        self.delete_count.fetch_add(1, Ordering::Relaxed);
        self.table.lock().unwrap().shift_remove(id);
    }

    async fn delete_all(&self) {
        self.delete_all_count.fetch_add(1, Ordering::Relaxed);
        self.table.lock().unwrap().clear();
    }
}
