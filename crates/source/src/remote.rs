//! Backend stand-in with static data for easy testing.

use crate::contract::{BookDataSource, Fetched};
use crate::error::Result;
use crate::seed;
use async_trait::async_trait;
use indexmap::IndexMap;
use shelf_model::{Book, BookId};
use std::time::Duration;
use tokio::sync::RwLock;

/// In-process stand-in for the backend.
///
/// Seeded once at construction from a bundled JSON catalogue, then behaves
/// as an ordinary CRUD table held in memory, in insertion order. No real
/// network I/O happens; an optional fixed latency before each response
/// exercises the asynchronous paths the way a real backend would.
///
/// `load_all` reports `NotAvailable` only when the table is genuinely
/// empty — a real backend could fail, this stand-in does not.
pub struct RemoteSource {
    table: RwLock<IndexMap<BookId, Book>>,
    latency: Option<Duration>,
}

impl RemoteSource {
    /// Seed from the bundled default catalogue.
    pub fn from_bundled_seed() -> Result<Self> {
        Self::from_seed_asset(seed::DEFAULT_SEED)
    }

    /// Seed from a named bundled asset.
    pub fn from_seed_asset(asset: &str) -> Result<Self> {
        Ok(Self::with_books(seed::load(asset)?))
    }

    /// Build from explicit records (fixtures in tests).
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        let table = books.into_iter().map(|book| (book.id().clone(), book)).collect();
        Self { table: RwLock::new(table), latency: None }
    }

    /// Delay every response by a fixed duration.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    async fn round_trip(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl BookDataSource for RemoteSource {
    fn name(&self) -> &str {
        "remote"
    }

    async fn load_all(&self) -> Fetched<Vec<Book>> {
        self.round_trip().await;
        let table = self.table.read().await;
        if table.is_empty() {
            return Fetched::NotAvailable;
        }
        Fetched::Loaded(table.values().cloned().collect())
    }

    async fn get_one(&self, id: &BookId) -> Fetched<Book> {
        self.round_trip().await;
        self.table.read().await.get(id).cloned().into()
    }

    async fn save(&self, book: Book) {
        self.round_trip().await;
        self.table.write().await.insert(book.id().clone(), book);
    }

    async fn save_all(&self, books: Vec<Book>) {
        self.round_trip().await;
        let mut table = self.table.write().await;
        for book in books {
            table.insert(book.id().clone(), book);
        }
    }

    async fn delete(&self, id: &BookId) {
        self.round_trip().await;
        self.table.write().await.shift_remove(id);
    }

    async fn delete_all(&self) {
        self.round_trip().await;
        self.table.write().await.clear();
    }
}
