//! On-device data source backed by the SQLite store.

use crate::contract::{BookDataSource, Fetched};
use async_trait::async_trait;
use shelf_model::{Book, BookId};
use shelf_store::BookStore;
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

enum Command {
    LoadAll(oneshot::Sender<Fetched<Vec<Book>>>),
    GetOne(BookId, oneshot::Sender<Fetched<Book>>),
    Save(Book),
    SaveAll(Vec<Book>),
    Delete(BookId),
    DeleteAll,
}

/// Adapts [`BookStore`] to the data-source contract.
///
/// Every storage operation is funnelled through one background worker
/// task, so operations execute in submission order. Reads await the
/// worker's reply; writes are enqueued and return before the row is
/// durable. There is no ordering guarantee between a write and a read
/// submitted concurrently from another handle — a caller needing
/// read-after-write consistency across handles cannot get it here.
#[derive(Debug, Clone)]
pub struct LocalSource {
    queue: mpsc::UnboundedSender<Command>,
}

impl LocalSource {
    /// Spawn the worker task over the given store.
    pub fn spawn(store: BookStore) -> Self {
        let (queue, commands) = mpsc::unbounded_channel();
        tokio::spawn(worker(store, commands));
        Self { queue }
    }

    fn submit(&self, command: Command) {
        // A closed queue means the worker (or runtime) is gone. Writes have
        // no failure channel; reads observe the dropped reply sender.
        if self.queue.send(command).is_err() {
            warn!("local worker gone, dropping storage command");
        }
    }
}

async fn worker(store: BookStore, mut commands: mpsc::UnboundedReceiver<Command>) {
    while let Some(command) = commands.recv().await {
        match command {
            Command::LoadAll(reply) => {
                let outcome = match store.list_all().await {
                    // An empty table is the local cache-miss signal.
                    Ok(books) if books.is_empty() => Fetched::NotAvailable,
                    Ok(books) => Fetched::Loaded(books),
                    Err(err) => {
                        warn!(%err, "loading all records failed");
                        Fetched::NotAvailable
                    }
                };
                _ = reply.send(outcome);
            }
            Command::GetOne(id, reply) => {
                let outcome = match store.get_by_id(&id).await {
                    Ok(found) => Fetched::from(found),
                    Err(err) => {
                        warn!(%err, book = %id, "record lookup failed");
                        Fetched::NotAvailable
                    }
                };
                _ = reply.send(outcome);
            }
            Command::Save(book) => {
                if let Err(err) = store.upsert(&book).await {
                    warn!(%err, book = %book.id(), "saving record failed");
                }
            }
            Command::SaveAll(books) => {
                if let Err(err) = store.upsert_all(&books).await {
                    warn!(%err, "saving record batch failed");
                }
            }
            Command::Delete(id) => {
                if let Err(err) = store.delete_by_id(&id).await {
                    warn!(%err, book = %id, "deleting record failed");
                }
            }
            Command::DeleteAll => {
                if let Err(err) = store.delete_all().await {
                    warn!(%err, "deleting all records failed");
                }
            }
        }
    }
}

#[async_trait]
impl BookDataSource for LocalSource {
    fn name(&self) -> &str {
        "local"
    }

    async fn load_all(&self) -> Fetched<Vec<Book>> {
        let (reply, outcome) = oneshot::channel();
        self.submit(Command::LoadAll(reply));
        outcome.await.unwrap_or(Fetched::NotAvailable)
    }

    async fn get_one(&self, id: &BookId) -> Fetched<Book> {
        let (reply, outcome) = oneshot::channel();
        self.submit(Command::GetOne(id.clone(), reply));
        outcome.await.unwrap_or(Fetched::NotAvailable)
    }

    async fn save(&self, book: Book) {
        self.submit(Command::Save(book));
    }

    async fn save_all(&self, books: Vec<Book>) {
        self.submit(Command::SaveAll(books));
    }

    async fn delete(&self, id: &BookId) {
        self.submit(Command::Delete(id.clone()));
    }

    async fn delete_all(&self) {
        self.submit(Command::DeleteAll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_store::Database;

    async fn local() -> LocalSource {
        let db = Database::open_in_memory().await.unwrap();
        LocalSource::spawn(BookStore::from(&db))
    }

    #[tokio::test]
    async fn test_empty_store_is_not_available() {
        let local = local().await;
        assert_eq!(local.load_all().await, Fetched::NotAvailable);
    }

    #[tokio::test]
    async fn test_write_then_read_in_submission_order() {
        let local = local().await;
        local.save(Book::with_id("1", "A", "First")).await;
        local.save(Book::with_id("2", "B", "Second")).await;
        // The worker executes FIFO, so both saves land before this read.
        let books = local.load_all().await.loaded().unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].id().as_str(), "1");
    }

    #[tokio::test]
    async fn test_get_one() {
        let local = local().await;
        local.save(Book::with_id("1", "A", "First").with_favorite(true)).await;
        let book = local.get_one(&BookId::from("1")).await.loaded().unwrap();
        assert!(book.favorite);
        assert_eq!(local.get_one(&BookId::from("missing")).await, Fetched::NotAvailable);
    }

    #[tokio::test]
    async fn test_save_all_then_delete() {
        let local = local().await;
        local
            .save_all(vec![Book::with_id("1", "A", ""), Book::with_id("2", "B", "")])
            .await;
        local.delete(&BookId::from("1")).await;
        let books = local.load_all().await.loaded().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id().as_str(), "2");
    }

    #[tokio::test]
    async fn test_delete_all_collapses_to_not_available() {
        let local = local().await;
        local.save(Book::with_id("1", "A", "")).await;
        local.delete_all().await;
        assert_eq!(local.load_all().await, Fetched::NotAvailable);
    }

    #[tokio::test]
    async fn test_store_failure_collapses_to_not_available() {
        let db = Database::open_in_memory().await.unwrap();
        let local = LocalSource::spawn(BookStore::from(&db));
        db.close().await;
        assert_eq!(local.load_all().await, Fetched::NotAvailable);
        assert_eq!(local.get_one(&BookId::from("1")).await, Fetched::NotAvailable);
    }
}
