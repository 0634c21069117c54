//! Explicit wiring of the whole data stack.

use crate::config::LibraryConfig;
use crate::error::{ErrorKind, Result};
use crate::repository::Repository;
use crate::stats::Statistics;
use exn::ResultExt;
use shelf_source::{Fetched, LocalSource, RemoteSource, SourceHandle};
use shelf_store::{BookStore, Database};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// The assembled data stack: one repository over one local and one remote
/// source, built from a [`LibraryConfig`].
///
/// Replaces the lazily-initialized singletons a naive wiring would use:
/// construct one `Library` where the application starts and hand it down.
pub struct Library {
    repository: Repository,
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library").finish_non_exhaustive()
    }
}

impl Library {
    /// Open the database, spawn the local worker, seed the remote stand-in
    /// and wire the repository.
    pub async fn open(config: LibraryConfig) -> Result<Self> {
        let database = if config.wants_in_memory() {
            Database::open_in_memory().await
        } else {
            Database::open(&config.database).await
        }
        .or_raise(|| ErrorKind::Store)?;
        let local: SourceHandle = Arc::new(LocalSource::spawn(BookStore::from(&database)));

        let mut remote = match &config.seed {
            Some(asset) => RemoteSource::from_seed_asset(asset),
            None => RemoteSource::from_bundled_seed(),
        }
        .or_raise(|| ErrorKind::Seed)?;
        if let Some(millis) = config.remote_latency_ms {
            remote = remote.with_latency(Duration::from_millis(millis));
        }

        info!(database = %config.database.display(), "library stack assembled");
        Ok(Self {
            repository: Repository::new(Arc::new(remote), local),
        })
    }

    pub fn repository(&mut self) -> &mut Repository {
        &mut self.repository
    }

    /// Load the whole collection and compute favorite statistics.
    pub async fn statistics(&mut self) -> Fetched<Statistics> {
        self.repository.get_all().await.map(|books| Statistics::of(&books))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_model::BookId;

    #[tokio::test]
    async fn test_open_in_memory_serves_seeded_catalogue() {
        let mut library = Library::open(LibraryConfig::in_memory()).await.unwrap();
        let books = library.repository().get_all().await.loaded().unwrap();
        assert!(!books.is_empty());
    }

    #[tokio::test]
    async fn test_statistics_over_seeded_catalogue() {
        let mut library = Library::open(LibraryConfig::in_memory()).await.unwrap();
        let stats = library.statistics().await.loaded().unwrap();
        // Nothing in the seed starts out favorited.
        assert_eq!(stats.favorited, 0);
        assert!(!stats.is_empty());
    }

    #[tokio::test]
    async fn test_favoriting_moves_the_counts() {
        let mut library = Library::open(LibraryConfig::in_memory()).await.unwrap();
        let books = library.repository().get_all().await.loaded().unwrap();
        let id = books[0].id().clone();

        library.repository().set_favorite(&id, true).await.loaded().unwrap();
        let stats = library.statistics().await.loaded().unwrap();
        assert_eq!(stats.favorited, 1);
        assert_eq!(stats.not_favorited, books.len() - 1);
    }

    #[tokio::test]
    async fn test_statistics_when_nothing_is_available() {
        let mut library = Library::open(LibraryConfig::in_memory()).await.unwrap();
        library.repository().delete_all().await;
        // A forced refresh now finds both sources empty.
        library.repository().mark_dirty();
        assert_eq!(library.statistics().await, Fetched::NotAvailable);
    }

    #[tokio::test]
    async fn test_delete_propagates_to_both_sources() {
        let mut library = Library::open(LibraryConfig::in_memory()).await.unwrap();
        let books = library.repository().get_all().await.loaded().unwrap();
        let id = books[0].id().clone();

        library.repository().delete(&id).await;
        assert_eq!(library.repository().get_one(&id).await, Fetched::NotAvailable);

        // Even after a forced refresh the record stays gone: the remote
        // stand-in was told to delete it too.
        library.repository().mark_dirty();
        let refreshed = library.repository().get_all().await.loaded().unwrap();
        assert!(refreshed.iter().all(|book| *book.id() != id));
    }

    #[tokio::test]
    async fn test_open_with_unknown_seed_asset() {
        let config = LibraryConfig {
            seed: Some("nope.json".to_string()),
            ..LibraryConfig::in_memory()
        };
        let err = Library::open(config).await.unwrap_err();
        assert!(matches!(&*err, crate::error::ErrorKind::Seed));
    }

    #[tokio::test]
    async fn test_open_on_disk_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = LibraryConfig {
            database: dir.path().join("books.sqlite"),
            ..LibraryConfig::default()
        };
        let mut library = Library::open(config).await.unwrap();
        library.repository().save(shelf_model::Book::new("Title", "Description")).await;
        assert!(dir.path().join("books.sqlite").exists());
    }
}
