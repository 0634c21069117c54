//! Database connection and pool management.

use exn::ResultExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteSynchronous};
use std::path::Path;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// Embedded migrations that are run automatically on open.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

const MAX_CONNECTIONS: u32 = 4;

/// Connection pool for the book database.
///
/// This is the entry point for on-device persistence; hand it to
/// [`BookStore`](crate::BookStore) for actual table access.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    async fn new(options: SqliteConnectOptions, max: u32) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max)
            .connect_with(options)
            .await
            .or_raise(|| ErrorKind::Database)?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Open the database at the given path.
    ///
    /// Creates the file if it doesn't exist and runs migrations.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let options = Self::base_options().filename(path.as_ref()).create_if_missing(true);
        Self::new(options, MAX_CONNECTIONS).await
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// Limited to one connection: each SQLite `:memory:` connection is
    /// otherwise a distinct, empty database.
    pub async fn open_in_memory() -> Result<Self> {
        let options = Self::base_options().filename(":memory:");
        Self::new(options, 1).await
    }

    fn base_options() -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // The single background writer plus WAL readers can still trip
            // SQLITE_BUSY on a cold checkpoint without a timeout.
            .busy_timeout(std::time::Duration::from_millis(1000))
    }

    /// Run database migrations.
    ///
    /// Called automatically by [`open`](Self::open) and
    /// [`open_in_memory`](Self::open_in_memory).
    #[instrument(skip(self))]
    async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await.or_raise(|| ErrorKind::Migration)
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the pool, waiting for outstanding connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
