//! Data access for the `books` table.

use crate::Database;
use crate::error::{ErrorKind, Result};
use crate::row::BookRow;
use exn::ResultExt;
use shelf_model::{Book, BookId};
use sqlx::SqlitePool;

/// Record store over the `books` table.
///
/// Plain CRUD keyed by identifier: whole-table scan, point lookup,
/// insert-or-replace, delete. No multi-record transactions are needed by
/// the layers above.
#[derive(Debug, Clone)]
pub struct BookStore {
    pool: SqlitePool,
}
impl From<&Database> for BookStore {
    fn from(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }
}
impl BookStore {
    /// Create a store over the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch every stored record, oldest insertion first.
    pub async fn list_all(&self) -> Result<Vec<Book>> {
        let rows: Vec<BookRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, authors, thumbnail, favorite
            FROM books
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(Book::try_from).collect()
    }

    /// Fetch one record by id.
    pub async fn get_by_id(&self, id: &BookId) -> Result<Option<Book>> {
        let row: Option<BookRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, authors, thumbnail, favorite
            FROM books
            WHERE id = ?
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .or_raise(|| ErrorKind::Database)?;
        row.map(Book::try_from).transpose()
    }

    /// Insert a record, replacing any existing row with the same id.
    pub async fn upsert(&self, book: &Book) -> Result<()> {
        let row = BookRow::try_from(book)?;
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO books (id, title, description, authors, thumbnail, favorite)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(row.id)
        .bind(row.title)
        .bind(row.description)
        .bind(row.authors)
        .bind(row.thumbnail)
        .bind(row.favorite)
        .execute(&self.pool)
        .await
        .or_raise(|| ErrorKind::Database)?;
        Ok(())
    }

    /// Insert a batch of records, replacing rows with matching ids.
    pub async fn upsert_all(&self, books: &[Book]) -> Result<()> {
        for book in books {
            self.upsert(book).await?;
        }
        Ok(())
    }

    /// Delete a record by id, returning the number of rows removed (0 or 1).
    pub async fn delete_by_id(&self, id: &BookId) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM books WHERE id = ?
            "#,
        )
        .bind(id.as_str())
        .execute(&self.pool)
        .await
        .or_raise(|| ErrorKind::Database)?;
        Ok(result.rows_affected())
    }

    /// Delete every record.
    pub async fn delete_all(&self) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM books
            "#,
        )
        .execute(&self.pool)
        .await
        .or_raise(|| ErrorKind::Database)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> BookStore {
        let db = Database::open_in_memory().await.unwrap();
        BookStore::from(&db)
    }

    #[tokio::test]
    async fn test_upsert_and_get_round_trip() {
        let store = store().await;
        let book = Book::with_id("id1", "Title", "Description")
            .with_authors(["First Author", "Second Author"])
            .with_thumbnail("http://example.com/cover.png")
            .with_favorite(true);
        store.upsert(&book).await.unwrap();

        let fetched = store.get_by_id(&BookId::from("id1")).await.unwrap().unwrap();
        assert_eq!(fetched.title.as_deref(), Some("Title"));
        assert_eq!(fetched.description.as_deref(), Some("Description"));
        assert_eq!(fetched.authors, vec!["First Author".to_string(), "Second Author".to_string()]);
        assert_eq!(fetched.thumbnail.as_deref(), Some("http://example.com/cover.png"));
        assert!(fetched.favorite);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = store().await;
        assert!(store.get_by_id(&BookId::from("missing")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_row() {
        let store = store().await;
        store.upsert(&Book::with_id("id1", "Old Title", "Old description")).await.unwrap();
        store.upsert(&Book::with_id("id1", "New Title", "New description").with_favorite(true)).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title.as_deref(), Some("New Title"));
        assert!(all[0].favorite);
    }

    #[tokio::test]
    async fn test_list_all_preserves_insertion_order() {
        let store = store().await;
        for id in ["b", "a", "c"] {
            store.upsert(&Book::with_id(id, format!("Title {id}"), "")).await.unwrap();
        }
        let ids: Vec<_> = store.list_all().await.unwrap().into_iter().map(|b| b.id().to_string()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_delete_by_id_counts_rows() {
        let store = store().await;
        store.upsert(&Book::with_id("id1", "Title", "")).await.unwrap();
        assert_eq!(store.delete_by_id(&BookId::from("id1")).await.unwrap(), 1);
        assert_eq!(store.delete_by_id(&BookId::from("id1")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_all_empties_table() {
        let store = store().await;
        store
            .upsert_all(&[Book::with_id("id1", "One", ""), Book::with_id("id2", "Two", "")])
            .await
            .unwrap();
        store.delete_all().await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
