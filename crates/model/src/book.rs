use derive_more::Display;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Unique identifier of a [`Book`].
///
/// Generated on the client when a record is created without one; immutable
/// once assigned.
#[derive(Debug, Clone, Display, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(String);

impl BookId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<String> for BookId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
impl From<&str> for BookId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A single book record.
///
/// The identifier is private so it cannot change after construction; every
/// other field is plain data. Two records compare equal when both id and
/// title match — the remaining fields do not participate in equality or
/// hashing.
#[derive(Debug, Clone)]
pub struct Book {
    id: BookId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub authors: Vec<String>,
    pub thumbnail: Option<String>,
    pub favorite: bool,
}

impl Book {
    /// Create a new book with a freshly generated id.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_id(BookId::generate(), title, description)
    }

    /// Create a book that already has an id (a copy of another record).
    pub fn with_id(id: impl Into<BookId>, title: impl Into<String>, description: impl Into<String>) -> Self {
        let mut book = Self::blank(id);
        book.title = Some(title.into());
        book.description = Some(description.into());
        book
    }

    /// Create a book with the given id and every other field unset.
    pub fn blank(id: impl Into<BookId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            authors: Vec::new(),
            thumbnail: None,
            favorite: false,
        }
    }

    pub fn id(&self) -> &BookId {
        &self.id
    }

    pub fn with_authors(mut self, authors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.title == other.title
    }
}
impl Eq for Book {}
impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.title.hash(state);
    }
}
