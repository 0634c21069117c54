use crate::error::{Error, ErrorKind};
use exn::ResultExt;
use shelf_model::{Book, BookId};

/// Raw shape of the `books` table. The authors list is a JSON array in a
/// single TEXT column.
#[derive(sqlx::FromRow)]
pub(crate) struct BookRow {
    pub(crate) id: String,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) authors: String,
    pub(crate) thumbnail: Option<String>,
    pub(crate) favorite: bool,
}

impl TryFrom<&Book> for BookRow {
    type Error = Error;
    fn try_from(book: &Book) -> Result<Self, Self::Error> {
        Ok(Self {
            id: book.id().to_string(),
            title: book.title.clone(),
            description: book.description.clone(),
            authors: serde_json::to_string(&book.authors).or_raise(|| ErrorKind::InvalidData("authors"))?,
            thumbnail: book.thumbnail.clone(),
            favorite: book.favorite,
        })
    }
}
impl TryFrom<BookRow> for Book {
    type Error = Error;
    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let mut book = Book::blank(BookId::from(row.id));
        book.title = row.title;
        book.description = row.description;
        book.authors = serde_json::from_str(&row.authors).or_raise(|| ErrorKind::InvalidData("authors"))?;
        book.thumbnail = row.thumbnail;
        book.favorite = row.favorite;
        Ok(book)
    }
}
