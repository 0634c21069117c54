use shelf_model::Book;

/// Filter applied to the full book list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BookFilter {
    /// Do not filter books.
    #[default]
    All,
    /// Only books marked as favorite.
    Favorited,
    /// Only books not yet favorited.
    NotFavorited,
}

impl BookFilter {
    pub fn matches(self, book: &Book) -> bool {
        match self {
            Self::All => true,
            Self::Favorited => book.favorite,
            Self::NotFavorited => !book.favorite,
        }
    }

    /// Project a loaded list down to the matching books, keeping order.
    pub fn apply(self, books: impl IntoIterator<Item = Book>) -> Vec<Book> {
        books.into_iter().filter(|book| self.matches(book)).collect()
    }
}
