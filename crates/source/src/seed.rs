//! Bundled seed catalogue for the remote stand-in.
//!
//! The seed is a JSON array of objects carrying an `id` and a nested
//! `volumeInfo` block, embedded into the binary at compile time. Unknown
//! fields are ignored; entries without an id are skipped with a warning
//! rather than materializing as half-formed records.

use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use rust_embed::Embed;
use serde::Deserialize;
use shelf_model::{Book, BookId};
use tracing::warn;

#[derive(Embed)]
#[folder = "../../assets/"]
struct Assets;

/// Asset name of the default seed catalogue.
pub(crate) const DEFAULT_SEED: &str = "books.json";

#[derive(Deserialize)]
struct SeedEntry {
    id: Option<String>,
    #[serde(rename = "volumeInfo")]
    volume_info: Option<SeedVolumeInfo>,
}

#[derive(Deserialize, Default)]
struct SeedVolumeInfo {
    title: Option<String>,
    description: Option<String>,
    #[serde(default)]
    authors: Vec<String>,
    #[serde(rename = "imageLinks")]
    image_links: Option<SeedImageLinks>,
}

#[derive(Deserialize)]
struct SeedImageLinks {
    thumbnail: Option<String>,
}

impl SeedEntry {
    fn into_book(self) -> Option<Book> {
        let Some(id) = self.id else {
            warn!("seed entry without an id, skipping");
            return None;
        };
        let info = self.volume_info.unwrap_or_default();
        let mut book = Book::blank(BookId::from(id));
        book.title = info.title;
        book.description = info.description;
        book.authors = info.authors;
        book.thumbnail = info.image_links.and_then(|links| links.thumbnail);
        Some(book)
    }
}

/// Parse a seed document into records.
pub(crate) fn parse(json: &str) -> Result<Vec<Book>> {
    let entries: Vec<SeedEntry> = serde_json::from_str(json).or_raise(|| ErrorKind::InvalidSeed)?;
    Ok(entries.into_iter().filter_map(SeedEntry::into_book).collect())
}

/// Load and parse a bundled seed asset by name.
pub(crate) fn load(asset: &str) -> Result<Vec<Book>> {
    let file = Assets::get(asset).ok_or_raise(|| ErrorKind::SeedNotFound(asset.to_string()))?;
    let json = std::str::from_utf8(&file.data).or_raise(|| ErrorKind::InvalidSeed)?;
    parse(json)
}
