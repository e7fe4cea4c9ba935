//! Book models.

use crate::record::{non_blank, RecordId, Scalar};
use log::warn;
use serde::Deserialize;

/// Raw book record as served by `GET /books`.
///
/// Catalog clients disagree on a few field names. Spellings that can appear
/// side by side in one record get their own field and are folded together
/// in [`BookRecord::normalize`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    pub id: RecordId,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub isbn: Option<String>,

    #[serde(default, rename = "ISBN")]
    pub isbn_upper: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub publisher: Option<String>,

    #[serde(default, alias = "publicationYear")]
    pub published_year: Option<Scalar>,

    #[serde(default)]
    pub published_date: Option<Scalar>,

    #[serde(default)]
    pub total_copies: Option<Scalar>,

    #[serde(default)]
    pub status: Option<String>,
}

impl BookRecord {
    pub fn normalize(self) -> Book {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => BookStatus::Available,
            Some(raw) => BookStatus::parse(raw).unwrap_or_else(|| {
                warn!("Book {}: unknown status {:?}, treating as available", self.id, raw);
                BookStatus::Available
            }),
        };

        Book {
            title: non_blank(self.title),
            author: non_blank(self.author),
            isbn: non_blank(self.isbn).or_else(|| non_blank(self.isbn_upper)),
            category: non_blank(self.category),
            publisher: non_blank(self.publisher),
            published_year: self
                .published_year
                .as_ref()
                .or(self.published_date.as_ref())
                .and_then(Scalar::as_year),
            total_copies: self
                .total_copies
                .as_ref()
                .and_then(Scalar::as_u64)
                .and_then(|n| u32::try_from(n).ok()),
            status,
            id: self.id,
        }
    }
}

/// Circulation state of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookStatus {
    Available,
    Borrowed,
    Reserved,
    Maintenance,
}

impl BookStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "available" => Some(BookStatus::Available),
            "borrowed" => Some(BookStatus::Borrowed),
            "reserved" => Some(BookStatus::Reserved),
            "maintenance" => Some(BookStatus::Maintenance),
            _ => None,
        }
    }
}

/// A catalog entry. Used only to join titles onto fine lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: RecordId,
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub category: Option<String>,
    pub publisher: Option<String>,
    pub published_year: Option<i32>,
    pub total_copies: Option<u32>,
    pub status: BookStatus,
}
