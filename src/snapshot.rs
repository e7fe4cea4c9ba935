//! Snapshot ingestion.
//!
//! A snapshot is the result of fetching `/loans`, `/members` and `/books`
//! together. Records are decoded one at a time: a record that does not fit
//! the schema is logged at warn level and skipped, the rest are kept.

use crate::book::{Book, BookRecord};
use crate::error::Result;
use crate::loan::{Loan, LoanRecord};
use crate::member::{Member, MemberRecord};
use crate::record::RecordId;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;

/// An immutable view of the three backend collections.
#[derive(Debug, Clone, Default)]
pub struct LibrarySnapshot {
    pub loans: Vec<Loan>,
    pub members: Vec<Member>,
    pub books: Vec<Book>,
}

/// Layout of a resource-server database document.
#[derive(Debug, Deserialize)]
struct DbDocument {
    #[serde(default)]
    books: Vec<serde_json::Value>,
    #[serde(default)]
    members: Vec<serde_json::Value>,
    #[serde(default)]
    loans: Vec<serde_json::Value>,
}

impl LibrarySnapshot {
    /// Creates a snapshot from already-normalized collections.
    pub fn new(loans: Vec<Loan>, members: Vec<Member>, books: Vec<Book>) -> Self {
        LibrarySnapshot {
            loans,
            members,
            books,
        }
    }

    /// Reads a database document of the form
    /// `{ "books": [...], "members": [...], "loans": [...] }`.
    ///
    /// Missing collections are treated as empty.
    pub fn from_db_json<R: Read>(reader: R) -> Result<Self> {
        let doc: DbDocument = serde_json::from_reader(reader)?;
        Ok(LibrarySnapshot {
            loans: decode_all::<LoanRecord>("loan", doc.loans)
                .map(LoanRecord::normalize)
                .collect(),
            members: decode_all::<MemberRecord>("member", doc.members)
                .map(MemberRecord::normalize)
                .collect(),
            books: decode_all::<BookRecord>("book", doc.books)
                .map(BookRecord::normalize)
                .collect(),
        })
    }

    /// Reads the three `GET` response bodies, each a JSON array.
    pub fn from_collections<L: Read, M: Read, B: Read>(
        loans: L,
        members: M,
        books: B,
    ) -> Result<Self> {
        let loans: Vec<serde_json::Value> = serde_json::from_reader(loans)?;
        let members: Vec<serde_json::Value> = serde_json::from_reader(members)?;
        let books: Vec<serde_json::Value> = serde_json::from_reader(books)?;

        Ok(LibrarySnapshot {
            loans: decode_all::<LoanRecord>("loan", loans)
                .map(LoanRecord::normalize)
                .collect(),
            members: decode_all::<MemberRecord>("member", members)
                .map(MemberRecord::normalize)
                .collect(),
            books: decode_all::<BookRecord>("book", books)
                .map(BookRecord::normalize)
                .collect(),
        })
    }

    /// Looks up a book by id.
    pub fn book(&self, id: &RecordId) -> Option<&Book> {
        self.books.iter().find(|b| &b.id == id)
    }

    /// Looks up a member by id.
    pub fn member(&self, id: &RecordId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }
}

/// Decodes each element, skipping the ones that do not match the schema.
fn decode_all<T: DeserializeOwned>(
    kind: &'static str,
    values: Vec<serde_json::Value>,
) -> impl Iterator<Item = T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(move |(idx, value)| match serde_json::from_value::<T>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping {} #{}: {}", kind, idx, e);
                None
            }
        })
}
