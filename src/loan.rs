//! Loan models for JSON ingestion and internal representation.

use crate::date::{date_field_text, parse_calendar_date};
use crate::error::{LibraryError, Result};
use crate::record::{is_truthy, loose_text, RecordId};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

/// Raw loan record as served by `GET /loans`.
///
/// Only the ids are strictly typed. Dates are kept as text and parsed when a
/// fine is computed, so a single bad date only affects that loan.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    pub id: RecordId,

    pub member_id: RecordId,

    #[serde(default)]
    pub book_id: Option<RecordId>,

    #[serde(default, alias = "bookISBN")]
    pub book_isbn: Option<Value>,

    #[serde(default)]
    pub start_date: Option<Value>,

    #[serde(default)]
    pub due_date: Option<Value>,

    /// Absent, `null` or `""` while the book is still out
    #[serde(default)]
    pub return_date: Option<Value>,

    #[serde(default)]
    pub is_damaged: Option<Value>,
}

impl LoanRecord {
    /// Normalizes the raw record into the canonical loan shape.
    pub fn normalize(self) -> Loan {
        Loan {
            id: self.id,
            member_id: self.member_id,
            book_id: self.book_id,
            book_isbn: loose_text(self.book_isbn),
            start_date: date_field_text(self.start_date),
            due_date: date_field_text(self.due_date),
            return_date: date_field_text(self.return_date),
            is_damaged: self.is_damaged.as_ref().map_or(false, is_truthy),
        }
    }
}

/// A loan in canonical form. Read-only to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    pub id: RecordId,
    pub member_id: RecordId,
    pub book_id: Option<RecordId>,
    pub book_isbn: Option<String>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub return_date: Option<String>,
    pub is_damaged: bool,
}

impl Loan {
    /// Returns `true` once the book has been handed back.
    pub fn is_returned(&self) -> bool {
        self.return_date.is_some()
    }

    /// Parsed due date. Absent or unparsable values are `MalformedDate`.
    pub fn due_on(&self) -> Result<NaiveDate> {
        self.due_date
            .as_deref()
            .and_then(parse_calendar_date)
            .ok_or_else(|| self.malformed("dueDate", self.due_date.clone()))
    }

    /// Parsed return date, `None` while outstanding.
    pub fn returned_on(&self) -> Result<Option<NaiveDate>> {
        match self.return_date.as_deref() {
            None => Ok(None),
            Some(raw) => parse_calendar_date(raw)
                .map(Some)
                .ok_or_else(|| self.malformed("returnDate", Some(raw.to_string()))),
        }
    }

    fn malformed(&self, field: &'static str, value: Option<String>) -> LibraryError {
        LibraryError::MalformedDate {
            loan_id: self.id.clone(),
            field,
            value,
        }
    }
}
