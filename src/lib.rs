//! # Library Fines
//!
//! Computes overdue and damage fines for a library from a snapshot of its
//! loans, members and books.
//!
//! ## Design Principles
//!
//! - **Pure computation**: fines depend only on the loan and an explicit `now`
//! - **Integer currency**: fines are whole units, totals are exact sums
//! - **Normalize at the edge**: loosely typed backend records are folded into
//!   one schema on ingestion
//! - **Per-loan failures**: a malformed loan never hides the rest of a report
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use library_fines::{FineEngine, LibrarySnapshot};
//! use std::io::Cursor;
//!
//! let db = r#"{
//!     "members": [{"id": 1, "name": "Ada"}],
//!     "loans": [{"id": 1, "memberId": 1, "dueDate": "2024-01-10", "returnDate": "2024-01-15"}]
//! }"#;
//! let snapshot = LibrarySnapshot::from_db_json(Cursor::new(db)).unwrap();
//! let now = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
//!
//! let engine = FineEngine::default();
//! let summary = engine
//!     .summarize_member_fines(&snapshot.members[0], &snapshot.loans, now)
//!     .unwrap();
//! assert_eq!(summary.total_fine, 100);
//! ```

pub mod book;
pub mod date;
pub mod engine;
pub mod error;
pub mod fine;
pub mod loan;
pub mod member;
pub mod record;
pub mod report;
pub mod snapshot;
pub mod stats;

pub use book::{Book, BookRecord, BookStatus};
pub use engine::FineEngine;
pub use error::{LibraryError, Result};
pub use fine::{FineConfig, FineRecord, MemberFineSummary, DAILY_RATE, DAMAGE_RATE};
pub use loan::{Loan, LoanRecord};
pub use member::{Member, MemberRecord, MemberStatus};
pub use record::RecordId;
pub use report::{FineReport, FineStatus, MemberReport, ReportLine};
pub use snapshot::LibrarySnapshot;
pub use stats::LibraryStats;
