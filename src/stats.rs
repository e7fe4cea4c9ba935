//! Dashboard statistics over a snapshot.

use crate::book::BookStatus;
use crate::error::Result;
use crate::snapshot::LibrarySnapshot;
use chrono::NaiveDate;
use log::debug;
use std::io::Write;

/// Headline counters shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryStats {
    pub total_books: usize,
    pub available_books: usize,
    pub borrowed_books: usize,
    pub reserved_books: usize,
    pub maintenance_books: usize,
    pub total_members: usize,
    pub active_members: usize,

    /// Loans without a return date.
    pub outstanding_loans: usize,

    /// Outstanding loans whose due date is before `now`.
    pub overdue_loans: usize,
}

impl LibraryStats {
    /// Counts books, members and loans in the snapshot as of `now`.
    ///
    /// Outstanding loans with an unreadable due date are not counted as
    /// overdue.
    pub fn from_snapshot(snapshot: &LibrarySnapshot, now: NaiveDate) -> Self {
        let mut stats = LibraryStats {
            total_books: snapshot.books.len(),
            total_members: snapshot.members.len(),
            active_members: snapshot.members.iter().filter(|m| m.is_active()).count(),
            ..LibraryStats::default()
        };

        for book in &snapshot.books {
            match book.status {
                BookStatus::Available => stats.available_books += 1,
                BookStatus::Borrowed => stats.borrowed_books += 1,
                BookStatus::Reserved => stats.reserved_books += 1,
                BookStatus::Maintenance => stats.maintenance_books += 1,
            }
        }

        for loan in snapshot.loans.iter().filter(|l| !l.is_returned()) {
            stats.outstanding_loans += 1;
            match loan.due_on() {
                Ok(due) if due < now => stats.overdue_loans += 1,
                Ok(_) => {}
                Err(e) => debug!("Loan {}: {}, not counted as overdue", loan.id, e),
            }
        }

        stats
    }

    /// Writes the counters as `metric,value` CSV rows.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["metric", "value"])?;

        let rows = [
            ("total_books", self.total_books),
            ("available_books", self.available_books),
            ("borrowed_books", self.borrowed_books),
            ("reserved_books", self.reserved_books),
            ("maintenance_books", self.maintenance_books),
            ("total_members", self.total_members),
            ("active_members", self.active_members),
            ("outstanding_loans", self.outstanding_loans),
            ("overdue_loans", self.overdue_loans),
        ];
        for (metric, value) in rows {
            csv_writer.write_record([metric.to_string(), value.to_string()])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn snapshot() -> LibrarySnapshot {
        let json = r#"{
            "books": [
                {"id": 1, "status": "available"},
                {"id": 2, "status": "borrowed"},
                {"id": 3, "status": "borrowed"},
                {"id": 4, "status": "reserved"},
                {"id": 5, "status": "maintenance"},
                {"id": 6}
            ],
            "members": [
                {"id": 1, "status": "active"},
                {"id": 2, "status": "inactive"},
                {"id": 3}
            ],
            "loans": [
                {"id": 1, "memberId": 1, "dueDate": "2024-01-10"},
                {"id": 2, "memberId": 1, "dueDate": "2024-01-20"},
                {"id": 3, "memberId": 2, "dueDate": "2024-01-01", "returnDate": "2024-01-02"},
                {"id": 4, "memberId": 3, "dueDate": "whenever"}
            ]
        }"#;
        LibrarySnapshot::from_db_json(Cursor::new(json)).unwrap()
    }

    #[test]
    fn test_counts() {
        let stats = LibraryStats::from_snapshot(&snapshot(), NaiveDate::from_ymd_opt(2024, 1, 12).unwrap());
        assert_eq!(stats.total_books, 6);
        assert_eq!(stats.available_books, 2);
        assert_eq!(stats.borrowed_books, 2);
        assert_eq!(stats.reserved_books, 1);
        assert_eq!(stats.maintenance_books, 1);
        assert_eq!(stats.total_members, 3);
        assert_eq!(stats.active_members, 2);
        assert_eq!(stats.outstanding_loans, 3);
        assert_eq!(stats.overdue_loans, 1);
    }

    #[test]
    fn test_empty_snapshot() {
        let stats = LibraryStats::from_snapshot(
            &LibrarySnapshot::default(),
            NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
        );
        assert_eq!(stats, LibraryStats::default());
    }

    #[test]
    fn test_csv_output() {
        let stats = LibraryStats::from_snapshot(&snapshot(), NaiveDate::from_ymd_opt(2024, 1, 12).unwrap());
        let mut output = Vec::new();
        stats.write_csv(&mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.starts_with("metric,value\n"));
        assert!(output_str.contains("borrowed_books,2\n"));
        assert!(output_str.contains("overdue_loans,1\n"));
    }
}
