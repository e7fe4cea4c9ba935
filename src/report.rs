//! Fine report model and CSV output.

use crate::error::Result;
use crate::loan::Loan;
use crate::member::Member;
use chrono::NaiveDate;
use std::io::Write;

/// Outcome of computing one loan's fine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FineStatus {
    /// Fine computed successfully.
    Assessed(u64),

    /// The loan's dates could not be read; carries the error message.
    Malformed(String),
}

impl FineStatus {
    pub fn amount(&self) -> Option<u64> {
        match self {
            FineStatus::Assessed(amount) => Some(*amount),
            FineStatus::Malformed(_) => None,
        }
    }
}

/// One loan as it appears on the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub loan: Loan,

    /// Title of the borrowed book, if it is in the catalog
    pub book_title: Option<String>,

    pub status: FineStatus,
}

/// The report section for one member.
///
/// `total_fine` sums assessed lines only; malformed lines are shown but
/// contribute nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberReport {
    pub member: Member,
    pub lines: Vec<ReportLine>,
    pub total_fine: u64,
}

impl MemberReport {
    pub fn new(member: Member, lines: Vec<ReportLine>) -> Self {
        let total_fine = lines
            .iter()
            .filter_map(|line| line.status.amount())
            .fold(0u64, u64::saturating_add);
        MemberReport {
            member,
            lines,
            total_fine,
        }
    }

    /// Number of loans whose fine could not be computed.
    pub fn malformed_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| matches!(line.status, FineStatus::Malformed(_)))
            .count()
    }
}

/// Fines for every member as of a given date.
#[derive(Debug, Clone, PartialEq)]
pub struct FineReport {
    pub as_of: NaiveDate,
    pub members: Vec<MemberReport>,

    /// Loans whose member id matched no member in the snapshot.
    pub orphan_loans: usize,
}

impl FineReport {
    pub fn new(as_of: NaiveDate, members: Vec<MemberReport>, orphan_loans: usize) -> Self {
        FineReport {
            as_of,
            members,
            orphan_loans,
        }
    }

    /// Sum of all member totals.
    pub fn grand_total(&self) -> u64 {
        self.members
            .iter()
            .fold(0u64, |sum, m| sum.saturating_add(m.total_fine))
    }

    /// Writes one CSV row per loan, grouped by member in snapshot order.
    pub fn write_loan_lines<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "member_id", "member", "loan_id", "book", "isbn", "borrowed", "due", "returned",
            "damaged", "fine",
        ])?;

        for section in &self.members {
            for line in &section.lines {
                let loan = &line.loan;
                let fine = match &line.status {
                    FineStatus::Assessed(amount) => amount.to_string(),
                    FineStatus::Malformed(message) => format!("error: {}", message),
                };

                csv_writer.write_record([
                    section.member.id.to_string(),
                    section.member.name.clone(),
                    loan.id.to_string(),
                    line.book_title.clone().unwrap_or_else(|| "Unknown".to_string()),
                    loan.book_isbn.clone().unwrap_or_default(),
                    loan.start_date.clone().unwrap_or_default(),
                    loan.due_date.clone().unwrap_or_default(),
                    loan.return_date
                        .clone()
                        .unwrap_or_else(|| "Not Returned".to_string()),
                    loan.is_damaged.to_string(),
                    fine,
                ])?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Writes one CSV row per member with their loan count and total fine.
    pub fn write_member_totals<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["member_id", "member", "loans", "total_fine"])?;

        for section in &self.members {
            csv_writer.write_record([
                section.member.id.to_string(),
                section.member.name.clone(),
                section.lines.len().to_string(),
                section.total_fine.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
