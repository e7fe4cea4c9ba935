//! Core fine computation engine.
//!
//! Every computation is a pure function of the loans handed in and an
//! explicit `now` date. The engine never reads a clock and never caches a
//! result: fines are derived fresh on every call.

use crate::date::days_between;
use crate::error::Result;
use crate::fine::{FineConfig, FineRecord, MemberFineSummary};
use crate::loan::Loan;
use crate::member::Member;
use crate::report::{FineReport, FineStatus, MemberReport, ReportLine};
use crate::snapshot::LibrarySnapshot;
use chrono::NaiveDate;
use log::{debug, warn};
use std::collections::HashSet;

/// The fine engine.
///
/// Holds only the configured rates; all data arrives as arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct FineEngine {
    config: FineConfig,
}

impl FineEngine {
    /// Creates an engine with the given rates.
    pub fn new(config: FineConfig) -> Self {
        FineEngine { config }
    }

    pub fn config(&self) -> FineConfig {
        self.config
    }

    /// Computes the fine owed on one loan as of `now`.
    ///
    /// The late fee counts whole calendar days between the due date and the
    /// return date, or `now` while the loan is outstanding. Early or on-time
    /// returns owe no late fee. Damage adds a flat surcharge regardless of
    /// lateness.
    ///
    /// Fails with `MalformedDate` if the due date is absent or unparsable, or
    /// if a present return date is unparsable.
    pub fn compute_loan_fine(&self, loan: &Loan, now: NaiveDate) -> Result<u64> {
        let due = loan.due_on()?;
        let end = loan.returned_on()?.unwrap_or(now);

        let overdue_days = u64::try_from(days_between(due, end)).unwrap_or(0);
        let late_fee = overdue_days.saturating_mul(self.config.daily_rate);
        let damage_fee = if loan.is_damaged {
            self.config.damage_rate
        } else {
            0
        };

        let fine = late_fee.saturating_add(damage_fee);
        debug!(
            "Loan {}: {} day(s) overdue, late fee {}, damage fee {}, fine {}",
            loan.id, overdue_days, late_fee, damage_fee, fine
        );
        Ok(fine)
    }

    /// Collects the fines of one member.
    ///
    /// Loans are filtered by member id without reordering. Fails with the
    /// first malformed loan; use [`FineEngine::build_report`] to keep going
    /// past bad records.
    pub fn summarize_member_fines(
        &self,
        member: &Member,
        loans: &[Loan],
        now: NaiveDate,
    ) -> Result<MemberFineSummary> {
        let fines = loans
            .iter()
            .filter(|loan| loan.member_id == member.id)
            .map(|loan| {
                self.compute_loan_fine(loan, now).map(|fine_amount| FineRecord {
                    loan: loan.clone(),
                    fine_amount,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(MemberFineSummary::new(member.clone(), fines))
    }

    /// Builds the fine report for every member in the snapshot.
    ///
    /// A loan with a malformed date becomes a visible marker line and is
    /// logged at warn level; the remaining loans and members are still
    /// computed. Loans whose member is not in the snapshot are counted as
    /// orphans.
    pub fn build_report(&self, snapshot: &LibrarySnapshot, now: NaiveDate) -> FineReport {
        let members: Vec<MemberReport> = snapshot
            .members
            .iter()
            .map(|member| {
                let lines = snapshot
                    .loans
                    .iter()
                    .filter(|loan| loan.member_id == member.id)
                    .map(|loan| self.report_line(snapshot, loan, now))
                    .collect();
                MemberReport::new(member.clone(), lines)
            })
            .collect();

        let known: HashSet<_> = snapshot.members.iter().map(|m| &m.id).collect();
        let orphan_loans = snapshot
            .loans
            .iter()
            .filter(|loan| !known.contains(&loan.member_id))
            .inspect(|loan| {
                debug!(
                    "Loan {} references unknown member {}, not reported",
                    loan.id, loan.member_id
                )
            })
            .count();

        FineReport::new(now, members, orphan_loans)
    }

    fn report_line(&self, snapshot: &LibrarySnapshot, loan: &Loan, now: NaiveDate) -> ReportLine {
        let status = match self.compute_loan_fine(loan, now) {
            Ok(amount) => FineStatus::Assessed(amount),
            Err(e) => {
                warn!("Loan {}: {}", loan.id, e);
                FineStatus::Malformed(e.to_string())
            }
        };

        let book_title = loan
            .book_id
            .as_ref()
            .and_then(|id| snapshot.book(id))
            .and_then(|book| book.title.clone());

        ReportLine {
            loan: loan.clone(),
            book_title,
            status,
        }
    }
}
