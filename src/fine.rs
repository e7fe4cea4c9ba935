//! Fine configuration and derived fine records.
//!
//! Maintains the invariant: `total_fine == sum(fines[i].fine_amount)`.

use crate::loan::Loan;
use crate::member::Member;

/// Late fee charged per whole day past the due date.
pub const DAILY_RATE: u64 = 20;

/// Flat surcharge for a book returned damaged.
pub const DAMAGE_RATE: u64 = 50;

/// Rates used by the fine engine, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FineConfig {
    pub daily_rate: u64,
    pub damage_rate: u64,
}

impl FineConfig {
    pub fn new(daily_rate: u64, damage_rate: u64) -> Self {
        FineConfig {
            daily_rate,
            damage_rate,
        }
    }
}

impl Default for FineConfig {
    fn default() -> Self {
        FineConfig::new(DAILY_RATE, DAMAGE_RATE)
    }
}

/// The fine owed on a single loan. Computed on every read, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct FineRecord {
    pub loan: Loan,
    pub fine_amount: u64,
}

/// All fines of one member.
///
/// # Invariants
///
/// - `fines` keeps the order of the input loans
/// - `total_fine` is the exact sum of `fines[i].fine_amount`
#[derive(Debug, Clone, PartialEq)]
pub struct MemberFineSummary {
    pub member: Member,
    pub fines: Vec<FineRecord>,
    pub total_fine: u64,
}

impl MemberFineSummary {
    /// Builds a summary, deriving the total from the records.
    pub fn new(member: Member, fines: Vec<FineRecord>) -> Self {
        let total_fine = fines
            .iter()
            .fold(0u64, |sum, f| sum.saturating_add(f.fine_amount));
        MemberFineSummary {
            member,
            fines,
            total_fine,
        }
    }

    /// Returns `true` if the member owes nothing.
    pub fn is_clear(&self) -> bool {
        self.total_fine == 0
    }

    /// Verifies the invariant: `total_fine == sum(fine_amount)`.
    #[cfg(debug_assertions)]
    pub fn check_invariant(&self) -> bool {
        self.total_fine
            == self
                .fines
                .iter()
                .fold(0u64, |sum, f| sum.saturating_add(f.fine_amount))
    }
}
