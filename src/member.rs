//! Member models.

use crate::record::{non_blank, RecordId};
use serde::Deserialize;

/// Raw member record as served by `GET /members`.
///
/// Older records carry a single `name`; newer ones split it into
/// `firstName`/`lastName`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub id: RecordId,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub join_date: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}

impl MemberRecord {
    pub fn normalize(self) -> Member {
        let split_name = [non_blank(self.first_name), non_blank(self.last_name)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        let name = non_blank(self.name)
            .or_else(|| non_blank(Some(split_name)))
            .unwrap_or_else(|| self.id.to_string());

        Member {
            id: self.id,
            name,
            email: non_blank(self.email),
            join_date: non_blank(self.join_date),
            status: self
                .status
                .as_deref()
                .map(MemberStatus::parse)
                .unwrap_or(MemberStatus::Active),
        }
    }
}

/// Membership state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberStatus {
    Active,
    Inactive,
}

impl MemberStatus {
    /// Anything other than `active` counts as inactive.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("active") {
            MemberStatus::Active
        } else {
            MemberStatus::Inactive
        }
    }
}

/// A library member. Only used for grouping and display.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: RecordId,

    /// Display name; falls back to the id when the record has no name.
    pub name: String,

    pub email: Option<String>,
    pub join_date: Option<String>,
    pub status: MemberStatus,
}

impl Member {
    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}
