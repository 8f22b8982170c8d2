//! Audit log entries and client-side log filtering.
//!
//! [`matches`] is the conjunction of per-field checks described by a
//! [`FilterCriteria`]; an absent criterion never excludes a log. Date bounds
//! compare calendar dates when given a day, and full instants when given a
//! timestamp.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::Identified;
use crate::domain::error::ConsoleError;

/// Kind of operation recorded in an audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Login,
    Logout,
    Approve,
    Reject,
    Publish,
    Export,
}

impl AuditAction {
    /// Every action, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Create,
        Self::Update,
        Self::Delete,
        Self::Login,
        Self::Logout,
        Self::Approve,
        Self::Reject,
        Self::Publish,
        Self::Export,
    ];

    /// Human-readable label, also used for free-text search.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
            Self::Login => "Login",
            Self::Logout => "Logout",
            Self::Approve => "Approve",
            Self::Reject => "Reject",
            Self::Publish => "Publish",
            Self::Export => "Export",
        }
    }
}

/// Kind of entity an audit log refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditResource {
    Course,
    Category,
    Badge,
    Certification,
    User,
    Role,
    Review,
    Leaderboard,
    Settings,
}

impl AuditResource {
    /// Every resource kind, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Course,
        Self::Category,
        Self::Badge,
        Self::Certification,
        Self::User,
        Self::Role,
        Self::Review,
        Self::Leaderboard,
        Self::Settings,
    ];

    /// Human-readable label, also used for free-text search.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Course => "Course",
            Self::Category => "Category",
            Self::Badge => "Badge",
            Self::Certification => "Certification",
            Self::User => "User",
            Self::Role => "Role",
            Self::Review => "Review",
            Self::Leaderboard => "Leaderboard",
            Self::Settings => "Settings",
        }
    }
}

impl FromStr for AuditAction {
    type Err = ConsoleError;

    /// Parses a label case-insensitively (`"delete"`, `"Delete"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConsoleError::UnknownTag {
                kind: "audit action",
                value: s.to_string(),
            })
    }
}

impl FromStr for AuditResource {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConsoleError::UnknownTag {
                kind: "audit resource",
                value: s.to_string(),
            })
    }
}

/// One recorded administrative action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: u64,
    pub user_name: Option<String>,
    pub action: AuditAction,
    pub resource: AuditResource,
    pub resource_id: Option<String>,
    pub details: Option<String>,
    pub ip_address: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Identified for AuditLogEntry {
    type Id = u64;

    fn id(&self) -> &u64 {
        &self.id
    }
}

/// One end of a date-range constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// A calendar day; compared against the log's UTC date.
    Day(NaiveDate),
    /// An exact instant; compared against the full timestamp.
    Instant(DateTime<Utc>),
}

impl DateBound {
    /// Parses `YYYY-MM-DD` as a [`DateBound::Day`] or RFC 3339 as an
    /// [`DateBound::Instant`].
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Ok(day) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            return Some(Self::Day(day));
        }
        DateTime::parse_from_rfc3339(input)
            .ok()
            .map(|dt| Self::Instant(dt.with_timezone(&Utc)))
    }

    fn is_on_or_before(self, timestamp: DateTime<Utc>) -> bool {
        match self {
            Self::Day(day) => day <= timestamp.date_naive(),
            Self::Instant(instant) => instant <= timestamp,
        }
    }

    fn is_on_or_after(self, timestamp: DateTime<Utc>) -> bool {
        match self {
            Self::Day(day) => day >= timestamp.date_naive(),
            Self::Instant(instant) => instant >= timestamp,
        }
    }
}

/// Optional constraints narrowing an audit log collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub action: Option<AuditAction>,
    pub resource: Option<AuditResource>,
    pub start_date: Option<DateBound>,
    pub end_date: Option<DateBound>,
    pub search: Option<String>,
}

impl FilterCriteria {
    /// Returns `true` if no field constrains anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.action.is_none()
            && self.resource.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.search.as_deref().map_or(true, str::is_empty)
    }
}

/// Returns `true` if `log` satisfies every constraint in `criteria`.
#[must_use]
pub fn matches(log: &AuditLogEntry, criteria: &FilterCriteria) -> bool {
    if criteria.action.is_some_and(|action| action != log.action) {
        return false;
    }
    if criteria.resource.is_some_and(|resource| resource != log.resource) {
        return false;
    }
    if criteria
        .start_date
        .is_some_and(|start| !start.is_on_or_before(log.timestamp))
    {
        return false;
    }
    if criteria
        .end_date
        .is_some_and(|end| !end.is_on_or_after(log.timestamp))
    {
        return false;
    }

    match criteria.search.as_deref() {
        None | Some("") => true,
        Some(search) => search_haystack(log).contains(&search.to_lowercase()),
    }
}

/// Returns the logs matching `criteria`, preserving input order.
#[must_use]
pub fn filter_logs<'a>(logs: &'a [AuditLogEntry], criteria: &FilterCriteria) -> Vec<&'a AuditLogEntry> {
    let _span = tracing::debug_span!("filter_logs", total = logs.len()).entered();

    let filtered: Vec<&AuditLogEntry> = logs.iter().filter(|log| matches(log, criteria)).collect();

    tracing::debug!(matched = filtered.len(), "audit filter applied");
    filtered
}

fn search_haystack(log: &AuditLogEntry) -> String {
    format!(
        "{} {} {}",
        log.user_name.as_deref().unwrap_or_default(),
        log.action.label(),
        log.resource.label()
    )
    .to_lowercase()
}
