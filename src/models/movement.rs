//! Movement model
//!
//! A movement is a single dated income or expense, optionally tagged with the
//! household member it belongs to.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{MemberId, MovementId};
use super::money::Money;
use super::period::YearMonth;

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Income,
    Expense,
}

impl MovementKind {
    /// Parse a kind from user input ("income"/"in", "expense"/"out")
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" | "inflow" => Some(Self::Income),
            "expense" | "out" | "outflow" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// The date a movement was entered with
///
/// Kept as the raw text so that a record carrying a malformed date still
/// loads; it then counts toward totals but not toward any per-month view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryDate(String);

impl EntryDate {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The calendar date, if the text holds one
    ///
    /// Accepts `YYYY-MM-DD` and RFC 3339 timestamps (the date part is used).
    pub fn to_naive(&self) -> Option<NaiveDate> {
        let raw = self.0.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.date_naive())
    }

    /// The calendar month this date falls in, if the date is valid
    pub fn year_month(&self) -> Option<YearMonth> {
        self.to_naive().map(YearMonth::from_date)
    }

    pub fn is_valid(&self) -> bool {
        self.to_naive().is_some()
    }
}

impl From<NaiveDate> for EntryDate {
    fn from(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }
}

impl From<&str> for EntryDate {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for EntryDate {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for EntryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An opaque document attached to a movement (e.g. a receipt)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    /// Encoded payload; never inspected
    pub data: String,
}

impl Attachment {
    /// Wrap raw file contents, stored as standard base64
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Self {
        use base64::{engine::general_purpose::STANDARD, Engine};

        Self {
            name: name.into(),
            data: STANDARD.encode(bytes),
        }
    }
}

/// A single income or expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub id: MovementId,

    pub kind: MovementKind,

    /// Owning member, or [`MemberId::ALL`] when the movement is shared
    #[serde(default = "unassigned")]
    pub member_id: MemberId,

    /// Grouping label, required for expenses
    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub description: String,

    pub amount: Money,

    pub date: EntryDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn unassigned() -> MemberId {
    MemberId::ALL
}

impl Movement {
    /// Create a new movement for the shared "everyone" member
    pub fn new(kind: MovementKind, amount: Money, date: impl Into<EntryDate>) -> Self {
        Self {
            id: MovementId::new(),
            kind,
            member_id: MemberId::ALL,
            category: String::new(),
            description: String::new(),
            amount,
            date: date.into(),
            attachment: None,
            created_at: Utc::now(),
        }
    }

    pub fn income(amount: Money, date: impl Into<EntryDate>) -> Self {
        Self::new(MovementKind::Income, amount, date)
    }

    pub fn expense(amount: Money, date: impl Into<EntryDate>, category: impl Into<String>) -> Self {
        let mut movement = Self::new(MovementKind::Expense, amount, date);
        movement.category = category.into();
        movement
    }

    /// Builder-style member assignment
    pub fn for_member(mut self, member_id: MemberId) -> Self {
        self.member_id = member_id;
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == MovementKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == MovementKind::Expense
    }

    /// Validate the movement
    pub fn validate(&self) -> Result<(), MovementValidationError> {
        if self.amount.is_negative() {
            return Err(MovementValidationError::NegativeAmount);
        }
        if !self.amount.is_within_limit() {
            return Err(MovementValidationError::AmountTooLarge);
        }
        if self.is_expense() && self.category.trim().is_empty() {
            return Err(MovementValidationError::MissingCategory);
        }
        Ok(())
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.kind, self.amount)?;
        if !self.category.is_empty() {
            write!(f, " [{}]", self.category)?;
        }
        Ok(())
    }
}

/// Validation errors for movements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovementValidationError {
    NegativeAmount,
    AmountTooLarge,
    MissingCategory,
}

impl fmt::Display for MovementValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Amount cannot be negative"),
            Self::AmountTooLarge => write!(f, "Amount cannot exceed {}", Money::MAX),
            Self::MissingCategory => write!(f, "Expenses need a category"),
        }
    }
}

impl std::error::Error for MovementValidationError {}
