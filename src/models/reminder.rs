//! Bills agenda entries
//!
//! A reminder notes an amount that has to be paid or is expected to be
//! received on a due date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ReminderId;
use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    Pay,
    Receive,
}

impl ReminderKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pay" | "payable" => Some(Self::Pay),
            "receive" | "receivable" => Some(Self::Receive),
            _ => None,
        }
    }
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pay => write!(f, "Pay"),
            Self::Receive => write!(f, "Receive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub description: String,
    pub due: NaiveDate,
    pub amount: Money,
    pub kind: ReminderKind,
}

impl Reminder {
    pub fn new(
        description: impl Into<String>,
        due: NaiveDate,
        amount: Money,
        kind: ReminderKind,
    ) -> Self {
        Self {
            id: ReminderId::new(),
            description: description.into(),
            due,
            amount,
            kind,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("Reminder description cannot be empty".into());
        }
        if !self.amount.is_positive() {
            return Err("Reminder amount must be greater than zero".into());
        }
        if !self.amount.is_within_limit() {
            return Err(format!("Reminder amount cannot exceed {}", Money::MAX));
        }
        Ok(())
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due < today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn due(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
    }

    #[test]
    fn test_validation() {
        let ok = Reminder::new("Water bill", due(10), Money::from_cents(8_000), ReminderKind::Pay);
        assert!(ok.validate().is_ok());

        let blank = Reminder::new(" ", due(10), Money::from_cents(8_000), ReminderKind::Pay);
        assert!(blank.validate().is_err());

        let zero = Reminder::new("Refund", due(10), Money::zero(), ReminderKind::Receive);
        assert!(zero.validate().is_err());

        let huge = Reminder::new(
            "Lottery",
            due(10),
            Money::from_cents(Money::MAX.cents() + 1),
            ReminderKind::Receive,
        );
        assert!(huge.validate().is_err());
    }

    #[test]
    fn test_overdue() {
        let r = Reminder::new("Rent", due(5), Money::from_cents(1), ReminderKind::Pay);
        assert!(r.is_overdue(due(6)));
        assert!(!r.is_overdue(due(5)));
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(ReminderKind::parse("PAY"), Some(ReminderKind::Pay));
        assert_eq!(ReminderKind::parse("receive"), Some(ReminderKind::Receive));
        assert_eq!(ReminderKind::parse("later"), None);
    }
}
