//! Core data models for family-finance
//!
//! Members, the income/expense movements tagged to them, fixed expenses split
//! between members, and agenda reminders.

pub mod fixed_expense;
pub mod ids;
pub mod member;
pub mod money;
pub mod movement;
pub mod period;
pub mod reminder;

pub use fixed_expense::{Contribution, FixedExpense};
pub use ids::{FixedExpenseId, MemberId, MovementId, ReminderId};
pub use member::{Member, MemberFilter};
pub use money::{Money, MoneyParseError};
pub use movement::{Attachment, EntryDate, Movement, MovementKind, MovementValidationError};
pub use period::YearMonth;
pub use reminder::{Reminder, ReminderKind};
