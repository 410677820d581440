//! Service layer for family-finance
//!
//! Services sit on top of the storage layer: they validate input, persist
//! changes, and write audit entries. Pure computations (allocation, summary)
//! live in their own modules and take snapshots rather than storage.

pub mod allocation;
pub mod fixed_expense;
pub mod member;
pub mod movement;
pub mod reminder;
pub mod summary;

pub use allocation::{allocate, IncomeShare};
pub use fixed_expense::FixedExpenseService;
pub use member::MemberService;
pub use movement::{MovementInput, MovementService};
pub use reminder::ReminderService;
pub use summary::SummaryService;
