//! Reminder service
//!
//! Keeps the agenda of bills to pay and money to receive.

use chrono::{Duration, NaiveDate};

use crate::audit::EntityType;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, Reminder, ReminderId, ReminderKind};
use crate::storage::Storage;

pub struct ReminderService<'a> {
    storage: &'a Storage,
}

impl<'a> ReminderService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn add(
        &self,
        description: &str,
        due: NaiveDate,
        amount: Money,
        kind: ReminderKind,
    ) -> FinanceResult<Reminder> {
        let reminder = Reminder::new(description.trim(), due, amount, kind);
        reminder.validate().map_err(FinanceError::Validation)?;

        self.storage.reminders.upsert(reminder.clone())?;
        self.storage.reminders.save()?;

        self.storage.log_create(
            EntityType::Reminder,
            reminder.id.to_string(),
            Some(reminder.description.clone()),
            &reminder,
        )?;
        tracing::debug!(reminder = %reminder.id, due = %reminder.due, "reminder added");

        Ok(reminder)
    }

    /// All reminders, earliest due date first
    pub fn list(&self) -> FinanceResult<Vec<Reminder>> {
        self.storage.reminders.get_all()
    }

    /// Reminders due from `today` through `today + days`, plus any overdue
    pub fn upcoming(&self, today: NaiveDate, days: i64) -> FinanceResult<Vec<Reminder>> {
        let horizon = today + Duration::days(days.max(0));
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| r.due <= horizon)
            .collect())
    }

    pub fn find(&self, identifier: &str) -> FinanceResult<Option<Reminder>> {
        self.storage.reminders.find(identifier)
    }

    pub fn remove(&self, id: ReminderId) -> FinanceResult<Reminder> {
        let reminder = self
            .storage
            .reminders
            .delete(id)?
            .ok_or_else(|| FinanceError::reminder_not_found(id.to_string()))?;
        self.storage.reminders.save()?;

        self.storage.log_delete(
            EntityType::Reminder,
            reminder.id.to_string(),
            Some(reminder.description.clone()),
            &reminder,
        )?;

        Ok(reminder)
    }
}
