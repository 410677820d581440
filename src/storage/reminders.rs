//! Reminder repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::{Reminder, ReminderId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ReminderData {
    #[serde(default)]
    reminders: Vec<Reminder>,
}

pub struct ReminderRepository {
    path: PathBuf,
    data: RwLock<HashMap<ReminderId, Reminder>>,
}

fn by_due_date(list: &mut [Reminder]) {
    list.sort_by(|a, b| {
        a.due
            .cmp(&b.due)
            .then_with(|| a.description.cmp(&b.description))
            .then_with(|| a.id.cmp(&b.id))
    });
}

impl ReminderRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: ReminderData = read_json(&self.path)?;
        let mut data = write_lock(&self.data)?;

        data.clear();
        for reminder in file_data.reminders {
            data.insert(reminder.id, reminder);
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), FinanceError> {
        let reminders = self.get_all()?;
        write_json_atomic(&self.path, &ReminderData { reminders })
    }

    /// All reminders, earliest due date first
    pub fn get_all(&self) -> Result<Vec<Reminder>, FinanceError> {
        let mut list: Vec<_> = read_lock(&self.data)?.values().cloned().collect();
        by_due_date(&mut list);
        Ok(list)
    }

    pub fn find(&self, identifier: &str) -> Result<Option<Reminder>, FinanceError> {
        let data = read_lock(&self.data)?;
        let mut matches = data.values().filter(|r| r.id.matches(identifier));
        match (matches.next(), matches.next()) {
            (Some(found), None) => Ok(Some(found.clone())),
            _ => Ok(None),
        }
    }

    pub fn upsert(&self, reminder: Reminder) -> Result<(), FinanceError> {
        write_lock(&self.data)?.insert(reminder.id, reminder);
        Ok(())
    }

    pub fn delete(&self, id: ReminderId) -> Result<Option<Reminder>, FinanceError> {
        Ok(write_lock(&self.data)?.remove(&id))
    }

    pub fn replace_all(&self, reminders: Vec<Reminder>) -> Result<(), FinanceError> {
        let mut data = write_lock(&self.data)?;
        data.clear();
        for reminder in reminders {
            data.insert(reminder.id, reminder);
        }
        Ok(())
    }
}
