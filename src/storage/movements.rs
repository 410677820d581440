//! Movement repository for JSON storage
//!
//! Manages loading and saving movements to movements.json

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::{MemberId, Movement, MovementId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct MovementData {
    #[serde(default)]
    movements: Vec<Movement>,
}

/// Repository for movement persistence
pub struct MovementRepository {
    path: PathBuf,
    data: RwLock<HashMap<MovementId, Movement>>,
}

/// Newest first; movements with unreadable dates sort after all dated ones
fn newest_first(a: &Movement, b: &Movement) -> Ordering {
    match (a.date.to_naive(), b.date.to_naive()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| b.created_at.cmp(&a.created_at))
    .then_with(|| a.id.cmp(&b.id))
}

impl MovementRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load movements from disk
    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: MovementData = read_json(&self.path)?;
        let mut data = write_lock(&self.data)?;

        data.clear();
        for movement in file_data.movements {
            data.insert(movement.id, movement);
        }

        tracing::debug!(count = data.len(), path = %self.path.display(), "loaded movements");
        Ok(())
    }

    /// Save movements to disk
    pub fn save(&self) -> Result<(), FinanceError> {
        let data = read_lock(&self.data)?;

        let mut movements: Vec<_> = data.values().cloned().collect();
        movements.sort_by(newest_first);

        write_json_atomic(&self.path, &MovementData { movements })
    }

    pub fn get(&self, id: MovementId) -> Result<Option<Movement>, FinanceError> {
        Ok(read_lock(&self.data)?.get(&id).cloned())
    }

    /// Find a movement by full ID or the short form printed in listings
    ///
    /// Returns `None` when nothing or more than one movement matches.
    pub fn find(&self, identifier: &str) -> Result<Option<Movement>, FinanceError> {
        let data = read_lock(&self.data)?;
        let mut matches = data.values().filter(|m| m.id.matches(identifier));
        match (matches.next(), matches.next()) {
            (Some(found), None) => Ok(Some(found.clone())),
            _ => Ok(None),
        }
    }

    /// Snapshot of every movement, newest first
    pub fn get_all(&self) -> Result<Vec<Movement>, FinanceError> {
        let data = read_lock(&self.data)?;

        let mut movements: Vec<_> = data.values().cloned().collect();
        movements.sort_by(newest_first);
        Ok(movements)
    }

    /// Movements tagged with `member_id`, newest first
    pub fn get_by_member(&self, member_id: MemberId) -> Result<Vec<Movement>, FinanceError> {
        let data = read_lock(&self.data)?;

        let mut movements: Vec<_> = data
            .values()
            .filter(|m| m.member_id == member_id)
            .cloned()
            .collect();
        movements.sort_by(newest_first);
        Ok(movements)
    }

    /// Insert or replace a movement
    pub fn upsert(&self, movement: Movement) -> Result<(), FinanceError> {
        write_lock(&self.data)?.insert(movement.id, movement);
        Ok(())
    }

    /// Delete a movement, returning it if it existed
    pub fn delete(&self, id: MovementId) -> Result<Option<Movement>, FinanceError> {
        Ok(write_lock(&self.data)?.remove(&id))
    }

    /// Replace the whole collection (used by import)
    pub fn replace_all(&self, movements: Vec<Movement>) -> Result<(), FinanceError> {
        let mut data = write_lock(&self.data)?;
        data.clear();
        for movement in movements {
            data.insert(movement.id, movement);
        }
        Ok(())
    }

    pub fn count(&self) -> Result<usize, FinanceError> {
        Ok(read_lock(&self.data)?.len())
    }
}
