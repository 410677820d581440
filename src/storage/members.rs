//! Member repository for JSON storage
//!
//! Manages loading and saving members to members.json. The reserved
//! "everyone" member is always present and always listed first.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::{Member, MemberId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct MemberData {
    #[serde(default)]
    members: Vec<Member>,
}

/// Repository for member persistence, kept in insertion order
pub struct MemberRepository {
    path: PathBuf,
    data: RwLock<Vec<Member>>,
}

/// Put the reserved member at the front, creating it if missing
fn ensure_reserved(members: &mut Vec<Member>) {
    match members.iter().position(Member::is_reserved) {
        Some(0) => {}
        Some(index) => {
            let reserved = members.remove(index);
            members.insert(0, reserved);
        }
        None => members.insert(0, Member::everyone()),
    }
}

impl MemberRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(vec![Member::everyone()]),
        }
    }

    /// Load members from disk
    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: MemberData = read_json(&self.path)?;
        let mut data = write_lock(&self.data)?;

        *data = file_data.members;
        ensure_reserved(&mut data);

        tracing::debug!(count = data.len(), "loaded members");
        Ok(())
    }

    /// Save members to disk
    pub fn save(&self) -> Result<(), FinanceError> {
        let data = read_lock(&self.data)?;
        write_json_atomic(
            &self.path,
            &MemberData {
                members: data.clone(),
            },
        )
    }

    pub fn get(&self, id: MemberId) -> Result<Option<Member>, FinanceError> {
        Ok(read_lock(&self.data)?.iter().find(|m| m.id == id).cloned())
    }

    /// Get a member by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Member>, FinanceError> {
        let name = name.trim().to_lowercase();
        Ok(read_lock(&self.data)?
            .iter()
            .find(|m| m.name.to_lowercase() == name)
            .cloned())
    }

    /// All members, reserved member first
    pub fn get_all(&self) -> Result<Vec<Member>, FinanceError> {
        Ok(read_lock(&self.data)?.clone())
    }

    /// Insert or replace a member, keeping its position when replacing
    pub fn upsert(&self, member: Member) -> Result<(), FinanceError> {
        let mut data = write_lock(&self.data)?;
        match data.iter_mut().find(|m| m.id == member.id) {
            Some(existing) => *existing = member,
            None => data.push(member),
        }
        Ok(())
    }

    /// Delete a member; the reserved member is never removed
    pub fn delete(&self, id: MemberId) -> Result<Option<Member>, FinanceError> {
        if id.is_all() {
            return Ok(None);
        }
        let mut data = write_lock(&self.data)?;
        Ok(data
            .iter()
            .position(|m| m.id == id)
            .map(|index| data.remove(index)))
    }

    pub fn exists(&self, id: MemberId) -> Result<bool, FinanceError> {
        Ok(read_lock(&self.data)?.iter().any(|m| m.id == id))
    }

    /// Check if a name is taken, optionally ignoring one member
    pub fn name_exists(&self, name: &str, exclude: Option<MemberId>) -> Result<bool, FinanceError> {
        let name = name.trim().to_lowercase();
        Ok(read_lock(&self.data)?
            .iter()
            .any(|m| m.name.to_lowercase() == name && Some(m.id) != exclude))
    }

    /// Replace the whole collection (used by import)
    pub fn replace_all(&self, members: Vec<Member>) -> Result<(), FinanceError> {
        let mut data = write_lock(&self.data)?;
        *data = members;
        ensure_reserved(&mut data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, MemberRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = MemberRepository::new(temp_dir.path().join("members.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load_has_reserved_member() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let members = repo.get_all().unwrap();
        assert_eq!(members.len(), 1);
        assert!(members[0].is_reserved());
    }

    #[test]
    fn test_reserved_member_cannot_be_deleted() {
        let (_temp_dir, repo) = create_test_repo();
        assert!(repo.delete(MemberId::ALL).unwrap().is_none());
        assert!(repo.exists(MemberId::ALL).unwrap());
    }

    #[test]
    fn test_save_and_reload_keeps_order() {
        let (temp_dir, repo) = create_test_repo();
        let ana = Member::new("Ana");
        let bruno = Member::new("Bruno");
        repo.upsert(ana.clone()).unwrap();
        repo.upsert(bruno.clone()).unwrap();
        repo.save().unwrap();

        let reloaded = MemberRepository::new(temp_dir.path().join("members.json"));
        reloaded.load().unwrap();
        let names: Vec<_> = reloaded
            .get_all()
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Everyone", "Ana", "Bruno"]);
    }

    #[test]
    fn test_reserved_member_moved_to_front() {
        let (_temp_dir, repo) = create_test_repo();
        let ana = Member::new("Ana");
        repo.replace_all(vec![ana.clone(), Member::everyone()]).unwrap();

        let members = repo.get_all().unwrap();
        assert!(members[0].is_reserved());
        assert_eq!(members[1].id, ana.id);
        assert_eq!(members.len(), 2);
    }

    #[test]
    fn test_name_lookup() {
        let (_temp_dir, repo) = create_test_repo();
        let ana = Member::new("Ana");
        repo.upsert(ana.clone()).unwrap();

        assert_eq!(repo.get_by_name("  ana ").unwrap().unwrap().id, ana.id);
        assert!(repo.name_exists("ANA", None).unwrap());
        assert!(!repo.name_exists("ana", Some(ana.id)).unwrap());
    }

    #[test]
    fn test_delete_member() {
        let (_temp_dir, repo) = create_test_repo();
        let ana = Member::new("Ana");
        repo.upsert(ana.clone()).unwrap();

        assert_eq!(repo.delete(ana.id).unwrap(), Some(ana.clone()));
        assert!(!repo.exists(ana.id).unwrap());
    }
}
