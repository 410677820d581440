//! Member service
//!
//! Manages the household roster. The reserved "Everyone" member always exists
//! and cannot be removed.

use crate::audit::EntityType;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Member, MemberId};
use crate::storage::Storage;

/// Service for member management
pub struct MemberService<'a> {
    storage: &'a Storage,
}

impl<'a> MemberService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a member
    pub fn add(&self, name: &str, details: Option<&str>) -> FinanceResult<Member> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FinanceError::Validation("Member name cannot be empty".into()));
        }

        if self.storage.members.name_exists(name, None)? {
            return Err(FinanceError::Duplicate {
                entity_type: "Member",
                identifier: name.to_string(),
            });
        }

        let member = match details {
            Some(details) => Member::with_details(name, details),
            None => Member::new(name),
        };
        member.validate().map_err(FinanceError::Validation)?;

        self.storage.members.upsert(member.clone())?;
        self.storage.members.save()?;

        self.storage.log_create(
            EntityType::Member,
            member.id.to_string(),
            Some(member.name.clone()),
            &member,
        )?;
        tracing::info!(member = %member.id, name = %member.name, "member added");

        Ok(member)
    }

    pub fn get(&self, id: MemberId) -> FinanceResult<Option<Member>> {
        self.storage.members.get(id)
    }

    /// Find a member by name (case-insensitive) or ID
    pub fn find(&self, identifier: &str) -> FinanceResult<Option<Member>> {
        if let Some(member) = self.storage.members.get_by_name(identifier)? {
            return Ok(Some(member));
        }

        let members = self.storage.members.get_all()?;
        let mut matches = members.into_iter().filter(|m| m.id.matches(identifier));
        match (matches.next(), matches.next()) {
            (Some(found), None) => Ok(Some(found)),
            _ => Ok(None),
        }
    }

    /// Resolve an identifier or fail with a not-found error
    pub fn resolve(&self, identifier: &str) -> FinanceResult<Member> {
        self.find(identifier)?
            .ok_or_else(|| FinanceError::member_not_found(identifier))
    }

    /// All members, reserved member first
    pub fn list(&self) -> FinanceResult<Vec<Member>> {
        self.storage.members.get_all()
    }

    /// Remove a member
    ///
    /// Movements already tagged with the member are left untouched.
    pub fn remove(&self, id: MemberId) -> FinanceResult<Member> {
        if id.is_all() {
            return Err(FinanceError::Validation(
                "The shared member cannot be removed".into(),
            ));
        }

        let member = self
            .storage
            .members
            .delete(id)?
            .ok_or_else(|| FinanceError::member_not_found(id.to_string()))?;
        self.storage.members.save()?;

        self.storage.log_delete(
            EntityType::Member,
            member.id.to_string(),
            Some(member.name.clone()),
            &member,
        )?;
        tracing::info!(member = %member.id, "member removed");

        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancePaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_add_and_list() {
        let (_temp, storage) = create_test_storage();
        let service = MemberService::new(&storage);

        let ana = service.add("  Ana ", Some("Mother")).unwrap();
        assert_eq!(ana.name, "Ana");
        assert_eq!(ana.details.as_deref(), Some("Mother"));

        let names: Vec<_> = service.list().unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Everyone", "Ana"]);
    }

    #[test]
    fn test_empty_name_rejected() {
        let (_temp, storage) = create_test_storage();
        let err = MemberService::new(&storage).add("   ", None).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = MemberService::new(&storage);
        service.add("Ana", None).unwrap();

        let err = service.add("ana", None).unwrap_err();
        assert!(matches!(err, FinanceError::Duplicate { .. }));
    }

    #[test]
    fn test_reserved_member_cannot_be_removed() {
        let (_temp, storage) = create_test_storage();
        let service = MemberService::new(&storage);

        let err = service.remove(MemberId::ALL).unwrap_err();
        assert!(err.is_validation());
        assert!(service.get(MemberId::ALL).unwrap().is_some());
    }

    #[test]
    fn test_remove_member_is_audited() {
        let (_temp, storage) = create_test_storage();
        let service = MemberService::new(&storage);
        let bob = service.add("Bob", None).unwrap();

        service.remove(bob.id).unwrap();
        assert!(service.get(bob.id).unwrap().is_none());
        assert!(service.remove(bob.id).unwrap_err().is_not_found());
        assert_eq!(storage.audit().read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_find_by_name_or_id() {
        let (_temp, storage) = create_test_storage();
        let service = MemberService::new(&storage);
        let ana = service.add("Ana", None).unwrap();

        assert_eq!(service.find("ANA").unwrap(), Some(ana.clone()));
        assert_eq!(service.find(&ana.id.to_string()).unwrap(), Some(ana.clone()));
        assert_eq!(service.find(&ana.id.as_uuid().to_string()).unwrap(), Some(ana));
        assert!(service.resolve("nobody").unwrap_err().is_not_found());
    }
}
