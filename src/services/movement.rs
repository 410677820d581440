//! Movement service
//!
//! CRUD for income and expense records. Dates entered through the service
//! must parse; records loaded from disk or imported may still carry malformed
//! dates, which the summary tolerates.

use crate::audit::EntityType;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    Attachment, EntryDate, MemberFilter, MemberId, Money, Movement, MovementId, MovementKind,
};
use crate::storage::Storage;

/// Fields supplied when creating or replacing a movement
#[derive(Debug, Clone)]
pub struct MovementInput {
    pub kind: MovementKind,
    pub amount: Money,
    pub date: EntryDate,
    pub member_id: MemberId,
    pub category: String,
    pub description: String,
    pub attachment: Option<Attachment>,
}

impl MovementInput {
    pub fn new(kind: MovementKind, amount: Money, date: impl Into<EntryDate>) -> Self {
        Self {
            kind,
            amount,
            date: date.into(),
            member_id: MemberId::ALL,
            category: String::new(),
            description: String::new(),
            attachment: None,
        }
    }

    pub fn member(mut self, member_id: MemberId) -> Self {
        self.member_id = member_id;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    fn apply_to(self, movement: &mut Movement) {
        movement.kind = self.kind;
        movement.amount = self.amount;
        movement.date = self.date;
        movement.member_id = self.member_id;
        movement.category = self.category.trim().to_string();
        movement.description = self.description.trim().to_string();
        movement.attachment = self.attachment;
    }
}

/// Service for movement management
pub struct MovementService<'a> {
    storage: &'a Storage,
}

impl<'a> MovementService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new movement
    pub fn add(&self, input: MovementInput) -> FinanceResult<Movement> {
        let mut movement = Movement::new(input.kind, input.amount, input.date.clone());
        input.apply_to(&mut movement);
        self.validate(&movement)?;

        self.storage.movements.upsert(movement.clone())?;
        self.storage.movements.save()?;

        self.storage.log_create(
            EntityType::Movement,
            movement.id.to_string(),
            Some(movement.to_string()),
            &movement,
        )?;
        tracing::debug!(movement = %movement.id, kind = %movement.kind, "movement added");

        Ok(movement)
    }

    /// Replace every editable field of an existing movement
    ///
    /// The ID and creation time are kept.
    pub fn update(&self, id: MovementId, input: MovementInput) -> FinanceResult<Movement> {
        let before = self
            .storage
            .movements
            .get(id)?
            .ok_or_else(|| FinanceError::movement_not_found(id.to_string()))?;

        let mut movement = before.clone();
        input.apply_to(&mut movement);
        self.validate(&movement)?;

        self.storage.movements.upsert(movement.clone())?;
        self.storage.movements.save()?;

        self.storage.log_update(
            EntityType::Movement,
            movement.id.to_string(),
            Some(movement.to_string()),
            &before,
            &movement,
        )?;
        tracing::debug!(movement = %movement.id, "movement updated");

        Ok(movement)
    }

    pub fn remove(&self, id: MovementId) -> FinanceResult<Movement> {
        let movement = self
            .storage
            .movements
            .delete(id)?
            .ok_or_else(|| FinanceError::movement_not_found(id.to_string()))?;
        self.storage.movements.save()?;

        self.storage.log_delete(
            EntityType::Movement,
            movement.id.to_string(),
            Some(movement.to_string()),
            &movement,
        )?;
        tracing::debug!(movement = %movement.id, "movement removed");

        Ok(movement)
    }

    /// Find by full ID or the short form shown in listings
    pub fn find(&self, identifier: &str) -> FinanceResult<Option<Movement>> {
        self.storage.movements.find(identifier)
    }

    /// Movements visible under `filter`, newest first
    pub fn list(&self, filter: MemberFilter) -> FinanceResult<Vec<Movement>> {
        match filter {
            MemberFilter::All => self.storage.movements.get_all(),
            MemberFilter::Member(id) => self.storage.movements.get_by_member(id),
        }
    }

    fn validate(&self, movement: &Movement) -> FinanceResult<()> {
        movement
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        if !movement.date.is_valid() {
            return Err(FinanceError::Validation(format!(
                "Invalid date '{}', expected YYYY-MM-DD",
                movement.date
            )));
        }

        if !self.storage.members.exists(movement.member_id)? {
            return Err(FinanceError::member_not_found(movement.member_id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::FinancePaths;
    use crate::models::Member;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn salary(cents: i64) -> MovementInput {
        MovementInput::new(MovementKind::Income, Money::from_cents(cents), "2025-01-10")
    }

    #[test]
    fn test_add_movement() {
        let (_temp, storage) = create_test_storage();
        let service = MovementService::new(&storage);

        let movement = service.add(salary(100_000).description("  Salary ")).unwrap();
        assert_eq!(movement.member_id, MemberId::ALL);
        assert_eq!(movement.description, "Salary");
        assert_eq!(storage.movements.count().unwrap(), 1);
    }

    #[test]
    fn test_expense_requires_category() {
        let (_temp, storage) = create_test_storage();
        let service = MovementService::new(&storage);

        let input = MovementInput::new(MovementKind::Expense, Money::from_cents(500), "2025-01-10");
        assert!(service.add(input.clone()).unwrap_err().is_validation());
        assert!(service.add(input.category("food")).is_ok());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let (_temp, storage) = create_test_storage();
        let err = MovementService::new(&storage).add(salary(-1)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_invalid_date_rejected() {
        let (_temp, storage) = create_test_storage();
        let input = MovementInput::new(MovementKind::Income, Money::from_cents(100), "10/01/2025");
        let err = MovementService::new(&storage).add(input).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_unknown_member_rejected() {
        let (_temp, storage) = create_test_storage();
        let err = MovementService::new(&storage)
            .add(salary(100).member(MemberId::new()))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_keeps_id() {
        let (_temp, storage) = create_test_storage();
        let service = MovementService::new(&storage);
        let original = service.add(salary(100_000)).unwrap();

        let updated = service
            .update(
                original.id,
                MovementInput::new(MovementKind::Expense, Money::from_cents(2_500), "2025-02-01")
                    .category("fuel"),
            )
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.kind, MovementKind::Expense);
        assert_eq!(storage.movements.get(original.id).unwrap(), Some(updated));

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.last().unwrap().operation, Operation::Update);
    }

    #[test]
    fn test_remove_missing_movement() {
        let (_temp, storage) = create_test_storage();
        let err = MovementService::new(&storage)
            .remove(MovementId::new())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_attachment_survives_reload_and_export() {
        let (temp, storage) = create_test_storage();
        let receipt = Attachment::from_bytes("receipt.pdf", b"%PDF-1.4");
        let movement = MovementService::new(&storage)
            .add(salary(4_200).attachment(receipt.clone()))
            .unwrap();

        let paths = FinancePaths::with_base_dir(temp.path().to_path_buf());
        let mut reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        let stored = reopened.movements.get(movement.id).unwrap().unwrap();
        assert_eq!(stored.attachment, Some(receipt.clone()));

        let mut buffer = Vec::new();
        crate::export::export_full_json(&reopened, &mut buffer, false).unwrap();
        let exported = String::from_utf8(buffer).unwrap();
        assert!(exported.contains("receipt.pdf"));
        assert!(exported.contains(&receipt.data));
    }

    #[test]
    fn test_list_by_member() {
        let (_temp, storage) = create_test_storage();
        let ana = Member::new("Ana");
        storage.members.upsert(ana.clone()).unwrap();
        let service = MovementService::new(&storage);

        service.add(salary(100).member(ana.id)).unwrap();
        service.add(salary(200)).unwrap();

        assert_eq!(service.list(MemberFilter::All).unwrap().len(), 2);
        let mine = service.list(MemberFilter::Member(ana.id)).unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].amount, Money::from_cents(100));
    }
}
