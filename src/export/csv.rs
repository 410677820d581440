//! CSV export of movements

use std::collections::HashMap;
use std::io::Write;

use crate::error::{FinanceError, FinanceResult};
use crate::models::MemberFilter;
use crate::storage::Storage;

/// Export movements selected by `filter` to CSV, newest first
///
/// Columns: `id,date,kind,member,category,description,amount`. Members that
/// no longer exist are written as `Unknown`.
pub fn export_movements_csv<W: Write>(
    storage: &Storage,
    writer: W,
    filter: MemberFilter,
) -> FinanceResult<()> {
    let member_names: HashMap<_, _> = storage
        .members
        .get_all()?
        .into_iter()
        .map(|m| (m.id, m.name))
        .collect();

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["id", "date", "kind", "member", "category", "description", "amount"])
        .map_err(|e| FinanceError::Export(e.to_string()))?;

    for movement in storage
        .movements
        .get_all()?
        .into_iter()
        .filter(|m| filter.includes(m.member_id))
    {
        let member = member_names
            .get(&movement.member_id)
            .map(String::as_str)
            .unwrap_or("Unknown");

        csv.write_record([
            movement.id.as_uuid().to_string(),
            movement.date.to_string(),
            movement.kind.to_string().to_lowercase(),
            member.to_string(),
            movement.category.clone(),
            movement.description.clone(),
            movement.amount.to_decimal_string(),
        ])
        .map_err(|e| FinanceError::Export(e.to_string()))?;
    }

    csv.flush().map_err(|e| FinanceError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancePaths;
    use crate::models::{EntryDate, Member, Money, Movement};
    use tempfile::TempDir;

    #[test]
    fn test_movements_csv() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let ana = Member::new("Ana");
        storage.members.upsert(ana.clone()).unwrap();
        let mut lunch =
            Movement::expense(Money::from_cents(1_250), EntryDate::new("2025-03-02"), "food")
                .for_member(ana.id);
        lunch.description = "Lunch, with friends".into();
        storage.movements.upsert(lunch).unwrap();
        storage
            .movements
            .upsert(Movement::income(Money::from_cents(500_000), EntryDate::new("2025-03-01")))
            .unwrap();

        let mut output = Vec::new();
        export_movements_csv(&storage, &mut output, MemberFilter::All).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "id,date,kind,member,category,description,amount");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("2025-03-02,expense,Ana,food,\"Lunch, with friends\",12.50"));
        assert!(lines[2].contains("2025-03-01,income,Everyone,,,5000.00"));

        let mut only_ana = Vec::new();
        export_movements_csv(&storage, &mut only_ana, MemberFilter::Member(ana.id)).unwrap();
        assert_eq!(String::from_utf8(only_ana).unwrap().lines().count(), 2);
    }
}
