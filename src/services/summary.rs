//! Summary service
//!
//! Takes a snapshot of stored movements and runs the aggregation over it.

use crate::error::FinanceResult;
use crate::models::{MemberFilter, Money};
use crate::reports::{aggregate_with_window, Summary};
use crate::storage::Storage;

pub struct SummaryService<'a> {
    storage: &'a Storage,
}

impl<'a> SummaryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Summarize movements selected by `filter`, keeping `months` monthly buckets
    pub fn summarize(&self, filter: MemberFilter, months: usize) -> FinanceResult<Summary> {
        let movements = self.storage.movements.get_all()?;
        let summary = aggregate_with_window(&movements, filter, months);

        if summary.undated_count > 0 {
            tracing::warn!(
                count = summary.undated_count,
                "movements with unreadable dates left out of the monthly series"
            );
        }

        Ok(summary)
    }

    /// Projected balance for next month
    pub fn forecast(&self, filter: MemberFilter, months: usize) -> FinanceResult<Money> {
        Ok(self.summarize(filter, months)?.forecast())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancePaths;
    use crate::models::{EntryDate, Member, Movement};
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let movements = vec![
            Movement::income(Money::from_units(1000, 0), EntryDate::new("2024-01-05")),
            Movement::expense(Money::from_units(300, 0), EntryDate::new("2024-01-20"), "food"),
            Movement::income(Money::from_units(1200, 0), EntryDate::new("2024-02-05")),
            Movement::expense(Money::from_units(500, 0), EntryDate::new("2024-02-20"), "food"),
        ];
        storage.movements.replace_all(movements).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_summarize_stored_movements() {
        let (_temp, storage) = setup();
        let service = SummaryService::new(&storage);

        let summary = service.summarize(MemberFilter::All, 6).unwrap();
        assert_eq!(summary.total_income, Money::from_units(2200, 0));
        assert_eq!(summary.total_expense, Money::from_units(800, 0));
        assert_eq!(summary.balance, Money::from_units(1400, 0));
        assert_eq!(summary.average_net(), Money::from_units(700, 0));
        assert_eq!(
            service.forecast(MemberFilter::All, 6).unwrap(),
            Money::from_units(2100, 0)
        );
    }

    #[test]
    fn test_unknown_member_yields_empty_summary() {
        let (_temp, storage) = setup();
        let stranger = Member::new("Stranger");

        let summary = SummaryService::new(&storage)
            .summarize(MemberFilter::Member(stranger.id), 6)
            .unwrap();
        assert_eq!(summary.movement_count, 0);
        assert!(summary.monthly.is_empty());
        assert_eq!(summary.forecast(), Money::zero());
    }
}
