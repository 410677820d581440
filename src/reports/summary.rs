//! Financial summary
//!
//! Aggregates a snapshot of movements into income/expense totals, an expense
//! breakdown by category, and a per-month series covering the most recent
//! months.

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{MemberFilter, Money, Movement, MovementKind, YearMonth};

use super::forecast::{average_net, forecast};
use super::DEFAULT_MONTH_WINDOW;

/// Income and expense totals for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthBucket {
    pub year_month: YearMonth,
    pub income_total: Money,
    pub expense_total: Money,
}

impl MonthBucket {
    pub fn new(year_month: YearMonth) -> Self {
        Self {
            year_month,
            income_total: Money::zero(),
            expense_total: Money::zero(),
        }
    }

    /// Income minus expense for the month
    pub fn net(&self) -> Money {
        self.income_total - self.expense_total
    }
}

/// Aggregated view of a set of movements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total_income: Money,
    pub total_expense: Money,
    /// `total_income - total_expense`
    pub balance: Money,
    /// Expense totals keyed by category; uncategorized expenses use `""`
    pub by_category: BTreeMap<String, Money>,
    /// Oldest month first, limited to the most recent window
    pub monthly: Vec<MonthBucket>,
    /// Movements that passed the member filter
    pub movement_count: usize,
    /// Included movements whose date could not be read
    pub undated_count: usize,
}

/// Aggregate movements using the default six-month window
pub fn aggregate(movements: &[Movement], filter: MemberFilter) -> Summary {
    aggregate_with_window(movements, filter, DEFAULT_MONTH_WINDOW)
}

/// Aggregate movements, keeping at most `months` buckets in the monthly series
///
/// The result does not depend on the order of `movements`. Movements with an
/// unreadable date still count toward the totals and the category breakdown
/// but are left out of the monthly series.
pub fn aggregate_with_window(movements: &[Movement], filter: MemberFilter, months: usize) -> Summary {
    let mut total_income = Money::zero();
    let mut total_expense = Money::zero();
    let mut by_category: BTreeMap<String, Money> = BTreeMap::new();
    let mut buckets: BTreeMap<YearMonth, MonthBucket> = BTreeMap::new();
    let mut movement_count = 0;
    let mut undated_count = 0;

    for movement in movements.iter().filter(|m| filter.includes(m.member_id)) {
        movement_count += 1;

        match movement.kind {
            MovementKind::Income => total_income += movement.amount,
            MovementKind::Expense => {
                total_expense += movement.amount;
                *by_category.entry(category_key(&movement.category)).or_default() +=
                    movement.amount;
            }
        }

        let Some(year_month) = movement.date.year_month() else {
            undated_count += 1;
            continue;
        };

        let bucket = buckets
            .entry(year_month)
            .or_insert_with(|| MonthBucket::new(year_month));
        match movement.kind {
            MovementKind::Income => bucket.income_total += movement.amount,
            MovementKind::Expense => bucket.expense_total += movement.amount,
        }
    }

    // BTreeMap iterates in chronological order
    let skip = buckets.len().saturating_sub(months);
    let monthly: Vec<MonthBucket> = buckets.into_values().skip(skip).collect();

    Summary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        by_category,
        monthly,
        movement_count,
        undated_count,
    }
}

fn category_key(category: &str) -> String {
    if category.trim().is_empty() {
        String::new()
    } else {
        category.to_string()
    }
}

impl Summary {
    /// Net value of each retained month, oldest first
    pub fn net_by_month(&self) -> Vec<Money> {
        self.monthly.iter().map(MonthBucket::net).collect()
    }

    /// Mean monthly net over the retained months
    pub fn average_net(&self) -> Money {
        average_net(&self.monthly)
    }

    /// Projected balance for the next month
    pub fn forecast(&self) -> Money {
        forecast(self.balance, &self.monthly)
    }

    /// Categories ordered by spending, largest first (ties by name)
    pub fn top_categories(&self, limit: usize) -> Vec<(&str, Money)> {
        let mut categories: Vec<(&str, Money)> = self
            .by_category
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
            .collect();
        categories.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        categories.truncate(limit);
        categories
    }

    /// Percentage of total expense spent in `category`
    pub fn category_share(&self, category: &str) -> f64 {
        if self.total_expense.is_zero() {
            return 0.0;
        }
        let spent = self.by_category.get(category).copied().unwrap_or_default();
        spent.cents() as f64 / self.total_expense.cents() as f64 * 100.0
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Financial Summary\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Income:   {:>14}\n",
            self.total_income.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Expenses: {:>14}\n",
            self.total_expense.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Balance:  {:>14}\n",
            self.balance.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Forecast: {:>14}  (next month)\n",
            self.forecast().format_with_symbol(symbol)
        ));

        if !self.by_category.is_empty() {
            output.push_str(&format!("\n{:<30} {:>14} {:>7}\n", "Category", "Spent", "%"));
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for (name, amount) in self.top_categories(usize::MAX) {
                let label = if name.is_empty() { "(uncategorized)" } else { name };
                output.push_str(&format!(
                    "{:<30} {:>14} {:>6.1}%\n",
                    label,
                    amount.format_with_symbol(symbol),
                    self.category_share(name)
                ));
            }
        }

        if !self.monthly.is_empty() {
            output.push_str(&format!(
                "\n{:<10} {:>14} {:>14} {:>14}\n",
                "Month", "Income", "Expenses", "Net"
            ));
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for bucket in &self.monthly {
                output.push_str(&format!(
                    "{:<10} {:>14} {:>14} {:>14}\n",
                    bucket.year_month.short_label(),
                    bucket.income_total.format_with_symbol(symbol),
                    bucket.expense_total.format_with_symbol(symbol),
                    bucket.net().format_with_symbol(symbol)
                ));
            }
        }

        if self.undated_count > 0 {
            output.push_str(&format!(
                "\n{} movement(s) with an unreadable date are left out of the monthly view.\n",
                self.undated_count
            ));
        }

        output
    }

    /// Write the monthly series as CSV
    pub fn export_monthly_csv<W: Write>(&self, writer: W) -> FinanceResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Month", "Income", "Expenses", "Net"])
            .map_err(|e| FinanceError::Export(e.to_string()))?;

        for bucket in &self.monthly {
            csv.write_record([
                bucket.year_month.to_string(),
                bucket.income_total.to_decimal_string(),
                bucket.expense_total.to_decimal_string(),
                bucket.net().to_decimal_string(),
            ])
            .map_err(|e| FinanceError::Export(e.to_string()))?;
        }

        csv.flush()
            .map_err(|e| FinanceError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryDate, MemberId};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    fn worked_example() -> Vec<Movement> {
        vec![
            Movement::income(cents(100_000), date(2025, 1, 5)),
            Movement::expense(cents(30_000), date(2025, 1, 20), "food"),
            Movement::income(cents(120_000), date(2025, 2, 5)),
            Movement::expense(cents(50_000), date(2025, 2, 18), "food"),
        ]
    }

    /// Deterministic permutations without pulling in a RNG
    fn rotations_and_reversals(items: &[Movement]) -> Vec<Vec<Movement>> {
        let mut out = Vec::new();
        for shift in 0..items.len() {
            let mut rotated = items.to_vec();
            rotated.rotate_left(shift);
            out.push(rotated.clone());
            rotated.reverse();
            out.push(rotated);
        }
        out
    }

    #[test]
    fn test_worked_example() {
        let summary = aggregate(&worked_example(), MemberFilter::All);

        assert_eq!(summary.total_income, cents(220_000));
        assert_eq!(summary.total_expense, cents(80_000));
        assert_eq!(summary.balance, cents(140_000));
        assert_eq!(summary.by_category.len(), 1);
        assert_eq!(summary.by_category["food"], cents(80_000));
        assert_eq!(
            summary.monthly,
            vec![
                MonthBucket {
                    year_month: ym(2025, 1),
                    income_total: cents(100_000),
                    expense_total: cents(30_000),
                },
                MonthBucket {
                    year_month: ym(2025, 2),
                    income_total: cents(120_000),
                    expense_total: cents(50_000),
                },
            ]
        );
        assert_eq!(summary.average_net(), cents(70_000));
        assert_eq!(summary.forecast(), cents(210_000));
    }

    #[test]
    fn test_order_independence() {
        let mut movements = worked_example();
        movements.push(Movement::expense(cents(1_234), date(2024, 12, 31), "rent"));
        movements.push(Movement::expense(cents(99), EntryDate::new("??"), ""));
        movements.push(Movement::income(cents(7), date(2025, 2, 1)));

        let expected = aggregate(&movements, MemberFilter::All);
        for permutation in rotations_and_reversals(&movements) {
            assert_eq!(aggregate(&permutation, MemberFilter::All), expected);
        }
    }

    #[test]
    fn test_balance_identity() {
        let movements = vec![
            Movement::expense(cents(500), date(2025, 3, 1), "fun"),
            Movement::expense(cents(250), EntryDate::new(""), "fun"),
            Movement::income(cents(100), date(2025, 3, 2)),
        ];
        let summary = aggregate(&movements, MemberFilter::All);
        assert_eq!(summary.total_income - summary.total_expense, summary.balance);
        assert_eq!(summary.balance, cents(-650));
    }

    #[test]
    fn test_member_filter() {
        let ana = MemberId::new();
        let bruno = MemberId::new();
        let movements = vec![
            Movement::income(cents(1_000), date(2025, 1, 1)).for_member(ana),
            Movement::expense(cents(300), date(2025, 1, 2), "food").for_member(bruno),
            Movement::expense(cents(200), date(2025, 1, 3), "food"),
        ];

        let all = aggregate(&movements, MemberFilter::All);
        assert_eq!(all.movement_count, 3);
        assert_eq!(all.total_expense, cents(500));

        let only_bruno = aggregate(&movements, MemberFilter::Member(bruno));
        assert_eq!(only_bruno.movement_count, 1);
        assert_eq!(only_bruno.total_income, Money::zero());
        assert_eq!(only_bruno.total_expense, cents(300));

        let unknown = aggregate(&movements, MemberFilter::Member(MemberId::new()));
        assert_eq!(unknown.movement_count, 0);
        assert_eq!(unknown.balance, Money::zero());
        assert!(unknown.by_category.is_empty());
        assert!(unknown.monthly.is_empty());
    }

    #[test]
    fn test_uncategorized_expenses_share_one_key() {
        let mut blank = Movement::expense(cents(100), date(2025, 1, 1), "");
        blank.category = "   ".into();
        let movements = vec![
            blank,
            Movement::expense(cents(50), date(2025, 1, 2), ""),
            Movement::income(cents(999), date(2025, 1, 3)),
        ];
        let summary = aggregate(&movements, MemberFilter::All);
        assert_eq!(summary.by_category.len(), 1);
        assert_eq!(summary.by_category[""], cents(150));
    }

    #[test]
    fn test_income_never_enters_category_breakdown() {
        let mut salary = Movement::income(cents(5_000), date(2025, 1, 1));
        salary.category = "salary".into();
        let summary = aggregate(&[salary], MemberFilter::All);
        assert!(summary.by_category.is_empty());
    }

    #[test]
    fn test_malformed_dates_count_in_totals_only() {
        let movements = vec![
            Movement::expense(cents(400), EntryDate::new("31/31/2025"), "car"),
            Movement::income(cents(1_000), EntryDate::new("")),
        ];
        let summary = aggregate(&movements, MemberFilter::All);
        assert_eq!(summary.total_expense, cents(400));
        assert_eq!(summary.total_income, cents(1_000));
        assert_eq!(summary.by_category["car"], cents(400));
        assert!(summary.monthly.is_empty());
        assert_eq!(summary.undated_count, 2);
        // No months means the forecast is the balance itself
        assert_eq!(summary.forecast(), summary.balance);
    }

    #[test]
    fn test_keeps_only_most_recent_six_months() {
        let movements: Vec<Movement> = (1..=9)
            .map(|month| Movement::income(cents(month as i64 * 100), date(2024, month, 15)))
            .collect();
        let summary = aggregate(&movements, MemberFilter::All);

        let months: Vec<YearMonth> = summary.monthly.iter().map(|b| b.year_month).collect();
        assert_eq!(months, (4..=9).map(|m| ym(2024, m)).collect::<Vec<_>>());
        // Totals still cover every movement
        assert_eq!(summary.total_income, cents(4_500));
    }

    #[test]
    fn test_window_spans_year_boundary() {
        let movements = vec![
            Movement::income(cents(1), date(2025, 1, 1)),
            Movement::income(cents(1), date(2024, 12, 1)),
            Movement::income(cents(1), date(2024, 11, 1)),
        ];
        let summary = aggregate_with_window(&movements, MemberFilter::All, 2);
        let months: Vec<YearMonth> = summary.monthly.iter().map(|b| b.year_month).collect();
        assert_eq!(months, vec![ym(2024, 12), ym(2025, 1)]);
    }

    #[test]
    fn test_empty_input() {
        let summary = aggregate(&[], MemberFilter::All);
        assert_eq!(summary.balance, Money::zero());
        assert!(summary.monthly.is_empty());
        assert_eq!(summary.forecast(), Money::zero());
    }

    #[test]
    fn test_top_categories() {
        let movements = vec![
            Movement::expense(cents(100), date(2025, 1, 1), "b"),
            Movement::expense(cents(300), date(2025, 1, 1), "a"),
            Movement::expense(cents(100), date(2025, 1, 1), "a-tie"),
        ];
        let summary = aggregate(&movements, MemberFilter::All);
        let top = summary.top_categories(2);
        assert_eq!(top, vec![("a", cents(300)), ("a-tie", cents(100))]);
        assert!((summary.category_share("a") - 60.0).abs() < 1e-9);
        assert_eq!(summary.category_share("missing"), 0.0);
    }

    #[test]
    fn test_format_terminal() {
        let summary = aggregate(&worked_example(), MemberFilter::All);
        let text = summary.format_terminal("$");
        assert!(text.contains("$2200.00"));
        assert!(text.contains("$1400.00"));
        assert!(text.contains("$2100.00"));
        assert!(text.contains("food"));
        assert!(text.contains("02/2025"));
    }

    #[test]
    fn test_export_monthly_csv() {
        let summary = aggregate(&worked_example(), MemberFilter::All);
        let mut buffer = Vec::new();
        summary.export_monthly_csv(&mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Month,Income,Expenses,Net");
        assert_eq!(lines[1], "2025-01,1000.00,300.00,700.00");
        assert_eq!(lines[2], "2025-02,1200.00,500.00,700.00");
    }

    #[test]
    fn test_largest_accepted_amounts_do_not_overflow() {
        let movements: Vec<_> = (0..1_000)
            .map(|i| {
                let day = date(2025, 1 + (i % 12) as u32, 1);
                if i % 2 == 0 {
                    Movement::income(Money::MAX, day)
                } else {
                    Movement::expense(Money::MAX, day, "rent")
                }
            })
            .collect();

        let summary = aggregate(&movements, MemberFilter::All);
        assert_eq!(summary.total_income.cents(), Money::MAX.cents() * 500);
        assert_eq!(summary.total_expense, summary.total_income);
        assert_eq!(summary.balance, Money::zero());
        assert_eq!(summary.forecast(), Money::zero());
    }
}
