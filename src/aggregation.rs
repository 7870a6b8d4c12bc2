//! Date range filtering and per-category totals for the dashboard.

use serde::Serialize;
use time::{
    Date, Month, OffsetDateTime, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::{category::category_color, draft::ValidationError, expense::Expense};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse a `YYYY-MM-DD` string as a calendar date.
///
/// # Errors
/// Returns [ValidationError::InvalidDate] if `text` is not a real date in
/// that form, e.g. "2024-02-30" or "05/01/2024".
pub fn parse_date(text: &str) -> Result<Date, ValidationError> {
    Date::parse(text.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(text.to_owned()))
}

/// Parse the date of a stored expense.
///
/// Stored dates are not validated when saved, so besides `YYYY-MM-DD` this
/// also accepts months and days without zero padding, e.g. "2024-1-5".
fn parse_stored_date(text: &str) -> Option<Date> {
    if let Ok(date) = parse_date(text) {
        return Some(date);
    }

    let mut parts = text.trim().split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };

    let year = year.parse::<i32>().ok()?;
    let month = Month::try_from(month.parse::<u8>().ok()?).ok()?;
    let day = day.parse::<u8>().ok()?;

    Date::from_calendar_date(year, month, day).ok()
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> String {
    // The format only has numeric components, so formatting cannot fail.
    date.format(DATE_FORMAT).unwrap_or_default()
}

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// The first day in the range.
    pub start: Date,
    /// The last day in the range.
    pub end: Date,
}

impl DateRange {
    /// Parse the range bounds from `YYYY-MM-DD` strings.
    ///
    /// # Errors
    /// Returns [ValidationError::InvalidDate] naming the first bound that
    /// could not be parsed.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            start: parse_date(start)?,
            end: parse_date(end)?,
        })
    }

    /// The range from the first day of `today`'s month up to `today`.
    pub fn month_to_date(today: Date) -> Self {
        Self {
            start: today.replace_day(1).unwrap_or(today),
            end: today,
        }
    }

    /// The month to date range for the local date, or the UTC date when the
    /// local offset cannot be determined.
    pub fn current_month_to_date() -> Self {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());

        Self::month_to_date(now.date())
    }

    /// Whether `date` lies in the range, bounds included.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The summed amount for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category name.
    pub category: String,
    /// The sum of the amounts of the category's expenses.
    pub value: f64,
    /// The hex color to draw the category with.
    pub color: &'static str,
}

/// The expenses in a date range, with their total and per-category breakdown.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    /// The expenses in the range, in their original order.
    pub filtered: Vec<Expense>,
    /// The sum of the amounts of `filtered`.
    pub total: f64,
    /// Per-category totals, in the order each category first appears.
    pub breakdown: Vec<CategoryTotal>,
}

/// Filter `expenses` to the inclusive range `start` to `end` and sum them,
/// overall and per category.
///
/// Expenses whose own date cannot be parsed are left out.
///
/// # Errors
/// Returns [ValidationError::InvalidDate] if either bound is not a valid
/// `YYYY-MM-DD` date.
pub fn aggregate(expenses: &[Expense], start: &str, end: &str) -> Result<Summary, ValidationError> {
    let range = DateRange::parse(start, end)?;

    Ok(aggregate_range(expenses, range))
}

/// Same as [aggregate] with an already parsed range.
pub fn aggregate_range(expenses: &[Expense], range: DateRange) -> Summary {
    let filtered = filter_by_range(expenses, range);
    let total = filtered.iter().fold(0.0, |sum, expense| sum + expense.amount);
    let breakdown = group_by_category(&filtered);

    Summary {
        filtered,
        total,
        breakdown,
    }
}

fn filter_by_range(expenses: &[Expense], range: DateRange) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| match parse_stored_date(&expense.date) {
            Some(date) => range.contains(date),
            None => {
                tracing::warn!(
                    "Skipping expense {} with unparseable date {:?}",
                    expense.id,
                    expense.date
                );
                false
            }
        })
        .cloned()
        .collect()
}

/// Sums amounts per category, keeping categories in first-seen order.
fn group_by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for expense in expenses {
        match totals
            .iter_mut()
            .find(|total| total.category == expense.category)
        {
            Some(total) => total.value += expense.amount,
            None => totals.push(CategoryTotal {
                category: expense.category.clone(),
                value: expense.amount,
                color: category_color(&expense.category),
            }),
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        draft::{ExpenseDraft, ValidationError, validate},
        expense::{Expense, ExpenseId},
    };

    use super::{
        CategoryTotal, DateRange, aggregate, format_date, parse_date, parse_stored_date,
    };

    fn create_test_expense(id: &str, amount: f64, category: &str, date: &str) -> Expense {
        Expense {
            id: ExpenseId::new(id),
            name: format!("expense {id}"),
            amount,
            category: category.to_owned(),
            date: date.to_owned(),
        }
    }

    fn sample_expenses() -> Vec<Expense> {
        vec![
            create_test_expense("1", 3.5, "Food", "2024-01-05"),
            create_test_expense("2", 120.0, "Travel", "2024-01-31"),
            create_test_expense("3", 45.0, "Bills", "2023-12-31"),
            create_test_expense("4", 12.25, "Food", "2024-01-01"),
            create_test_expense("5", 9.99, "Groceries", "2024-01-15"),
            create_test_expense("6", 80.0, "Entertainment", "2024-02-01"),
        ]
    }

    #[test]
    fn filters_inclusive_of_both_bounds() {
        let summary = aggregate(&sample_expenses(), "2024-01-01", "2024-01-31").unwrap();

        let ids: Vec<&str> = summary.filtered.iter().map(|expense| expense.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "4", "5"]);
    }

    #[test]
    fn filtered_set_matches_date_predicate() {
        let expenses = sample_expenses();
        let start = date!(2024 - 01 - 02);
        let end = date!(2024 - 01 - 31);

        let summary = aggregate(&expenses, "2024-01-02", "2024-01-31").unwrap();

        let want: Vec<Expense> = expenses
            .into_iter()
            .filter(|expense| {
                let date = parse_date(&expense.date).unwrap();
                start <= date && date <= end
            })
            .collect();
        assert_eq!(summary.filtered, want);
    }

    #[test]
    fn total_is_sum_of_filtered_amounts() {
        let summary = aggregate(&sample_expenses(), "2024-01-01", "2024-01-31").unwrap();

        let want: f64 = summary.filtered.iter().map(|e| e.amount).sum();
        assert_eq!(summary.total, want);
    }

    #[test]
    fn breakdown_accounts_for_total() {
        let summary = aggregate(&sample_expenses(), "2023-01-01", "2024-12-31").unwrap();

        let breakdown_total: f64 = summary.breakdown.iter().map(|c| c.value).sum();
        assert!((breakdown_total - summary.total).abs() < 1e-9);
    }

    #[test]
    fn breakdown_follows_first_seen_order_with_colors() {
        let summary = aggregate(&sample_expenses(), "2024-01-01", "2024-01-31").unwrap();

        assert_eq!(
            summary.breakdown,
            vec![
                CategoryTotal {
                    category: "Food".to_owned(),
                    value: 15.75,
                    color: "#33FF57",
                },
                CategoryTotal {
                    category: "Travel".to_owned(),
                    value: 120.0,
                    color: "#3357FF",
                },
                CategoryTotal {
                    category: "Groceries".to_owned(),
                    value: 9.99,
                    color: "#808080",
                },
            ]
        );
    }

    #[test]
    fn empty_input_gives_empty_summary() {
        let summary = aggregate(&[], "2024-01-01", "2024-01-31").unwrap();

        assert!(summary.filtered.is_empty());
        assert_eq!(summary.total, 0.0);
        assert!(summary.breakdown.is_empty());
    }

    #[test]
    fn compares_dates_not_strings() {
        // Lexicographically "2024-1-5" > "2024-01-31", so a string comparison would drop it.
        let expenses = vec![
            create_test_expense("1", 1.0, "Food", "2024-1-5"),
            create_test_expense("2", 2.0, "Food", "2024-01-09"),
            create_test_expense("3", 4.0, "Food", "2024-10-1"),
        ];

        let summary = aggregate(&expenses, "2024-01-01", "2024-01-31").unwrap();

        let ids: Vec<&str> = summary.filtered.iter().map(|expense| expense.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
        assert_eq!(summary.total, 3.0);
    }

    #[test]
    fn saved_expense_with_unpadded_date_is_counted() {
        let draft = ExpenseDraft::new("Coffee", "3.5", "Food", "2024-1-5");
        let expense = validate(&draft).unwrap();

        let summary = aggregate(&[expense], "2024-01-01", "2024-01-31").unwrap();

        assert_eq!(summary.total, 3.5);
        assert_eq!(summary.breakdown.len(), 1);
    }

    #[test]
    fn stored_dates_parse_with_or_without_padding() {
        assert_eq!(parse_stored_date("2024-01-05"), Some(date!(2024 - 01 - 05)));
        assert_eq!(parse_stored_date("2024-1-5"), Some(date!(2024 - 01 - 05)));
        assert_eq!(parse_stored_date(" 2024-01-5 "), Some(date!(2024 - 01 - 05)));
        assert_eq!(parse_stored_date("2024-13-01"), None);
        assert_eq!(parse_stored_date("2024-01-05-01"), None);
        assert_eq!(parse_stored_date("yesterday"), None);
    }

    #[test]
    fn rejects_malformed_bounds() {
        let expenses = sample_expenses();

        assert_eq!(
            aggregate(&expenses, "01/01/2024", "2024-01-31"),
            Err(ValidationError::InvalidDate("01/01/2024".to_owned()))
        );
        assert_eq!(
            aggregate(&expenses, "2024-01-01", "2024-02-30"),
            Err(ValidationError::InvalidDate("2024-02-30".to_owned()))
        );
    }

    #[test]
    fn reversed_range_is_empty() {
        let summary = aggregate(&sample_expenses(), "2024-01-31", "2024-01-01").unwrap();

        assert!(summary.filtered.is_empty());
        assert_eq!(summary.total, 0.0);
    }

    #[test]
    fn aggregate_is_deterministic() {
        let expenses = sample_expenses();

        let first = aggregate(&expenses, "2024-01-01", "2024-01-31").unwrap();
        let second = aggregate(&expenses, "2024-01-01", "2024-01-31").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn month_to_date_starts_on_first() {
        let range = DateRange::month_to_date(date!(2024 - 03 - 17));

        assert_eq!(range.start, date!(2024 - 03 - 01));
        assert_eq!(range.end, date!(2024 - 03 - 17));
    }

    #[test]
    fn format_date_is_zero_padded() {
        assert_eq!(format_date(date!(2024 - 01 - 05)), "2024-01-05");
    }
}
