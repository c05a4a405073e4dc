use crate::core::matcher::DateMonthMatcher;
use crate::core::{
    MonthlySummary, PeriodProvider, Result, Transaction, TransactionKind, TransactionSource,
};
use crate::domain::model::round_cents;
use crate::utils::error::MatchError;
use crate::utils::validation::validate_range;
use chrono::{Datelike, Local, NaiveDate};

/// Layout the app stores transaction dates in.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Day passed to the matcher when filtering a whole month.
const FIRST_DAY: i32 = 1;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub struct MonthlyHistory<S: TransactionSource> {
    source: S,
}

impl<S: TransactionSource> MonthlyHistory<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Loads every transaction and summarizes the month `period` points at.
    pub fn month<P: PeriodProvider>(&self, period: &P) -> Result<MonthlySummary> {
        let (start, end) = month_range(period.month(), period.year())?;
        tracing::info!("Summarizing transactions from {} to {}", start, end);

        let transactions = self.source.load()?;
        tracing::debug!("Loaded {} transactions", transactions.len());

        let summary = summarize(&transactions, period.month(), period.year());
        tracing::info!(
            "Matched {} transactions (income {:.2}, expense {:.2})",
            summary.transactions.len(),
            summary.total_income,
            summary.total_expense
        );
        Ok(summary)
    }

    /// Summarizes the transactions recorded on exactly `date`.
    pub fn day(&self, date: &str) -> Result<MonthlySummary> {
        let transactions = self.source.load()?;
        Ok(summarize_day(&transactions, date))
    }
}

/// Keeps transactions dated in `month` (zero-based) of `year` and totals them.
/// Entries with unparseable dates are skipped.
pub fn summarize(transactions: &[Transaction], month: i32, year: i32) -> MonthlySummary {
    let matcher = DateMonthMatcher::new(FIRST_DAY, month, year);
    let mut summary = MonthlySummary::default();

    for transaction in transactions {
        match matcher.try_matches(&transaction.date) {
            Ok(true) => accumulate(&mut summary, transaction),
            Ok(false) => {}
            Err(e) => {
                tracing::debug!(
                    "Skipping transaction {:?}: {}",
                    transaction.id.as_deref().unwrap_or("Unknown"),
                    e
                );
            }
        }
    }

    summary
}

/// Transactions recorded on exactly `date`. Only `Income` and `Expense`
/// kinds are totalled, without rounding; other kinds are listed only.
pub fn summarize_day(transactions: &[Transaction], date: &str) -> MonthlySummary {
    let mut summary = MonthlySummary::default();
    for transaction in transactions.iter().filter(|t| t.date == date) {
        match transaction.kind {
            TransactionKind::Income => summary.total_income += transaction.amount,
            TransactionKind::Expense => summary.total_expense += transaction.amount,
            TransactionKind::Other(_) => {}
        }
        summary.transactions.push(transaction.clone());
    }
    summary
}

// Running totals are rounded to cents after every addition.
fn accumulate(summary: &mut MonthlySummary, transaction: &Transaction) {
    if transaction.kind.is_income() {
        summary.total_income = round_cents(summary.total_income + transaction.amount);
    } else {
        summary.total_expense = round_cents(summary.total_expense + transaction.amount);
    }
    summary.transactions.push(transaction.clone());
}

/// First and last day of `month` (zero-based) in `year`, as `dd/MM/yyyy`.
pub fn month_range(month: i32, year: i32) -> Result<(String, String)> {
    validate_range("month", month, 0, 11)?;

    let invalid_year = || MatchError::InvalidConfigValueError {
        field: "year".to_string(),
        value: year.to_string(),
        reason: "Year is outside the supported calendar range".to_string(),
    };

    let month_number = month as u32 + 1;
    let start = NaiveDate::from_ymd_opt(year, month_number, 1).ok_or_else(invalid_year)?;
    let next_month = if month_number == 12 {
        year.checked_add(1)
            .and_then(|next_year| NaiveDate::from_ymd_opt(next_year, 1, 1))
    } else {
        NaiveDate::from_ymd_opt(year, month_number + 1, 1)
    };
    let end = next_month
        .and_then(|date| date.pred_opt())
        .ok_or_else(invalid_year)?;

    Ok((format_date(start), format_date(end)))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's date in the stored layout.
pub fn today() -> String {
    format_date(Local::now().date_naive())
}

/// The current local month (zero-based) and year.
pub fn current_period() -> (i32, i32) {
    let now = Local::now().date_naive();
    (now.month0() as i32, now.year())
}

/// English month name followed by the year, e.g. `June 2023`.
pub fn month_label(month: i32, year: i32) -> Result<String> {
    validate_range("month", month, 0, 11)?;
    Ok(format!("{} {}", MONTH_NAMES[month as usize], year))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: &str, kind: &str, amount: f64, date: &str) -> Transaction {
        Transaction {
            id: Some(id.to_string()),
            kind: TransactionKind::from(kind),
            title: format!("Title {}", id),
            category: "General".to_string(),
            amount,
            date: date.to_string(),
        }
    }

    struct Period(i32, i32);

    impl PeriodProvider for Period {
        fn month(&self) -> i32 {
            self.0
        }

        fn year(&self) -> i32 {
            self.1
        }
    }

    #[test]
    fn test_summarize_filters_and_totals() {
        let transactions = vec![
            tx("1", "Income", 1000.0, "01/06/2023"),
            tx("2", "Expense", 25.5, "15/06/2023"),
            tx("3", "Expense", 10.25, "30/06/2023"),
            tx("4", "Expense", 99.0, "01/07/2023"),
            tx("5", "Income", 50.0, "15/06/2022"),
        ];

        let summary = summarize(&transactions, 5, 2023);
        let ids: Vec<_> = summary
            .transactions
            .iter()
            .filter_map(|t| t.id.as_deref())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(summary.total_income, 1000.0);
        assert_eq!(summary.total_expense, 35.75);
        assert_eq!(summary.balance(), 964.25);
    }

    #[test]
    fn test_non_income_kinds_count_as_expense() {
        let transactions = vec![
            tx("1", "Unknown", 5.0, "02/03/2024"),
            tx("2", "Transfer", 7.5, "03/03/2024"),
        ];
        let summary = summarize(&transactions, 2, 2024);
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expense, 12.5);
    }

    #[test]
    fn test_running_total_rounds_to_cents() {
        let transactions = vec![
            tx("1", "Expense", 0.1, "01/01/2024"),
            tx("2", "Expense", 0.2, "02/01/2024"),
        ];
        assert_eq!(summarize(&transactions, 0, 2024).total_expense, 0.3);
    }

    #[test]
    fn test_malformed_dates_are_skipped() {
        let transactions = vec![
            tx("1", "Expense", 5.0, ""),
            tx("2", "Expense", 5.0, "abc/6/2023"),
            tx("3", "Expense", 5.0, "15/6"),
            tx("4", "Expense", 5.0, "15/6/2023"),
        ];
        let summary = summarize(&transactions, 5, 2023);
        assert_eq!(summary.transactions.len(), 1);
        assert_eq!(summary.total_expense, 5.0);
    }

    #[test]
    fn test_summarize_day_uses_exact_date() {
        let transactions = vec![
            tx("1", "Income", 10.0, "05/05/2024"),
            tx("2", "Expense", 4.0, "05/05/2024"),
            tx("3", "Expense", 4.0, "5/5/2024"),
        ];
        let summary = summarize_day(&transactions, "05/05/2024");
        assert_eq!(summary.transactions.len(), 2);
        assert_eq!(summary.total_income, 10.0);
        assert_eq!(summary.total_expense, 4.0);
    }

    #[test]
    fn test_summarize_day_totals_only_income_and_expense() {
        let transactions = vec![
            tx("1", "Expense", 4.0, "19/10/2026"),
            tx("2", "Transfer", 100.0, "19/10/2026"),
            tx("3", "Income", 1.0, "19/10/2026"),
        ];
        let summary = summarize_day(&transactions, "19/10/2026");
        assert_eq!(summary.transactions.len(), 3);
        assert_eq!(summary.total_expense, 4.0);
        assert_eq!(summary.total_income, 1.0);
    }

    #[test]
    fn test_summarize_day_does_not_round() {
        let transactions = vec![
            tx("1", "Expense", 0.001, "01/01/2024"),
            tx("2", "Expense", 0.001, "01/01/2024"),
        ];
        assert_eq!(summarize_day(&transactions, "01/01/2024").total_expense, 0.002);
        assert_eq!(summarize(&transactions, 0, 2024).total_expense, 0.0);
    }

    #[test]
    fn test_month_range() {
        assert_eq!(
            month_range(1, 2024).unwrap(),
            ("01/02/2024".to_string(), "29/02/2024".to_string())
        );
        assert_eq!(
            month_range(1, 2023).unwrap(),
            ("01/02/2023".to_string(), "28/02/2023".to_string())
        );
        assert_eq!(
            month_range(11, 2023).unwrap(),
            ("01/12/2023".to_string(), "31/12/2023".to_string())
        );
        assert!(month_range(12, 2023).is_err());
        assert!(month_range(-1, 2023).is_err());
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(5, 2023).unwrap(), "June 2023");
        assert_eq!(month_label(0, 1999).unwrap(), "January 1999");
        assert!(month_label(12, 2023).is_err());
    }

    #[test]
    fn test_today_round_trips_through_matcher() {
        let (month, year) = current_period();
        assert!(crate::core::matcher::matches(&today(), 1, month, year));
    }

    #[test]
    fn test_history_month_and_day() {
        let source = vec![
            tx("1", "Income", 20.0, "10/10/2026"),
            tx("2", "Expense", 8.0, "11/10/2026"),
        ];
        let history = MonthlyHistory::new(source);

        let summary = history.month(&Period(9, 2026)).unwrap();
        assert_eq!(summary.transactions.len(), 2);

        let day = history.day("11/10/2026").unwrap();
        assert_eq!(day.total_expense, 8.0);
        assert_eq!(day.total_income, 0.0);

        assert!(history.month(&Period(13, 2026)).is_err());
    }
}
