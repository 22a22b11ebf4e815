//! Transaction aggregation: totals, category breakdowns and monthly rows

use crate::portfolio::{Category, Transaction, TransactionKind};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// A calendar month (year + month number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn from_date(date: NaiveDate) -> Self {
        Month {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse "YYYY-MM" format
    pub fn parse(s: &str) -> Option<Month> {
        let (year, month) = s.split_once('-')?;
        let year = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        if (1..=12).contains(&month) {
            Some(Month { year, month })
        } else {
            None
        }
    }

    /// The preceding calendar month
    pub fn pred(&self) -> Month {
        if self.month == 1 {
            Month {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Month {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Per-category total with its share of the subset total
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub category_id: String,
    pub name: String,
    pub amount: Decimal,
    pub percentage: Decimal,
}

/// Income/expense totals for a single calendar month
#[derive(Debug, Clone, Serialize)]
pub struct MonthlySummary {
    pub month: Month,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net_operating_income: Decimal,
    /// Equal to NOI at this level; financing is only split out in the
    /// cash-flow report
    pub cash_flow: Decimal,
}

/// Income/expense summary for a property over a date range
#[derive(Debug, Clone, Serialize)]
pub struct FinancialReport {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_operating_income: Decimal,
    pub cash_flow: Decimal,
    pub expense_ratio: Decimal,
    pub income_by_category: Vec<CategorySummary>,
    pub expenses_by_category: Vec<CategorySummary>,
    pub monthly_summary: Vec<MonthlySummary>,
}

/// `part / whole * 100`, or zero when the denominator is zero.
///
/// Every ratio in the engine goes through this guard so that reports for
/// brand-new or data-sparse properties come out as zero reports, not errors.
pub(crate) fn ratio_pct(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * Decimal::ONE_HUNDRED
    }
}

fn in_range(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    start.is_none_or(|s| date >= s) && end.is_none_or(|e| date <= e)
}

/// Aggregate a property's transactions into a financial report.
///
/// Only Income and Expense transactions contribute; Investment and Transfer
/// entries are not operating activity.
pub fn financial_report(
    transactions: &[Transaction],
    categories: &[Category],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> FinancialReport {
    let filtered: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| in_range(t.date, start, end))
        .collect();

    let income: Vec<&Transaction> = filtered
        .iter()
        .copied()
        .filter(|t| t.kind == TransactionKind::Income)
        .collect();
    let expenses: Vec<&Transaction> = filtered
        .iter()
        .copied()
        .filter(|t| t.kind == TransactionKind::Expense)
        .collect();

    let total_income: Decimal = income.iter().map(|t| t.amount).sum();
    let total_expenses: Decimal = expenses.iter().map(|t| t.amount).sum();
    let net_operating_income = total_income - total_expenses;

    log::debug!(
        "aggregated {} transactions: income={}, expenses={}",
        filtered.len(),
        total_income,
        total_expenses
    );

    FinancialReport {
        total_income: total_income.round_dp(2),
        total_expenses: total_expenses.round_dp(2),
        net_operating_income: net_operating_income.round_dp(2),
        cash_flow: net_operating_income.round_dp(2),
        expense_ratio: ratio_pct(total_expenses, total_income),
        income_by_category: by_category(&income, categories, total_income),
        expenses_by_category: by_category(&expenses, categories, total_expenses),
        monthly_summary: monthly_summaries(&income, &expenses),
    }
}

/// Group a subset of transactions by category, with each category's share
/// of the subset total. Ordered by amount descending, then name.
pub fn by_category(
    transactions: &[&Transaction],
    categories: &[Category],
    subset_total: Decimal,
) -> Vec<CategorySummary> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for tx in transactions {
        *totals.entry(tx.category_id.as_str()).or_default() += tx.amount;
    }

    let mut summaries: Vec<CategorySummary> = totals
        .into_iter()
        .map(|(category_id, amount)| {
            let name = categories
                .iter()
                .find(|c| c.id == category_id)
                .map_or_else(|| category_id.to_string(), |c| c.name.clone());
            CategorySummary {
                category_id: category_id.to_string(),
                name,
                amount: amount.round_dp(2),
                percentage: ratio_pct(amount, subset_total),
            }
        })
        .collect();

    summaries.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.name.cmp(&b.name)));
    summaries
}

/// One row per calendar month containing at least one transaction,
/// ascending by (year, month).
fn monthly_summaries(income: &[&Transaction], expenses: &[&Transaction]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<Month, (Decimal, Decimal)> = BTreeMap::new();
    for tx in income {
        months.entry(Month::from_date(tx.date)).or_default().0 += tx.amount;
    }
    for tx in expenses {
        months.entry(Month::from_date(tx.date)).or_default().1 += tx.amount;
    }

    months
        .into_iter()
        .map(|(month, (income, expenses))| {
            let noi = income - expenses;
            MonthlySummary {
                month,
                income: income.round_dp(2),
                expenses: expenses.round_dp(2),
                net_operating_income: noi.round_dp(2),
                cash_flow: noi.round_dp(2),
            }
        })
        .collect()
}
