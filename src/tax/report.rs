//! Annual tax reports, flat-rate estimation and multi-year comparisons

use crate::analytics::aggregate::{by_category, ratio_pct, CategorySummary};
use crate::portfolio::{Category, Transaction, TransactionKind};
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

/// Widest year range a comparison may cover
pub const MAX_YEAR_SPAN: i32 = 5;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum YearRangeError {
    #[error("start year {start} is after end year {end}")]
    StartAfterEnd { start: i32, end: i32 },
    #[error("range {start}-{end} exceeds the {MAX_YEAR_SPAN}-year maximum")]
    SpanExceedsMax { start: i32, end: i32 },
}

/// Income, deductible expenses and taxable income for one tax year
#[derive(Debug, Clone, Serialize)]
pub struct TaxReport {
    pub tax_year: i32,
    pub total_income: Decimal,
    pub total_deductible_expenses: Decimal,
    pub taxable_income: Decimal,
    pub income_categories: Vec<CategorySummary>,
    pub expense_categories: Vec<CategorySummary>,
}

/// Build the tax report for one calendar year.
///
/// Only expense transactions flagged tax-deductible reduce taxable income.
pub fn tax_report(transactions: &[Transaction], categories: &[Category], year: i32) -> TaxReport {
    let in_year: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.date.year() == year)
        .collect();
    let income: Vec<&Transaction> = in_year
        .iter()
        .copied()
        .filter(|t| t.kind == TransactionKind::Income)
        .collect();
    let deductible: Vec<&Transaction> = in_year
        .iter()
        .copied()
        .filter(|t| t.kind == TransactionKind::Expense && t.is_tax_deductible)
        .collect();

    let total_income: Decimal = income.iter().map(|t| t.amount).sum();
    let total_deductible: Decimal = deductible.iter().map(|t| t.amount).sum();

    TaxReport {
        tax_year: year,
        total_income: total_income.round_dp(2),
        total_deductible_expenses: total_deductible.round_dp(2),
        taxable_income: (total_income - total_deductible).round_dp(2),
        income_categories: by_category(&income, categories, total_income),
        expense_categories: by_category(&deductible, categories, total_deductible),
    }
}

/// Flat-rate tax estimation with what-if income and deduction adjustments
#[derive(Debug, Clone, Serialize)]
pub struct TaxEstimate {
    pub tax_year: i32,
    pub tax_rate: Decimal,
    pub current_taxable_income: Decimal,
    pub estimated_taxable_income: Decimal,
    pub current_tax_liability: Decimal,
    pub estimated_tax_liability: Decimal,
    pub projected_savings: Decimal,
}

pub fn estimate_taxes(
    report: &TaxReport,
    tax_rate: Decimal,
    additional_income: Decimal,
    additional_deductions: Decimal,
) -> TaxEstimate {
    let current = report.taxable_income;
    let estimated = current + additional_income - additional_deductions;
    let current_liability = current * tax_rate / Decimal::ONE_HUNDRED;
    let estimated_liability = estimated * tax_rate / Decimal::ONE_HUNDRED;
    TaxEstimate {
        tax_year: report.tax_year,
        tax_rate,
        current_taxable_income: current,
        estimated_taxable_income: estimated.round_dp(2),
        current_tax_liability: current_liability.round_dp(2),
        estimated_tax_liability: estimated_liability.round_dp(2),
        projected_savings: (current_liability - estimated_liability).round_dp(2),
    }
}

/// One year's figures with deltas against the previous year
#[derive(Debug, Clone, Serialize)]
pub struct YearlyTaxData {
    pub year: i32,
    pub total_income: Decimal,
    pub total_deductible_expenses: Decimal,
    pub taxable_income: Decimal,
    pub year_over_year_income_change: Decimal,
    pub year_over_year_expense_change: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct MultiYearComparison {
    pub start_year: i32,
    pub end_year: i32,
    pub yearly_data: Vec<YearlyTaxData>,
}

/// Run the annual tax report once per year in the range and compute
/// year-over-year changes. The first year (and any year following a
/// zero-income/zero-expense year) reports a zero delta.
pub fn multi_year_comparison(
    transactions: &[Transaction],
    categories: &[Category],
    start_year: i32,
    end_year: i32,
) -> Result<MultiYearComparison, YearRangeError> {
    if start_year > end_year {
        return Err(YearRangeError::StartAfterEnd {
            start: start_year,
            end: end_year,
        });
    }
    if end_year - start_year > MAX_YEAR_SPAN {
        return Err(YearRangeError::SpanExceedsMax {
            start: start_year,
            end: end_year,
        });
    }

    let mut yearly_data: Vec<YearlyTaxData> = Vec::new();
    let mut previous: Option<TaxReport> = None;
    for year in start_year..=end_year {
        let report = tax_report(transactions, categories, year);
        let (income_change, expense_change) = match &previous {
            Some(prev) => (
                ratio_pct(report.total_income - prev.total_income, prev.total_income),
                ratio_pct(
                    report.total_deductible_expenses - prev.total_deductible_expenses,
                    prev.total_deductible_expenses,
                ),
            ),
            None => (Decimal::ZERO, Decimal::ZERO),
        };
        yearly_data.push(YearlyTaxData {
            year,
            total_income: report.total_income,
            total_deductible_expenses: report.total_deductible_expenses,
            taxable_income: report.taxable_income,
            year_over_year_income_change: income_change,
            year_over_year_expense_change: expense_change,
        });
        previous = Some(report);
    }

    Ok(MultiYearComparison {
        start_year,
        end_year,
        yearly_data,
    })
}
