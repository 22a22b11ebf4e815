//! Report assembly: one entry point per report operation over a portfolio
//! snapshot. Every call recomputes from the ledger; nothing is cached.

use crate::analytics::{self, CashFlowReport, FinancialReport, Month, PropertyPerformance};
use crate::portfolio::{Portfolio, Property};
use crate::tax::{self, BracketCalculation, BracketError, TaxBracket, TaxEstimate, TaxReport};
use crate::tax::report::{MultiYearComparison, YearRangeError};
use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("property not found: {0}")]
    PropertyNotFound(String),
    #[error(transparent)]
    InvalidBrackets(#[from] BracketError),
    #[error(transparent)]
    InvalidYearRange(#[from] YearRangeError),
}

fn lookup<'a>(portfolio: &'a Portfolio, property_id: &str) -> Result<&'a Property, ReportError> {
    portfolio
        .property(property_id)
        .ok_or_else(|| ReportError::PropertyNotFound(property_id.to_string()))
}

/// Income/expense summary for a property over an optional date range
pub fn financial_report(
    portfolio: &Portfolio,
    property_id: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<FinancialReport, ReportError> {
    lookup(portfolio, property_id)?;
    let transactions = portfolio.transactions_for(property_id);
    Ok(analytics::financial_report(
        &transactions,
        &portfolio.categories,
        start,
        end,
    ))
}

/// Cash-flow statement for a property and calendar month
pub fn cash_flow_report(
    portfolio: &Portfolio,
    property_id: &str,
    month: Month,
) -> Result<CashFlowReport, ReportError> {
    let property = lookup(portfolio, property_id)?;
    let transactions = portfolio.transactions_for(property_id);
    Ok(analytics::cash_flow_report(
        property,
        &transactions,
        &portfolio.categories,
        month,
    ))
}

/// Lifetime performance snapshot for one property
pub fn property_performance(
    portfolio: &Portfolio,
    property_id: &str,
    as_of: NaiveDate,
) -> Result<PropertyPerformance, ReportError> {
    let property = lookup(portfolio, property_id)?;
    let transactions = portfolio.transactions_for(property_id);
    Ok(analytics::property_performance(property, &transactions, as_of))
}

/// Performance snapshots for every property in the snapshot. Each
/// property's computation is independent; output order matches the
/// registry order.
pub fn portfolio_performance(portfolio: &Portfolio, as_of: NaiveDate) -> Vec<PropertyPerformance> {
    portfolio
        .properties
        .iter()
        .map(|property| {
            let transactions = portfolio.transactions_for(&property.id);
            analytics::property_performance(property, &transactions, as_of)
        })
        .collect()
}

/// Annual tax report for a property
pub fn tax_report(
    portfolio: &Portfolio,
    property_id: &str,
    year: i32,
) -> Result<TaxReport, ReportError> {
    lookup(portfolio, property_id)?;
    let transactions = portfolio.transactions_for(property_id);
    Ok(tax::tax_report(&transactions, &portfolio.categories, year))
}

/// Tax reports for each year in the range plus year-over-year deltas
pub fn multi_year_comparison(
    portfolio: &Portfolio,
    property_id: &str,
    start_year: i32,
    end_year: i32,
) -> Result<MultiYearComparison, ReportError> {
    lookup(portfolio, property_id)?;
    let transactions = portfolio.transactions_for(property_id);
    Ok(tax::multi_year_comparison(
        &transactions,
        &portfolio.categories,
        start_year,
        end_year,
    )?)
}

/// Flat-rate what-if estimation over the annual tax report
pub fn estimate_taxes(
    portfolio: &Portfolio,
    property_id: &str,
    year: i32,
    tax_rate: Decimal,
    additional_income: Decimal,
    additional_deductions: Decimal,
) -> Result<TaxEstimate, ReportError> {
    let report = tax_report(portfolio, property_id, year)?;
    Ok(tax::estimate_taxes(
        &report,
        tax_rate,
        additional_income,
        additional_deductions,
    ))
}

/// Progressive bracket calculation over the annual tax report. The
/// adjusted taxable income is deliberately not clamped at zero.
pub fn calculate_with_brackets(
    portfolio: &Portfolio,
    property_id: &str,
    year: i32,
    brackets: &[TaxBracket],
    additional_income: Decimal,
    additional_deductions: Decimal,
) -> Result<BracketCalculation, ReportError> {
    let report = tax_report(portfolio, property_id, year)?;
    let taxable_income = report.taxable_income + additional_income - additional_deductions;
    Ok(tax::calculate_with_brackets(brackets, taxable_income)?)
}
