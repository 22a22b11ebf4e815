//! Investment performance: appreciation, cap rate, cash-on-cash and
//! compound annualized returns

use crate::analytics::aggregate::ratio_pct;
use crate::portfolio::{Property, Transaction, TransactionKind};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::Serialize;

/// Lifetime performance snapshot for a single property
#[derive(Debug, Clone, Serialize)]
pub struct PropertyPerformance {
    pub property_id: String,
    pub property_name: String,
    pub purchase_price: Decimal,
    pub current_value: Decimal,
    pub years_owned: Decimal,
    pub appreciation: Decimal,
    pub appreciation_percentage: Decimal,
    pub annualized_appreciation: Decimal,
    pub total_cash_invested: Decimal,
    pub annual_cash_flow: Decimal,
    pub cash_on_cash_return: Decimal,
    pub cap_rate: Decimal,
    pub total_return: Decimal,
    pub total_return_percentage: Decimal,
    pub annualized_return: Decimal,
    pub expense_ratio: Decimal,
    pub occupancy_rate: Decimal,
}

/// Geometric annualization: the constant annual rate that compounds to
/// `total_pct` over `years`. Zero when the period is empty or the total
/// loss is 100% or worse (the compounding base must stay positive).
fn annualized_pct(total_pct: Decimal, years: Decimal) -> Decimal {
    if years <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let base = Decimal::ONE + total_pct / Decimal::ONE_HUNDRED;
    if base <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match base.checked_powd(Decimal::ONE / years) {
        Some(root) => (root - Decimal::ONE) * Decimal::ONE_HUNDRED,
        None => Decimal::ZERO,
    }
}

/// Compute the lifetime performance of a property as of a given date.
///
/// The date is explicit rather than read from the clock so identical
/// reruns produce identical reports.
pub fn property_performance(
    property: &Property,
    transactions: &[Transaction],
    as_of: chrono::NaiveDate,
) -> PropertyPerformance {
    let days_owned = (as_of - property.acquisition_date).num_days();
    let years_owned = Decimal::from(days_owned.max(0)) / dec!(365.25);

    let sum_kind = |kind: TransactionKind| -> Decimal {
        transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    };
    let total_income = sum_kind(TransactionKind::Income);
    let total_expenses = sum_kind(TransactionKind::Expense);
    let total_invested_extra = sum_kind(TransactionKind::Investment);

    let appreciation = property.current_value - property.acquisition_price;
    let appreciation_pct = ratio_pct(appreciation, property.acquisition_price);
    let total_cash_invested = property.acquisition_price + total_invested_extra;

    // All-time NOI, not the bucketed monthly figure
    let noi = total_income - total_expenses;
    let annual_cash_flow = if years_owned > Decimal::ZERO {
        noi / years_owned
    } else {
        Decimal::ZERO
    };

    let total_return = appreciation + noi;
    let total_return_pct = ratio_pct(total_return, total_cash_invested);

    log::debug!(
        "{}: {} years owned, noi={}, appreciation={}",
        property.id,
        years_owned.round_dp(2),
        noi,
        appreciation
    );

    PropertyPerformance {
        property_id: property.id.clone(),
        property_name: property.name.clone(),
        purchase_price: property.acquisition_price,
        current_value: property.current_value,
        years_owned,
        appreciation: appreciation.round_dp(2),
        appreciation_percentage: appreciation_pct,
        annualized_appreciation: annualized_pct(appreciation_pct, years_owned),
        total_cash_invested: total_cash_invested.round_dp(2),
        annual_cash_flow: annual_cash_flow.round_dp(2),
        cash_on_cash_return: ratio_pct(annual_cash_flow, total_cash_invested),
        cap_rate: ratio_pct(annual_cash_flow, property.current_value),
        total_return: total_return.round_dp(2),
        total_return_percentage: total_return_pct,
        annualized_return: annualized_pct(total_return_pct, years_owned),
        expense_ratio: ratio_pct(total_expenses, total_income),
        occupancy_rate: property.occupancy_rate(),
    }
}
