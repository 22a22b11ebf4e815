//! Cash-flow classification: bucketing expenses into canonical line items
//! and building the monthly cash-flow statement

use crate::analytics::aggregate::{ratio_pct, Month, MonthlySummary};
use crate::portfolio::{CashFlowRole, Category, Property, Transaction, TransactionKind};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// Ordered matching keywords for the name heuristic. First match wins, so
/// "Mortgage Interest" lands in Mortgage, never OtherFinancing. The order
/// is a compatibility contract pinned by tests; do not reorder.
const ROLE_KEYWORDS: &[(&[&str], CashFlowRole)] = &[
    (&["vacancy"], CashFlowRole::Vacancy),
    (&["management"], CashFlowRole::Management),
    (&["tax"], CashFlowRole::Tax),
    (&["insurance"], CashFlowRole::Insurance),
    (&["maintenance"], CashFlowRole::Maintenance),
    (&["utilit"], CashFlowRole::Utilities),
    (&["mortgage"], CashFlowRole::Mortgage),
    (&["interest", "loan", "financing"], CashFlowRole::OtherFinancing),
];

impl CashFlowRole {
    /// Classify a category by display name, case-insensitive substring match
    /// in fixed priority order
    pub fn from_name(name: &str) -> CashFlowRole {
        let name = name.to_lowercase();
        for (keywords, role) in ROLE_KEYWORDS {
            if keywords.iter().any(|k| name.contains(k)) {
                return *role;
            }
        }
        CashFlowRole::Other
    }
}

/// Resolve a category to its cash-flow role: the explicit role if set,
/// otherwise the name heuristic. Unknown categories fall in Other.
fn role_of(category: Option<&Category>) -> CashFlowRole {
    match category {
        Some(c) => c
            .cash_flow_role
            .unwrap_or_else(|| CashFlowRole::from_name(&c.name)),
        None => CashFlowRole::Other,
    }
}

/// Income categories named like rent count as rental income; everything
/// else is other income
fn is_rental_income(category: Option<&Category>) -> bool {
    category.is_some_and(|c| c.name.to_lowercase().contains("rent"))
}

/// Cash-flow statement for one calendar month of one property
#[derive(Debug, Clone, Serialize)]
pub struct CashFlowReport {
    pub month: Month,
    pub monthly_rental_income: Decimal,
    pub other_monthly_income: Decimal,
    pub total_monthly_income: Decimal,
    pub vacancy_loss: Decimal,
    pub property_management: Decimal,
    pub property_tax: Decimal,
    pub insurance: Decimal,
    pub maintenance: Decimal,
    pub utilities: Decimal,
    pub other_expenses: Decimal,
    pub total_operating_expenses: Decimal,
    pub net_operating_income: Decimal,
    pub mortgage_payment: Decimal,
    pub other_financing_costs: Decimal,
    pub total_financing_costs: Decimal,
    pub monthly_cash_flow: Decimal,
    pub annual_cash_flow: Decimal,
    pub cash_on_cash_return: Decimal,
    pub cap_rate: Decimal,
    /// Trailing 12-month series ending at `month`, zero-filled
    pub monthly_cash_flows: Vec<MonthlySummary>,
}

/// Build the cash-flow statement for a property and month.
///
/// `transactions` is the property's full ledger; the statement covers the
/// given month and the trailing series covers the 12 months ending there.
pub fn cash_flow_report(
    property: &Property,
    transactions: &[Transaction],
    categories: &[Category],
    month: Month,
) -> CashFlowReport {
    let mut rental_income = Decimal::ZERO;
    let mut other_income = Decimal::ZERO;
    let mut buckets: HashMap<CashFlowRole, Decimal> = HashMap::new();

    for tx in transactions {
        if Month::from_date(tx.date) != month {
            continue;
        }
        match tx.kind {
            TransactionKind::Income => {
                if is_rental_income(find(categories, &tx.category_id)) {
                    rental_income += tx.amount;
                } else {
                    other_income += tx.amount;
                }
            }
            TransactionKind::Expense => {
                let role = role_of(find(categories, &tx.category_id));
                log::debug!("{}: {} -> {:?}", tx.id, tx.amount, role);
                *buckets.entry(role).or_default() += tx.amount;
            }
            TransactionKind::Investment | TransactionKind::Transfer => {}
        }
    }

    let bucket = |role: CashFlowRole| buckets.get(&role).copied().unwrap_or_default();

    let total_income = rental_income + other_income;
    let vacancy_loss = bucket(CashFlowRole::Vacancy);
    let property_management = bucket(CashFlowRole::Management);
    let property_tax = bucket(CashFlowRole::Tax);
    let insurance = bucket(CashFlowRole::Insurance);
    let maintenance = bucket(CashFlowRole::Maintenance);
    let utilities = bucket(CashFlowRole::Utilities);
    let other_expenses = bucket(CashFlowRole::Other);
    let total_operating_expenses = vacancy_loss
        + property_management
        + property_tax
        + insurance
        + maintenance
        + utilities
        + other_expenses;
    let net_operating_income = total_income - total_operating_expenses;
    let mortgage_payment = bucket(CashFlowRole::Mortgage);
    let other_financing_costs = bucket(CashFlowRole::OtherFinancing);
    let total_financing_costs = mortgage_payment + other_financing_costs;
    let monthly_cash_flow = net_operating_income - total_financing_costs;
    let annual_cash_flow = monthly_cash_flow * Decimal::from(12);

    CashFlowReport {
        month,
        monthly_rental_income: rental_income.round_dp(2),
        other_monthly_income: other_income.round_dp(2),
        total_monthly_income: total_income.round_dp(2),
        vacancy_loss: vacancy_loss.round_dp(2),
        property_management: property_management.round_dp(2),
        property_tax: property_tax.round_dp(2),
        insurance: insurance.round_dp(2),
        maintenance: maintenance.round_dp(2),
        utilities: utilities.round_dp(2),
        other_expenses: other_expenses.round_dp(2),
        total_operating_expenses: total_operating_expenses.round_dp(2),
        net_operating_income: net_operating_income.round_dp(2),
        mortgage_payment: mortgage_payment.round_dp(2),
        other_financing_costs: other_financing_costs.round_dp(2),
        total_financing_costs: total_financing_costs.round_dp(2),
        monthly_cash_flow: monthly_cash_flow.round_dp(2),
        annual_cash_flow: annual_cash_flow.round_dp(2),
        cash_on_cash_return: ratio_pct(annual_cash_flow, property.acquisition_price),
        cap_rate: ratio_pct(
            net_operating_income * Decimal::from(12),
            property.current_value,
        ),
        monthly_cash_flows: trailing_months(transactions, month),
    }
}

/// One row per calendar month for the 12 months ending at `last`, with
/// zero rows for months that had no transactions
fn trailing_months(transactions: &[Transaction], last: Month) -> Vec<MonthlySummary> {
    let mut months = Vec::with_capacity(12);
    let mut m = last;
    for _ in 0..12 {
        months.push(m);
        m = m.pred();
    }
    months.reverse();

    let mut totals: HashMap<Month, (Decimal, Decimal)> = HashMap::new();
    for tx in transactions {
        let month = Month::from_date(tx.date);
        match tx.kind {
            TransactionKind::Income => totals.entry(month).or_default().0 += tx.amount,
            TransactionKind::Expense => totals.entry(month).or_default().1 += tx.amount,
            TransactionKind::Investment | TransactionKind::Transfer => {}
        }
    }

    months
        .into_iter()
        .map(|month| {
            let (income, expenses) = totals.get(&month).copied().unwrap_or_default();
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

fn find<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::CategoryKind;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn name_heuristic_fixed_priority() {
        assert_eq!(CashFlowRole::from_name("Vacancy Loss"), CashFlowRole::Vacancy);
        assert_eq!(CashFlowRole::from_name("Property Management"), CashFlowRole::Management);
        assert_eq!(CashFlowRole::from_name("Property Tax"), CashFlowRole::Tax);
        assert_eq!(CashFlowRole::from_name("Landlord Insurance"), CashFlowRole::Insurance);
        assert_eq!(CashFlowRole::from_name("Maintenance & Repairs"), CashFlowRole::Maintenance);
        assert_eq!(CashFlowRole::from_name("Utilities"), CashFlowRole::Utilities);
        assert_eq!(CashFlowRole::from_name("Utility Bills"), CashFlowRole::Utilities);
        assert_eq!(CashFlowRole::from_name("Mortgage Payment"), CashFlowRole::Mortgage);
        assert_eq!(CashFlowRole::from_name("Loan Fees"), CashFlowRole::OtherFinancing);
        assert_eq!(CashFlowRole::from_name("HELOC Interest"), CashFlowRole::OtherFinancing);
        assert_eq!(CashFlowRole::from_name("Refinancing Costs"), CashFlowRole::OtherFinancing);
        assert_eq!(CashFlowRole::from_name("Gardening"), CashFlowRole::Other);
    }

    #[test]
    fn multi_keyword_names_take_first_match() {
        // Ambiguous names resolve by priority order, not best fit.
        assert_eq!(
            CashFlowRole::from_name("Property Tax Insurance"),
            CashFlowRole::Tax
        );
        // Mortgage outranks the interest/loan/financing bucket.
        assert_eq!(
            CashFlowRole::from_name("Mortgage Interest"),
            CashFlowRole::Mortgage
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(CashFlowRole::from_name("PROPERTY TAX"), CashFlowRole::Tax);
        assert_eq!(CashFlowRole::from_name("mortgage"), CashFlowRole::Mortgage);
    }

    fn category(id: &str, name: &str, kind: CategoryKind) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            is_tax_deductible: kind == CategoryKind::Expense,
            cash_flow_role: None,
        }
    }

    fn tx(kind: TransactionKind, category: &str, date: &str, amount: Decimal) -> Transaction {
        Transaction {
            id: format!("{category}-{date}"),
            property_id: "p1".to_string(),
            unit_id: None,
            category_id: category.to_string(),
            kind,
            date: date.parse().unwrap(),
            amount,
            is_tax_deductible: false,
            is_paid: true,
        }
    }

    fn property() -> Property {
        Property {
            id: "p1".to_string(),
            name: "Test Property".to_string(),
            acquisition_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            acquisition_price: dec!(240000),
            current_value: dec!(300000),
            units: vec![],
        }
    }

    fn fixture() -> (Vec<Transaction>, Vec<Category>) {
        let categories = vec![
            category("rent", "Monthly Rent", CategoryKind::Income),
            category("laundry", "Laundry Income", CategoryKind::Income),
            category("mgmt", "Property Management", CategoryKind::Expense),
            category("mortgage", "Mortgage Payment", CategoryKind::Expense),
            category("repairs", "Maintenance", CategoryKind::Expense),
        ];
        let transactions = vec![
            tx(TransactionKind::Income, "rent", "2024-06-01", dec!(2000)),
            tx(TransactionKind::Income, "laundry", "2024-06-15", dec!(100)),
            tx(TransactionKind::Expense, "mgmt", "2024-06-05", dec!(200)),
            tx(TransactionKind::Expense, "repairs", "2024-06-12", dec!(150)),
            tx(TransactionKind::Expense, "mortgage", "2024-06-01", dec!(900)),
            // Outside the report month, only visible in the trailing series
            tx(TransactionKind::Income, "rent", "2024-05-01", dec!(2000)),
        ];
        (transactions, categories)
    }

    #[test]
    fn report_buckets_and_cash_flow() {
        let (transactions, categories) = fixture();
        let report = cash_flow_report(
            &property(),
            &transactions,
            &categories,
            Month { year: 2024, month: 6 },
        );

        assert_eq!(report.monthly_rental_income, dec!(2000));
        assert_eq!(report.other_monthly_income, dec!(100));
        assert_eq!(report.total_monthly_income, dec!(2100));
        assert_eq!(report.property_management, dec!(200));
        assert_eq!(report.maintenance, dec!(150));
        assert_eq!(report.total_operating_expenses, dec!(350));
        assert_eq!(report.net_operating_income, dec!(1750));
        assert_eq!(report.mortgage_payment, dec!(900));
        assert_eq!(report.total_financing_costs, dec!(900));
        assert_eq!(report.monthly_cash_flow, dec!(850));
        assert_eq!(report.annual_cash_flow, dec!(10200));
        // 10200 / 240000 * 100
        assert_eq!(report.cash_on_cash_return, dec!(4.25));
        // 1750 * 12 / 300000 * 100
        assert_eq!(report.cap_rate, dec!(7));
    }

    #[test]
    fn explicit_role_overrides_name_heuristic() {
        let mut categories = vec![category("odd", "Mortgage Club Dues", CategoryKind::Expense)];
        categories[0].cash_flow_role = Some(CashFlowRole::Other);
        let transactions = vec![tx(TransactionKind::Expense, "odd", "2024-06-05", dec!(50))];
        let report = cash_flow_report(
            &property(),
            &transactions,
            &categories,
            Month { year: 2024, month: 6 },
        );
        assert_eq!(report.mortgage_payment, Decimal::ZERO);
        assert_eq!(report.other_expenses, dec!(50));
    }

    #[test]
    fn trailing_series_is_zero_filled_and_ordered() {
        let (transactions, categories) = fixture();
        let report = cash_flow_report(
            &property(),
            &transactions,
            &categories,
            Month { year: 2024, month: 6 },
        );
        assert_eq!(report.monthly_cash_flows.len(), 12);
        assert_eq!(
            report.monthly_cash_flows[0].month,
            Month { year: 2023, month: 7 }
        );
        assert_eq!(
            report.monthly_cash_flows[11].month,
            Month { year: 2024, month: 6 }
        );
        // An empty month is a zero row, not a gap
        assert_eq!(report.monthly_cash_flows[0].income, Decimal::ZERO);
        // May only has the rent payment
        assert_eq!(report.monthly_cash_flows[10].income, dec!(2000));
        assert_eq!(report.monthly_cash_flows[10].expenses, Decimal::ZERO);
    }

    #[test]
    fn zero_value_property_guards_ratios() {
        let (transactions, categories) = fixture();
        let mut p = property();
        p.acquisition_price = Decimal::ZERO;
        p.current_value = Decimal::ZERO;
        let report = cash_flow_report(&p, &transactions, &categories, Month { year: 2024, month: 6 });
        assert_eq!(report.cash_on_cash_return, Decimal::ZERO);
        assert_eq!(report.cap_rate, Decimal::ZERO);
    }
}
