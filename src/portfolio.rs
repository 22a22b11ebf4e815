use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Input root for the portfolio snapshot JSON.
///
/// Holds the read-only view of the three upstream stores: the property
/// registry, the category directory and the transaction ledger.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Portfolio {
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// An investment property with its acquisition data and unit roster
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Property {
    /// Unique identifier for this property
    pub id: String,
    /// Display name (e.g., "12 Acacia Ave")
    pub name: String,
    /// Date the property was acquired
    pub acquisition_date: NaiveDate,
    /// Purchase price at acquisition
    #[schemars(with = "f64")]
    pub acquisition_price: Decimal,
    /// Current market value
    #[schemars(with = "f64")]
    pub current_value: Decimal,
    /// Rentable units; may be empty for single-unit records
    #[serde(default)]
    pub units: Vec<Unit>,
}

impl Property {
    /// Occupancy rate as a percentage; a property with no unit records
    /// counts as fully occupied.
    pub fn occupancy_rate(&self) -> Decimal {
        if self.units.is_empty() {
            return Decimal::ONE_HUNDRED;
        }
        let occupied = self.units.iter().filter(|u| u.occupied).count();
        Decimal::from(occupied) / Decimal::from(self.units.len()) * Decimal::ONE_HUNDRED
    }
}

/// A rentable unit within a property
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Unit {
    pub id: String,
    pub name: String,
    /// Whether a tenant currently occupies the unit
    #[serde(default)]
    pub occupied: bool,
}

/// Ledger category reference data
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Category {
    /// Unique identifier for this category
    pub id: String,
    /// Display name; also the matching key for the cash-flow heuristic
    /// when no explicit role is set
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    #[serde(default)]
    pub is_tax_deductible: bool,
    /// Explicit cash-flow line item for this category. When absent the
    /// classifier falls back to name matching.
    #[serde(default)]
    pub cash_flow_role: Option<CashFlowRole>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum CategoryKind {
    Income,
    Expense,
}

/// Canonical cash-flow line items for expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum CashFlowRole {
    Vacancy,
    Management,
    Tax,
    Insurance,
    Maintenance,
    Utilities,
    Mortgage,
    OtherFinancing,
    Other,
}

/// A single ledger transaction
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Transaction {
    /// Unique identifier for this transaction
    pub id: String,
    /// Property this transaction belongs to
    pub property_id: String,
    /// Optional unit within the property
    #[serde(default)]
    pub unit_id: Option<String>,
    /// Ledger category
    pub category_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Date the transaction occurred
    pub date: NaiveDate,
    /// Absolute amount, never negative; direction comes from `kind`
    #[schemars(with = "f64")]
    pub amount: Decimal,
    #[serde(default)]
    pub is_tax_deductible: bool,
    #[serde(default)]
    pub is_paid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum TransactionKind {
    Income,
    Expense,
    Investment,
    Transfer,
}

/// Read a portfolio snapshot from JSON
pub fn read_portfolio_json<R: Read>(reader: R) -> anyhow::Result<Portfolio> {
    let mut portfolio: Portfolio = serde_json::from_reader(reader)?;
    portfolio.transactions.sort_by_key(|t| t.date);
    log::debug!(
        "loaded portfolio: {} properties, {} categories, {} transactions",
        portfolio.properties.len(),
        portfolio.categories.len(),
        portfolio.transactions.len()
    );
    Ok(portfolio)
}

impl Portfolio {
    pub fn property(&self, id: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// All transactions for a property, sorted by date
    pub fn transactions_for(&self, property_id: &str) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.property_id == property_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn unit(id: &str, occupied: bool) -> Unit {
        Unit {
            id: id.to_string(),
            name: format!("Unit {id}"),
            occupied,
        }
    }

    fn property(units: Vec<Unit>) -> Property {
        Property {
            id: "p1".to_string(),
            name: "Test Property".to_string(),
            acquisition_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            acquisition_price: dec!(200000),
            current_value: dec!(250000),
            units,
        }
    }

    #[test]
    fn occupancy_rate_no_units_is_full() {
        assert_eq!(property(vec![]).occupancy_rate(), dec!(100));
    }

    #[test]
    fn occupancy_rate_partial() {
        let p = property(vec![unit("a", true), unit("b", false), unit("c", true), unit("d", true)]);
        assert_eq!(p.occupancy_rate(), dec!(75));
    }

    #[test]
    fn read_portfolio_sorts_transactions_by_date() {
        let json = r#"{
            "properties": [],
            "categories": [],
            "transactions": [
                {"id": "t2", "property_id": "p1", "category_id": "c1", "type": "Income",
                 "date": "2024-03-01", "amount": 1200.0, "is_paid": true},
                {"id": "t1", "property_id": "p1", "category_id": "c1", "type": "Income",
                 "date": "2024-01-01", "amount": 1200.0, "is_paid": true}
            ]
        }"#;
        let portfolio = read_portfolio_json(json.as_bytes()).unwrap();
        assert_eq!(portfolio.transactions[0].id, "t1");
        assert_eq!(portfolio.transactions[1].id, "t2");
    }

    #[test]
    fn category_role_roundtrips() {
        let json = r#"{"id": "c1", "name": "Repairs", "type": "Expense",
                       "is_tax_deductible": true, "cash_flow_role": "Maintenance"}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.cash_flow_role, Some(CashFlowRole::Maintenance));
    }

    #[test]
    fn transaction_optional_fields_default() {
        let json = r#"{"id": "t1", "property_id": "p1", "category_id": "c1",
                       "type": "Expense", "date": "2024-01-15", "amount": 85.5}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.unit_id, None);
        assert!(!tx.is_tax_deductible);
        assert!(!tx.is_paid);
        assert_eq!(tx.amount, dec!(85.5));
    }
}
