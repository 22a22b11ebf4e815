pub mod aggregate;
pub mod cashflow;
pub mod performance;

pub use aggregate::{financial_report, CategorySummary, FinancialReport, Month, MonthlySummary};
pub use cashflow::{cash_flow_report, CashFlowReport};
pub use performance::{property_performance, PropertyPerformance};
