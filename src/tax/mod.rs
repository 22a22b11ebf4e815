pub mod brackets;
pub mod report;

pub use brackets::{calculate_with_brackets, BracketCalculation, BracketError, TaxBracket};
pub use report::{
    estimate_taxes, multi_year_comparison, tax_report, TaxEstimate, TaxReport, YearRangeError,
};
