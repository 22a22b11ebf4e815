//! Progressive tax brackets: table validation and marginal tax calculation

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BracketError {
    #[error("bracket table is empty")]
    Empty,
    #[error("first bracket must start at 0, found {found}")]
    FirstLowerBound { found: Decimal },
    #[error("bracket {index}: upper bound {upper} must exceed lower bound {lower}")]
    EmptySpan {
        index: usize,
        lower: Decimal,
        upper: Decimal,
    },
    #[error("bracket {index}: rate {rate} must be between 0 and 100")]
    RateOutOfRange { index: usize, rate: Decimal },
    #[error("bracket {index}: lower bound {found} must equal previous upper bound {expected}")]
    NotContiguous {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },
}

/// Input root for a bracket table JSON file
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BracketInput {
    pub brackets: Vec<TaxBracket>,
}

/// One income range with its marginal rate (percent)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct TaxBracket {
    #[schemars(with = "f64")]
    pub lower_bound: Decimal,
    #[schemars(with = "f64")]
    pub upper_bound: Decimal,
    /// Marginal rate in percent, 0..=100
    #[schemars(with = "f64")]
    pub rate: Decimal,
}

/// Tax due within a single bracket
#[derive(Debug, Clone, Serialize)]
pub struct BracketTax {
    pub lower_bound: Decimal,
    pub upper_bound: Decimal,
    pub rate: Decimal,
    pub income_in_bracket: Decimal,
    pub tax_for_bracket: Decimal,
}

/// Result of a bracket-table tax calculation
#[derive(Debug, Clone, Serialize)]
pub struct BracketCalculation {
    pub taxable_income: Decimal,
    pub estimated_tax_liability: Decimal,
    pub effective_tax_rate: Decimal,
    pub bracket_breakdown: Vec<BracketTax>,
}

/// Check the table invariants: ascending, contiguous, starting at zero,
/// positive spans, rates within 0..=100. Runs before any tax is computed;
/// a bad table is never silently repaired.
pub fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), BracketError> {
    let first = brackets.first().ok_or(BracketError::Empty)?;
    if !first.lower_bound.is_zero() {
        return Err(BracketError::FirstLowerBound {
            found: first.lower_bound,
        });
    }
    let mut previous_upper = Decimal::ZERO;
    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.upper_bound <= bracket.lower_bound {
            return Err(BracketError::EmptySpan {
                index,
                lower: bracket.lower_bound,
                upper: bracket.upper_bound,
            });
        }
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE_HUNDRED {
            return Err(BracketError::RateOutOfRange {
                index,
                rate: bracket.rate,
            });
        }
        if index > 0 && bracket.lower_bound != previous_upper {
            return Err(BracketError::NotContiguous {
                index,
                expected: previous_upper,
                found: bracket.lower_bound,
            });
        }
        previous_upper = bracket.upper_bound;
    }
    Ok(())
}

/// Compute per-bracket and total tax for a taxable income.
///
/// Negative taxable income is not clamped up front; the per-bracket floor
/// of zero makes the whole calculation come out at zero anyway.
pub fn calculate_with_brackets(
    brackets: &[TaxBracket],
    taxable_income: Decimal,
) -> Result<BracketCalculation, BracketError> {
    validate_brackets(brackets)?;

    let mut breakdown = Vec::with_capacity(brackets.len());
    let mut liability = Decimal::ZERO;
    for bracket in brackets {
        let income_in_bracket = (taxable_income.min(bracket.upper_bound) - bracket.lower_bound)
            .max(Decimal::ZERO);
        let tax_for_bracket = income_in_bracket * bracket.rate / Decimal::ONE_HUNDRED;
        liability += tax_for_bracket;
        breakdown.push(BracketTax {
            lower_bound: bracket.lower_bound,
            upper_bound: bracket.upper_bound,
            rate: bracket.rate,
            income_in_bracket: income_in_bracket.round_dp(2),
            tax_for_bracket: tax_for_bracket.round_dp(2),
        });
    }

    let effective_tax_rate = if taxable_income > Decimal::ZERO {
        liability / taxable_income * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    Ok(BracketCalculation {
        taxable_income: taxable_income.round_dp(2),
        estimated_tax_liability: liability.round_dp(2),
        effective_tax_rate,
        bracket_breakdown: breakdown,
    })
}
