use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::checked;
use crate::error::FinLitError;
use crate::time_value::level_payment;
use crate::types::{
    percent_to_rate, round_display, with_metadata, ComputationOutput, Money, Percent, Rate, Years,
};
use crate::{require_positive, FinLitResult};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub term_years: Years,
}

/// Equated monthly instalment and the totals it implies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    pub months: Decimal,
}

impl LoanResult {
    /// Whole-currency figures for display.
    pub fn rounded(&self) -> Self {
        Self {
            monthly_payment: round_display(self.monthly_payment),
            total_paid: round_display(self.total_paid),
            total_interest: round_display(self.total_interest),
            months: self.months,
        }
    }
}

/// Validated loan terms in monthly units.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MonthlyTerms {
    pub principal: Money,
    pub monthly_rate: Rate,
    pub months: Decimal,
}

impl MonthlyTerms {
    pub(crate) fn from_input(input: &LoanInput) -> FinLitResult<Self> {
        require_positive("principal", input.principal)?;
        require_positive("term_years", input.term_years)?;
        if input.annual_rate_percent < Decimal::ZERO {
            return Err(FinLitError::InvalidInput {
                field: "annual_rate_percent".into(),
                reason: "annual_rate_percent must be >= 0".into(),
            });
        }
        Ok(Self {
            principal: input.principal,
            monthly_rate: percent_to_rate(input.annual_rate_percent) / dec!(12),
            months: checked::mul(input.term_years, dec!(12), "term_years")?,
        })
    }

    pub(crate) fn emi(&self) -> FinLitResult<Money> {
        level_payment(self.monthly_rate, self.months, self.principal)
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// EMI = P·r·(1+r)^n / ((1+r)^n − 1), with r = R/1200 and n = 12 × years.
///
/// A zero rate falls back to the straight-line P / n.
pub fn calculate_emi(input: &LoanInput) -> FinLitResult<ComputationOutput<LoanResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let terms = MonthlyTerms::from_input(input)?;
    if terms.monthly_rate.is_zero() {
        tracing::debug!(principal = %terms.principal, "zero-rate loan, using straight-line EMI");
        warnings.push("Zero interest rate: EMI is principal divided by months".into());
    }

    let monthly_payment = terms.emi()?;
    let total_paid = checked::mul(monthly_payment, terms.months, "total_paid")?;
    let total_interest = total_paid - terms.principal;

    let result = LoanResult {
        monthly_payment,
        total_paid,
        total_interest,
        months: terms.months,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Equated monthly instalment (reducing balance)",
        &serde_json::json!({
            "monthly_rate": terms.monthly_rate.to_string(),
            "months": terms.months.to_string(),
        }),
        warnings,
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan(p: Decimal, r: Decimal, y: Decimal) -> LoanInput {
        LoanInput {
            principal: p,
            annual_rate_percent: r,
            term_years: y,
        }
    }

    #[test]
    fn test_huge_principal_is_an_error_not_a_panic() {
        assert!(calculate_emi(&loan(dec!(70000000000000000000000000000), dec!(10), dec!(20))).is_err());
        assert!(calculate_emi(&loan(Decimal::MAX, Decimal::ZERO, dec!(0.01))).is_err());
    }

    #[test]
    fn test_emi_standard_home_loan() {
        // 10 lakh at 10% for 20 years: EMI ≈ 9,650
        let out = calculate_emi(&loan(dec!(1000000), dec!(10), dec!(20))).unwrap();
        let r = out.result.rounded();
        assert_eq!(r.monthly_payment, dec!(9650));
        assert_eq!(out.result.months, dec!(240));
    }

    #[test]
    fn test_emi_zero_rate_is_straight_line() {
        let out = calculate_emi(&loan(dec!(120000), Decimal::ZERO, dec!(2))).unwrap();
        assert_eq!(out.result.monthly_payment, dec!(5000));
        assert_eq!(out.result.total_interest, Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_emi_rejects_negative_rate() {
        assert!(calculate_emi(&loan(dec!(1000), dec!(-1), dec!(1))).is_err());
    }
}
