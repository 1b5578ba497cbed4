use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::emi::{LoanInput, LoanResult, MonthlyTerms};
use crate::checked;
use crate::error::FinLitError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::FinLitResult;

/// Longest schedule produced, in months (100 years).
pub const MAX_SCHEDULE_MONTHS: u32 = 1200;

/// One month of a reducing-balance repayment schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub opening_balance: Money,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub summary: LoanResult,
    pub schedule: Vec<AmortizationRow>,
}

/// Month-by-month schedule for an EMI loan. The final instalment absorbs any
/// residual so the loan closes at exactly zero.
pub fn amortization_schedule(
    input: &LoanInput,
) -> FinLitResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let terms = MonthlyTerms::from_input(input)?;
    if !terms.months.fract().is_zero() {
        return Err(FinLitError::InvalidInput {
            field: "term_years".into(),
            reason: "term must be a whole number of months for a schedule".into(),
        });
    }
    let months: u32 = terms
        .months
        .to_u32()
        .filter(|m| *m <= MAX_SCHEDULE_MONTHS)
        .ok_or_else(|| FinLitError::InvalidInput {
            field: "term_years".into(),
            reason: format!("a schedule covers at most {MAX_SCHEDULE_MONTHS} months"),
        })?;
    if terms.monthly_rate.is_zero() {
        warnings.push("Zero interest rate: EMI is principal divided by months".into());
    }

    let emi = terms.emi()?;
    let mut balance = terms.principal;
    let mut schedule = Vec::with_capacity(months as usize);
    let mut total_paid = Decimal::ZERO;

    for month in 1..=months {
        let opening = balance;
        let interest = checked::mul(opening, terms.monthly_rate, "interest")?;
        let (payment, principal) = if month == months {
            (checked::add(opening, interest, "payment")?, opening)
        } else {
            (emi, emi - interest)
        };
        balance = if month == months {
            Decimal::ZERO
        } else {
            opening - principal
        };
        total_paid = checked::add(total_paid, payment, "total_paid")?;

        schedule.push(AmortizationRow {
            month,
            opening_balance: opening,
            payment,
            interest,
            principal,
            closing_balance: balance,
        });
    }

    let summary = LoanResult {
        monthly_payment: emi,
        total_paid,
        total_interest: total_paid - terms.principal,
        months: terms.months,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Reducing-balance amortization schedule",
        &serde_json::json!({
            "monthly_rate": terms.monthly_rate.to_string(),
            "months": months,
        }),
        warnings,
        elapsed,
        AmortizationOutput { summary, schedule },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_schedule_closes_at_zero() {
        let out = amortization_schedule(&LoanInput {
            principal: dec!(50000),
            annual_rate_percent: dec!(12),
            term_years: dec!(1),
        })
        .unwrap();
        let rows = &out.result.schedule;
        assert_eq!(rows.len(), 12);
        assert_eq!(rows.last().unwrap().closing_balance, Decimal::ZERO);
        let repaid: Decimal = rows.iter().map(|r| r.principal).sum();
        assert!((repaid - dec!(50000)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_schedule_rejects_partial_months() {
        let res = amortization_schedule(&LoanInput {
            principal: dec!(50000),
            annual_rate_percent: dec!(12),
            term_years: dec!(1.01),
        });
        assert!(res.is_err());
    }

    #[test]
    fn test_schedule_rejects_terms_beyond_cap() {
        let at_cap = amortization_schedule(&LoanInput {
            principal: dec!(50000),
            annual_rate_percent: dec!(6),
            term_years: dec!(100),
        })
        .unwrap();
        assert_eq!(at_cap.result.schedule.len(), MAX_SCHEDULE_MONTHS as usize);

        let res = amortization_schedule(&LoanInput {
            principal: dec!(50000),
            annual_rate_percent: dec!(6),
            term_years: dec!(357913941),
        });
        assert!(res.is_err());
    }
}
