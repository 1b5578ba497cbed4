use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::InvestmentResult;
use crate::checked;
use crate::time_value::compound;
use crate::types::{percent_to_rate, with_metadata, ComputationOutput, Money, Percent, Years};
use crate::{require_positive, FinLitResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedDepositInput {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub years: Years,
}

/// Fixed deposit maturity with annual compounding: P × (1 + R/100)^t.
pub fn calculate_fixed_deposit(
    input: &FixedDepositInput,
) -> FinLitResult<ComputationOutput<InvestmentResult>> {
    let start = Instant::now();

    require_positive("principal", input.principal)?;
    require_positive("annual_rate_percent", input.annual_rate_percent)?;
    require_positive("years", input.years)?;

    let rate = percent_to_rate(input.annual_rate_percent);
    let maturity = checked::mul(input.principal, compound(rate, input.years)?, "principal")?;
    let result = InvestmentResult::from_parts(maturity, input.principal);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed deposit maturity (annual compounding)",
        &serde_json::json!({
            "annual_rate": rate.to_string(),
            "years": input.years.to_string(),
        }),
        Vec::new(),
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fd_two_years_at_ten_percent() {
        let out = calculate_fixed_deposit(&FixedDepositInput {
            principal: dec!(100000),
            annual_rate_percent: dec!(10),
            years: dec!(2),
        })
        .unwrap();
        assert_eq!(out.result.future_value, dec!(121000));
        assert_eq!(out.result.total_gain, dec!(21000));
    }

    #[test]
    fn test_fd_rejects_missing_principal() {
        let res = calculate_fixed_deposit(&FixedDepositInput {
            principal: Decimal::ZERO,
            annual_rate_percent: dec!(7),
            years: dec!(3),
        });
        assert!(res.is_err());
    }

    #[test]
    fn test_fd_overflow_gives_no_result() {
        let res = calculate_fixed_deposit(&FixedDepositInput {
            principal: dec!(70000000000000000000000000000),
            annual_rate_percent: dec!(10),
            years: dec!(2),
        });
        assert!(res.is_err());
    }
}
