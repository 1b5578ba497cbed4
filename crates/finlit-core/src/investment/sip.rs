use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::InvestmentResult;
use crate::checked;
use crate::time_value::{annuity_factor, compound};
use crate::types::{percent_to_rate, with_metadata, ComputationOutput, Money, Percent, Years};
use crate::{require_positive, FinLitResult};

/// Systematic Investment Plan: a fixed contribution at the start of every month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipInput {
    pub monthly_contribution: Money,
    pub annual_rate_percent: Percent,
    pub years: Years,
}

/// Future value of a monthly SIP (annuity due, monthly compounding).
///
/// FV = P × ((1+r)^m − 1)/r × (1+r), r = R/1200, m = 12n
pub fn calculate_sip(input: &SipInput) -> FinLitResult<ComputationOutput<InvestmentResult>> {
    let start = Instant::now();

    require_positive("monthly_contribution", input.monthly_contribution)?;
    require_positive("annual_rate_percent", input.annual_rate_percent)?;
    require_positive("years", input.years)?;

    let monthly_rate = percent_to_rate(input.annual_rate_percent) / dec!(12);
    let months = checked::mul(input.years, dec!(12), "years")?;

    let growth = checked::mul(
        annuity_factor(monthly_rate, months)?,
        compound(monthly_rate, Decimal::ONE)?,
        "years",
    )?;
    let future_value = checked::mul(input.monthly_contribution, growth, "future_value")?;
    let total_contributed =
        checked::mul(input.monthly_contribution, months, "total_contributed")?;

    let result = InvestmentResult::from_parts(future_value, total_contributed);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "SIP future value (annuity due, monthly compounding)",
        &serde_json::json!({
            "monthly_rate": monthly_rate.to_string(),
            "months": months.to_string(),
        }),
        Vec::new(),
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(p: Decimal, r: Decimal, n: Decimal) -> SipInput {
        SipInput {
            monthly_contribution: p,
            annual_rate_percent: r,
            years: n,
        }
    }

    #[test]
    fn test_sip_known_value() {
        // 5000/month at 12% for 10 years: the usual calculator answer is ~11,61,695
        let out = calculate_sip(&input(dec!(5000), dec!(12), dec!(10))).unwrap();
        let r = out.result.rounded();
        assert!((r.future_value - dec!(1161695)).abs() <= dec!(1));
        assert_eq!(r.total_contributed, dec!(600000));
    }

    #[test]
    fn test_sip_gain_identity() {
        let out = calculate_sip(&input(dec!(2500), dec!(9.5), dec!(7))).unwrap();
        let r = &out.result;
        assert_eq!(r.total_gain, r.future_value - r.total_contributed);
        assert!(r.future_value >= r.total_contributed);
    }

    #[test]
    fn test_sip_zero_inputs_give_no_result() {
        assert!(calculate_sip(&input(Decimal::ZERO, dec!(12), dec!(10))).is_err());
        assert!(calculate_sip(&input(dec!(1000), Decimal::ZERO, dec!(10))).is_err());
        assert!(calculate_sip(&input(dec!(1000), dec!(12), Decimal::ZERO)).is_err());
        assert!(calculate_sip(&input(dec!(-1000), dec!(12), dec!(10))).is_err());
    }

    #[test]
    fn test_sip_overflow_gives_no_result() {
        assert!(calculate_sip(&input(dec!(1000000000000000000000000000), dec!(12), dec!(10))).is_err());
        assert!(calculate_sip(&input(dec!(1000), dec!(12), Decimal::MAX)).is_err());
    }

    #[test]
    fn test_sip_very_long_horizon_at_tiny_rate() {
        let out = calculate_sip(&input(dec!(1), dec!(0.000000001), dec!(2000000))).unwrap();
        assert!(out.result.future_value >= out.result.total_contributed);
    }

    #[test]
    fn test_sip_fractional_years() {
        let out = calculate_sip(&input(dec!(1000), dec!(12), dec!(1.5))).unwrap();
        assert_eq!(out.result.total_contributed, dec!(18000));
        assert!(out.result.total_gain > Decimal::ZERO);
    }
}
