use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::InvestmentResult;
use crate::config::EngineConfig;
use crate::checked;
use crate::time_value::annuity_factor;
use crate::types::{percent_to_rate, with_metadata, ComputationOutput, Money, Percent, Years};
use crate::{require_positive, FinLitResult};

/// Public Provident Fund deposit plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PpfInput {
    pub monthly_contribution: Money,
    pub years: Years,
    /// Accepted for form compatibility only; PPF always earns the statutory rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_rate_percent: Option<Percent>,
}

/// PPF maturity at the configured statutory rate, compounded annually on
/// yearly deposits of 12 × the monthly contribution.
pub fn calculate_ppf(
    input: &PpfInput,
    config: &EngineConfig,
) -> FinLitResult<ComputationOutput<InvestmentResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_positive("monthly_contribution", input.monthly_contribution)?;
    require_positive("years", input.years)?;
    require_positive("ppf_annual_rate_percent", config.ppf_annual_rate_percent)?;

    let statutory = config.ppf_annual_rate_percent;
    if let Some(requested) = input.annual_rate_percent {
        if requested != statutory {
            warnings.push(format!(
                "Requested rate {requested}% ignored; PPF earns the statutory {statutory}%"
            ));
        }
    }

    let rate = percent_to_rate(statutory);
    let annual_contribution = checked::mul(input.monthly_contribution, dec!(12), "monthly_contribution")?;
    let maturity = checked::mul(
        annual_contribution,
        annuity_factor(rate, input.years)?,
        "future_value",
    )?;
    let total_contributed = checked::mul(annual_contribution, input.years, "total_contributed")?;
    let result = InvestmentResult::from_parts(maturity, total_contributed);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "PPF maturity (statutory rate, annual compounding)",
        &serde_json::json!({
            "statutory_rate_percent": statutory.to_string(),
            "annual_contribution": annual_contribution.to_string(),
            "years": input.years.to_string(),
        }),
        warnings,
        elapsed,
        result,
    ))
}

/// Largest monthly deposit that keeps the yearly total within `annual_cap`.
pub fn max_monthly_contribution(annual_cap: Money) -> Money {
    if annual_cap <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (annual_cap / dec!(12)).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ppf_fifteen_years() {
        // 12,000/yr at 7.1% for 15 years ≈ 3,03,881 (ordinary annuity)
        let out = calculate_ppf(
            &PpfInput {
                monthly_contribution: dec!(1000),
                years: dec!(15),
                annual_rate_percent: None,
            },
            &EngineConfig::default(),
        )
        .unwrap();
        let r = out.result.rounded();
        assert_eq!(r.total_contributed, dec!(180000));
        assert!((r.future_value - dec!(303881)).abs() <= dec!(1));
    }

    #[test]
    fn test_ppf_warns_when_caller_rate_ignored() {
        let out = calculate_ppf(
            &PpfInput {
                monthly_contribution: dec!(1000),
                years: dec!(15),
                annual_rate_percent: Some(dec!(9)),
            },
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_ppf_overflow_gives_no_result() {
        let res = calculate_ppf(
            &PpfInput {
                monthly_contribution: dec!(10000000000000000000000000000),
                years: dec!(15),
                annual_rate_percent: None,
            },
            &EngineConfig::default(),
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_max_monthly_contribution() {
        assert_eq!(max_monthly_contribution(dec!(150000)), dec!(12500));
        assert_eq!(max_monthly_contribution(dec!(-1)), Decimal::ZERO);
    }
}
