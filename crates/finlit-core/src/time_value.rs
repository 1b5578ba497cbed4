use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::checked;
use crate::error::FinLitError;
use crate::types::{Money, Rate};
use crate::FinLitResult;

/// Growth factor (1 + r)^n.
///
/// Whole periods are compounded by repeated squaring; only a fractional
/// remainder (e.g. 2.5 years) goes through `powd`. A factor outside the
/// `Decimal` range is an error.
pub fn compound(rate: Rate, periods: Decimal) -> FinLitResult<Decimal> {
    if periods < Decimal::ZERO {
        return Err(FinLitError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be >= 0".into(),
        });
    }
    let one_plus_r = checked::add(Decimal::ONE, rate, "rate")?;
    if one_plus_r <= Decimal::ZERO {
        return Err(FinLitError::InvalidInput {
            field: "rate".into(),
            reason: "Rate must be greater than -100%".into(),
        });
    }
    if one_plus_r == Decimal::ONE {
        return Ok(Decimal::ONE);
    }

    let whole = periods.trunc();
    let frac = periods - whole;
    let whole = whole.to_u64().ok_or_else(|| FinLitError::overflow("periods"))?;

    let mut result = pow_whole(one_plus_r, whole)?;
    if !frac.is_zero() {
        let partial = one_plus_r
            .checked_powd(frac)
            .ok_or_else(|| FinLitError::overflow("periods"))?;
        result = checked::mul(result, partial, "periods")?;
    }
    Ok(result)
}

/// base^exp by squaring: O(log exp) checked multiplications.
fn pow_whole(base: Decimal, mut exp: u64) -> FinLitResult<Decimal> {
    let mut result = Decimal::ONE;
    let mut square = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result = checked::mul(result, square, "periods")?;
        }
        exp >>= 1;
        if exp > 0 {
            square = checked::mul(square, square, "periods")?;
        }
    }
    Ok(result)
}

/// Future value of an ordinary annuity of 1 per period: ((1+r)^n − 1) / r.
/// Degenerates to n when the rate is zero.
pub fn annuity_factor(rate: Rate, periods: Decimal) -> FinLitResult<Decimal> {
    if rate.is_zero() {
        return Ok(periods);
    }
    checked::div(compound(rate, periods)? - Decimal::ONE, rate, "annuity_factor")
}

/// Level payment that amortises `principal` over `periods` at `rate`.
pub fn level_payment(rate: Rate, periods: Decimal, principal: Money) -> FinLitResult<Money> {
    if periods <= Decimal::ZERO {
        return Err(FinLitError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return checked::div(principal, periods, "principal");
    }

    let factor = compound(rate, periods)?;
    let denom = factor - Decimal::ONE;
    if denom.is_zero() {
        return Err(FinLitError::DivisionByZero {
            context: "level payment annuity factor".into(),
        });
    }

    // P × (r·f / (f − 1))
    let per_unit = checked::div(checked::mul(rate, factor, "rate")?, denom, "rate")?;
    checked::mul(principal, per_unit, "principal")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compound_whole_periods() {
        assert_eq!(compound(dec!(0.10), dec!(2)).unwrap(), dec!(1.21));
        assert_eq!(compound(dec!(0.05), Decimal::ZERO).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_compound_fractional_period() {
        // 1.21^0.5 = 1.1
        let f = compound(dec!(0.21), dec!(0.5)).unwrap();
        assert!((f - dec!(1.1)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_annuity_factor_zero_rate() {
        assert_eq!(annuity_factor(Decimal::ZERO, dec!(12)).unwrap(), dec!(12));
    }

    #[test]
    fn test_level_payment_zero_rate() {
        assert_eq!(
            level_payment(Decimal::ZERO, dec!(10), dec!(1000)).unwrap(),
            dec!(100)
        );
    }

    #[test]
    fn test_compound_many_periods_is_fast_and_matches_small_cases() {
        assert_eq!(compound(dec!(0.10), dec!(5)).unwrap(), dec!(1.61051));
        // 24 million monthly periods at a tiny rate: logarithmic work
        let f = compound(dec!(0.00000000001), dec!(24000000)).unwrap();
        assert!(f > Decimal::ONE && f < dec!(1.001));
    }

    #[test]
    fn test_compound_overflow_is_an_error() {
        assert!(compound(dec!(0.5), dec!(1000)).is_err());
        assert!(level_payment(Decimal::ZERO, dec!(0.5), Decimal::MAX).is_err());
    }

    #[test]
    fn test_compound_rejects_negative_periods() {
        assert!(compound(dec!(0.05), dec!(-1)).is_err());
    }
}
