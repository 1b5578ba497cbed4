use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::checked;
use crate::FinLitResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%).
pub type Rate = Decimal;

/// Rates as typed into a form, in percentage points (12 = 12%).
pub type Percent = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Convert a percentage-point figure into a decimal rate.
pub fn percent_to_rate(pct: Percent) -> Rate {
    pct / Decimal::ONE_HUNDRED
}

/// Round a money value to whole currency units for display.
pub fn round_display(value: Money) -> Money {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a money value to cents.
pub fn round_cents(value: Money) -> Money {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A ratio whose denominator may legitimately be zero.
///
/// Serializes as a decimal string, or the literal `"N/A"` when undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ratio {
    Value(Decimal),
    NotApplicable,
}

impl Ratio {
    /// `numerator / denominator`, or `NotApplicable` when the denominator is
    /// zero. A quotient outside the `Decimal` range is an error.
    pub fn of(numerator: Decimal, denominator: Decimal) -> FinLitResult<Self> {
        if denominator.is_zero() {
            return Ok(Ratio::NotApplicable);
        }
        checked::div(numerator, denominator, "ratio").map(Ratio::Value)
    }

    /// Same as [`Ratio::of`] but scaled to a percentage.
    pub fn percent_of(numerator: Decimal, denominator: Decimal) -> FinLitResult<Self> {
        match Ratio::of(numerator, denominator)? {
            Ratio::Value(v) => checked::mul(v, Decimal::ONE_HUNDRED, "ratio").map(Ratio::Value),
            na => Ok(na),
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            Ratio::Value(v) => Some(*v),
            Ratio::NotApplicable => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, Ratio::Value(_))
    }

    pub fn round_dp(self, dp: u32) -> Self {
        match self {
            Ratio::Value(v) => Ratio::Value(v.round_dp(dp)),
            na => na,
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Value(v) => write!(f, "{v}"),
            Ratio::NotApplicable => f.write_str("N/A"),
        }
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Ratio::Value(v) => Serialize::serialize(v, serializer),
            Ratio::NotApplicable => serializer.serialize_str("N/A"),
        }
    }
}

impl<'de> Deserialize<'de> for Ratio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(Decimal),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(Ratio::Value(v)),
            Repr::Text(s) if s.eq_ignore_ascii_case("n/a") => Ok(Ratio::NotApplicable),
            Repr::Text(s) => s
                .parse::<Decimal>()
                .map(Ratio::Value)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ratio_zero_denominator_is_not_applicable() {
        assert_eq!(Ratio::of(dec!(5), Decimal::ZERO).unwrap(), Ratio::NotApplicable);
        assert_eq!(Ratio::percent_of(dec!(1), dec!(4)).unwrap(), Ratio::Value(dec!(25)));
    }

    #[test]
    fn test_ratio_out_of_range_is_an_error() {
        assert!(Ratio::of(Decimal::MAX, dec!(0.5)).is_err());
        assert!(Ratio::percent_of(Decimal::MAX, dec!(2)).is_err());
    }

    #[test]
    fn test_ratio_serializes_na_literal() {
        let json = serde_json::to_string(&Ratio::NotApplicable).unwrap();
        assert_eq!(json, "\"N/A\"");
        let back: Ratio = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Ratio::NotApplicable);
    }

    #[test]
    fn test_ratio_deserializes_decimal_string() {
        let r: Ratio = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(r, Ratio::Value(dec!(12.5)));
    }

    #[test]
    fn test_round_display_half_away_from_zero() {
        assert_eq!(round_display(dec!(10.5)), dec!(11));
        assert_eq!(round_display(dec!(10.49)), dec!(10));
        assert_eq!(round_cents(dec!(343.755)), dec!(343.76));
    }
}
