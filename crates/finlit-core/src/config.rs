use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinLitError;
use crate::types::{Money, Percent};
use crate::FinLitResult;

/// Statutory PPF rate at the time of writing (percent, compounded annually).
/// Revised by the government each quarter, so it lives in config.
pub const DEFAULT_PPF_RATE_PERCENT: Decimal = dec!(7.1);

/// Per-question answer window for the investment-fraud quiz.
pub const DEFAULT_QUIZ_TIME_LIMIT_SECS: u32 = 30;

/// Environment variable that overrides the PPF rate without a config file.
pub const PPF_RATE_ENV: &str = "FINLIT_PPF_RATE";

/// Engine-wide policy values. Every field has a documented default so an
/// empty config file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub ppf_annual_rate_percent: Percent,
    pub quiz_time_limit_secs: u32,
    pub bill_split: BillSplitConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ppf_annual_rate_percent: DEFAULT_PPF_RATE_PERCENT,
            quiz_time_limit_secs: DEFAULT_QUIZ_TIME_LIMIT_SECS,
            bill_split: BillSplitConfig::default(),
        }
    }
}

/// Scenario generation ranges for each bill-split difficulty tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillSplitConfig {
    pub easy: BillSplitTier,
    pub medium: BillSplitTier,
    pub hard: BillSplitTier,
}

impl Default for BillSplitConfig {
    fn default() -> Self {
        Self {
            easy: BillSplitTier {
                min_bill: dec!(200),
                max_bill: dec!(1500),
                max_discount: Decimal::ZERO,
                tip_choices: vec![dec!(0), dec!(10)],
                min_participants: 2,
                max_participants: 4,
                time_limit_secs: 60,
            },
            medium: BillSplitTier {
                min_bill: dec!(1000),
                max_bill: dec!(5000),
                max_discount: dec!(200),
                tip_choices: vec![dec!(5), dec!(10), dec!(15)],
                min_participants: 3,
                max_participants: 6,
                time_limit_secs: 45,
            },
            hard: BillSplitTier {
                min_bill: dec!(3000),
                max_bill: dec!(12000),
                max_discount: dec!(750),
                tip_choices: vec![dec!(12.5), dec!(15), dec!(18), dec!(20)],
                min_participants: 4,
                max_participants: 9,
                time_limit_secs: 30,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillSplitTier {
    pub min_bill: Money,
    pub max_bill: Money,
    pub max_discount: Money,
    pub tip_choices: Vec<Percent>,
    pub min_participants: u32,
    pub max_participants: u32,
    pub time_limit_secs: u32,
}

impl EngineConfig {
    /// Reject values that would make the calculators meaningless.
    pub fn validate(&self) -> FinLitResult<()> {
        if self.ppf_annual_rate_percent <= Decimal::ZERO {
            return Err(FinLitError::Config(
                "ppf_annual_rate_percent must be > 0".into(),
            ));
        }
        if self.quiz_time_limit_secs == 0 {
            return Err(FinLitError::Config("quiz_time_limit_secs must be > 0".into()));
        }
        for (name, tier) in [
            ("easy", &self.bill_split.easy),
            ("medium", &self.bill_split.medium),
            ("hard", &self.bill_split.hard),
        ] {
            tier.validate()
                .map_err(|reason| FinLitError::Config(format!("bill_split.{name}: {reason}")))?;
        }
        Ok(())
    }

    /// Apply the `FINLIT_PPF_RATE` override, if a value is supplied.
    pub fn with_ppf_override(mut self, raw: Option<&str>) -> FinLitResult<Self> {
        if let Some(raw) = raw {
            self.ppf_annual_rate_percent = raw.trim().parse::<Decimal>().map_err(|e| {
                FinLitError::Config(format!("{PPF_RATE_ENV} '{raw}' is not a number: {e}"))
            })?;
        }
        self.validate()?;
        Ok(self)
    }
}

impl BillSplitTier {
    fn validate(&self) -> Result<(), String> {
        if self.min_bill <= Decimal::ZERO || self.max_bill < self.min_bill {
            return Err("bill range must be positive and ordered".into());
        }
        if self.max_discount < Decimal::ZERO || self.max_discount >= self.min_bill {
            return Err("max_discount must be >= 0 and below min_bill".into());
        }
        if self.tip_choices.is_empty() {
            return Err("tip_choices must not be empty".into());
        }
        if self.min_participants < 2 || self.max_participants < self.min_participants {
            return Err("participants must be >= 2 and ordered".into());
        }
        if self.time_limit_secs == 0 {
            return Err("time_limit_secs must be > 0".into());
        }
        Ok(())
    }
}
