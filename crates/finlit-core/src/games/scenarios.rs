use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::bill_split::{BillSplitScenario, Difficulty};
use crate::config::{BillSplitConfig, BillSplitTier};
use crate::error::FinLitError;
use crate::FinLitResult;

/// A serialized request for a scenario batch. `seed` is unsigned, so a
/// negative or fractional seed fails to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    pub difficulty: Difficulty,
    pub count: usize,
    pub seed: u64,
}

impl ScenarioRequest {
    pub fn generate(&self, config: &BillSplitConfig) -> FinLitResult<Vec<BillSplitScenario>> {
        generate_bill_split_scenarios(config, self.difficulty, self.count, self.seed)
    }
}

fn tier(config: &BillSplitConfig, difficulty: Difficulty) -> &BillSplitTier {
    match difficulty {
        Difficulty::Easy => &config.easy,
        Difficulty::Medium => &config.medium,
        Difficulty::Hard => &config.hard,
    }
}

fn whole(value: Decimal, field: &str) -> FinLitResult<i64> {
    value.trunc().to_i64().ok_or_else(|| FinLitError::Config(format!(
        "{field} is out of range"
    )))
}

/// Reproducible bill-split scenarios for one difficulty tier. Bills are whole
/// currency units; discounts are multiples of 10.
pub fn generate_bill_split_scenarios(
    config: &BillSplitConfig,
    difficulty: Difficulty,
    count: usize,
    seed: u64,
) -> FinLitResult<Vec<BillSplitScenario>> {
    if count == 0 {
        return Err(FinLitError::not_positive("count"));
    }

    let t = tier(config, difficulty);
    let min_bill = whole(t.min_bill, "min_bill")?;
    let max_bill = whole(t.max_bill, "max_bill")?.max(min_bill);
    let discount_steps = whole(t.max_discount / dec!(10), "max_discount")?.max(0);
    let min_people = t.min_participants.max(1);
    let max_people = t.max_participants.max(min_people);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(count);

    for _ in 0..count {
        let bill = Decimal::from(rng.gen_range(min_bill..=max_bill));
        let discount = Decimal::from(rng.gen_range(0..=discount_steps) * 10).min(bill);
        let tip_percent = t.tip_choices.choose(&mut rng).copied().unwrap_or_default();
        let participants = rng.gen_range(min_people..=max_people);

        out.push(BillSplitScenario {
            bill_total: bill,
            discount,
            tip_percent,
            participants,
            time_limit_secs: t.time_limit_secs,
            difficulty,
        });
    }

    tracing::debug!(?difficulty, count, seed, "generated bill-split scenarios");
    Ok(out)
}
