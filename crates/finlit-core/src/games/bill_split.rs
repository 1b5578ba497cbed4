use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{Clock, Game, ScoredAttempt};
use crate::checked;
use crate::error::FinLitError;
use crate::types::{round_cents, Money, Percent};
use crate::FinLitResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn bonus(self) -> i32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }
}

/// A restaurant bill the player has to split. Fixed once shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillSplitScenario {
    pub bill_total: Money,
    #[serde(default)]
    pub discount: Money,
    #[serde(default)]
    pub tip_percent: Percent,
    pub participants: u32,
    pub time_limit_secs: u32,
    pub difficulty: Difficulty,
}

impl BillSplitScenario {
    /// Per-person share: (bill − discount) × (1 + tip/100) / people, to cents.
    pub fn correct_answer(&self) -> FinLitResult<Money> {
        let after_discount = checked::sub(self.bill_total, self.discount, "discount")?;
        let tip_factor = checked::add(
            Decimal::ONE,
            self.tip_percent / Decimal::ONE_HUNDRED,
            "tip_percent",
        )?;
        let with_tip = checked::mul(after_discount, tip_factor, "bill_total")?;
        let share = checked::div(with_tip, Decimal::from(self.participants), "participants")?;
        Ok(round_cents(share))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillSplitScore {
    pub correct_answer: Money,
    pub user_answer: Option<Money>,
    /// |answer − correct|; absent on timeout.
    pub accuracy: Option<Money>,
    pub base: i32,
    pub accuracy_bonus: i32,
    pub speed_bonus: i32,
    pub difficulty_bonus: i32,
    pub points_awarded: u32,
    pub is_correct: bool,
    pub updated_streak: u32,
}

impl ScoredAttempt for BillSplitScore {
    fn points(&self) -> u32 {
        self.points_awarded
    }

    fn is_correct(&self) -> bool {
        self.is_correct
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

pub const BASE_POINTS: i32 = 20;

/// Answers within one currency unit count towards the streak.
pub const CORRECT_TOLERANCE: Decimal = Decimal::ONE;

fn accuracy_bonus(accuracy: Money) -> i32 {
    if accuracy.is_zero() {
        5
    } else if accuracy <= dec!(1) {
        4
    } else if accuracy <= dec!(5) {
        3
    } else if accuracy <= dec!(10) {
        1
    } else {
        -5
    }
}

fn speed_bonus(clock: Clock) -> i32 {
    if clock.time_limit_secs == 0 {
        return 0;
    }
    let left = Decimal::from(clock.remaining_secs) / Decimal::from(clock.time_limit_secs);
    if left > dec!(0.7) {
        3
    } else if left > dec!(0.5) {
        2
    } else if left > dec!(0.3) {
        1
    } else {
        0
    }
}

/// Score one bill-split answer. A timeout (`None`) earns nothing and breaks
/// the streak. An answer too far from the correct one to measure is scored
/// as maximally inaccurate.
pub fn score_bill_split(
    scenario: &BillSplitScenario,
    answer: Option<Money>,
    clock: Clock,
    streak_before: u32,
) -> FinLitResult<BillSplitScore> {
    let correct_answer = scenario.correct_answer()?;

    let Some(user_answer) = answer else {
        return Ok(BillSplitScore {
            correct_answer,
            user_answer: None,
            accuracy: None,
            base: 0,
            accuracy_bonus: 0,
            speed_bonus: 0,
            difficulty_bonus: 0,
            points_awarded: 0,
            is_correct: false,
            updated_streak: 0,
        });
    };

    let accuracy = user_answer
        .checked_sub(correct_answer)
        .map(|d| d.abs())
        .unwrap_or(Decimal::MAX);
    let acc = accuracy_bonus(accuracy);
    let speed = speed_bonus(clock);
    let diff = scenario.difficulty.bonus();
    let points = (BASE_POINTS + acc + speed + diff).max(0) as u32;
    let is_correct = accuracy <= CORRECT_TOLERANCE;

    Ok(BillSplitScore {
        correct_answer,
        user_answer: Some(user_answer),
        accuracy: Some(accuracy),
        base: BASE_POINTS,
        accuracy_bonus: acc,
        speed_bonus: speed,
        difficulty_bonus: diff,
        points_awarded: points,
        is_correct,
        updated_streak: if is_correct { streak_before.saturating_add(1) } else { 0 },
    })
}

/// Bill-split rules for [`super::session::Session`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BillSplit;

impl Game for BillSplit {
    type Item = BillSplitScenario;
    type Answer = Money;
    type Score = BillSplitScore;

    fn validate_item(&self, item: &BillSplitScenario) -> FinLitResult<()> {
        if item.bill_total <= Decimal::ZERO {
            return Err(FinLitError::not_positive("bill_total"));
        }
        if item.discount < Decimal::ZERO || item.discount > item.bill_total {
            return Err(FinLitError::InvalidInput {
                field: "discount".into(),
                reason: "discount must be between 0 and the bill total".into(),
            });
        }
        if item.tip_percent < Decimal::ZERO {
            return Err(FinLitError::InvalidInput {
                field: "tip_percent".into(),
                reason: "tip_percent must be >= 0".into(),
            });
        }
        if item.participants == 0 {
            return Err(FinLitError::not_positive("participants"));
        }
        if item.time_limit_secs == 0 {
            return Err(FinLitError::not_positive("time_limit_secs"));
        }
        item.correct_answer().map(|_| ())
    }

    fn time_limit_secs(&self, item: &BillSplitScenario) -> u32 {
        item.time_limit_secs
    }

    fn score(
        &self,
        item: &BillSplitScenario,
        answer: Option<&Money>,
        clock: Clock,
        streak_before: u32,
    ) -> FinLitResult<BillSplitScore> {
        score_bill_split(item, answer.copied(), clock, streak_before)
    }
}
