use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Clock, Game, ScoredAttempt};
use crate::config::EngineConfig;
use crate::error::FinLitError;
use crate::FinLitResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Fake,
    Real,
}

/// One investment pitch the player has to call as fake or real.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizItem {
    pub id: String,
    pub prompt: String,
    pub verdict: Verdict,
    pub base_points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizScore {
    pub item_id: String,
    pub correct_verdict: Verdict,
    pub chosen: Option<Verdict>,
    pub elapsed_secs: u32,
    pub base_points: u32,
    pub time_bonus: u32,
    pub streak_bonus: u32,
    pub points_awarded: u32,
    pub is_correct: bool,
    pub updated_streak: u32,
}

impl ScoredAttempt for QuizScore {
    fn points(&self) -> u32 {
        self.points_awarded
    }

    fn is_correct(&self) -> bool {
        self.is_correct
    }
}

/// End-of-quiz grade. Only the thresholds are fixed; labels are cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizRating {
    AtRisk,
    NeedsPractice,
    Aware,
    SharpInvestor,
    FraudBuster,
}

impl QuizRating {
    pub fn from_score(total: u32) -> Self {
        if total >= 90 {
            QuizRating::FraudBuster
        } else if total >= 75 {
            QuizRating::SharpInvestor
        } else if total >= 60 {
            QuizRating::Aware
        } else if total >= 40 {
            QuizRating::NeedsPractice
        } else {
            QuizRating::AtRisk
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuizRating::FraudBuster => "Fraud Buster",
            QuizRating::SharpInvestor => "Sharp Investor",
            QuizRating::Aware => "Aware Investor",
            QuizRating::NeedsPractice => "Needs Practice",
            QuizRating::AtRisk => "At Risk",
        }
    }
}

impl fmt::Display for QuizRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

pub const MIN_BASE_POINTS: u32 = 5;
pub const MAX_BASE_POINTS: u32 = 15;
pub const STREAK_BONUS: u32 = 5;
pub const STREAK_THRESHOLD: u32 = 3;

fn time_bonus(elapsed_secs: u32) -> u32 {
    match elapsed_secs {
        0..=10 => 5,
        11..=20 => 2,
        _ => 0,
    }
}

/// Score one quiz answer. A wrong answer or a timeout (`None`) earns nothing
/// and resets the streak.
pub fn score_quiz_answer(
    item: &QuizItem,
    answer: Option<Verdict>,
    elapsed_secs: u32,
    streak_before: u32,
) -> QuizScore {
    let is_correct = answer == Some(item.verdict);

    let (time, streak) = if is_correct {
        let streak = if streak_before >= STREAK_THRESHOLD {
            STREAK_BONUS
        } else {
            0
        };
        (time_bonus(elapsed_secs), streak)
    } else {
        (0, 0)
    };
    let points = if is_correct {
        item.base_points + time + streak
    } else {
        0
    };

    QuizScore {
        item_id: item.id.clone(),
        correct_verdict: item.verdict,
        chosen: answer,
        elapsed_secs,
        base_points: item.base_points,
        time_bonus: time,
        streak_bonus: streak,
        points_awarded: points,
        is_correct,
        updated_streak: if is_correct { streak_before.saturating_add(1) } else { 0 },
    }
}

/// Fraud-quiz rules for [`super::session::Session`].
#[derive(Debug, Clone, Copy)]
pub struct FraudQuiz {
    pub time_limit_secs: u32,
}

impl FraudQuiz {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            time_limit_secs: config.quiz_time_limit_secs,
        }
    }
}

impl Default for FraudQuiz {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl Game for FraudQuiz {
    type Item = QuizItem;
    type Answer = Verdict;
    type Score = QuizScore;

    fn validate_item(&self, item: &QuizItem) -> FinLitResult<()> {
        if !(MIN_BASE_POINTS..=MAX_BASE_POINTS).contains(&item.base_points) {
            return Err(FinLitError::InvalidInput {
                field: format!("{}.base_points", item.id),
                reason: format!(
                    "base_points must be between {MIN_BASE_POINTS} and {MAX_BASE_POINTS}"
                ),
            });
        }
        if self.time_limit_secs == 0 {
            return Err(FinLitError::not_positive("time_limit_secs"));
        }
        Ok(())
    }

    fn time_limit_secs(&self, _item: &QuizItem) -> u32 {
        self.time_limit_secs
    }

    fn score(
        &self,
        item: &QuizItem,
        answer: Option<&Verdict>,
        clock: Clock,
        streak_before: u32,
    ) -> FinLitResult<QuizScore> {
        Ok(score_quiz_answer(item, answer.copied(), clock.elapsed_secs(), streak_before))
    }

    fn rating_label(&self, total_score: u32) -> Option<String> {
        Some(QuizRating::from_score(total_score).label().to_string())
    }
}
