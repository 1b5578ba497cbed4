//! Mini-game scoring. Each game supplies its per-item scoring rules through
//! [`Game`]; [`session::Session`] drives the shared start/tick/submit/expire
//! state machine.

pub mod bill_split;
pub mod fraud_quiz;
pub mod scenarios;
pub mod session;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::FinLitResult;

/// Timer state of the item being answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    pub time_limit_secs: u32,
    pub remaining_secs: u32,
}

impl Clock {
    pub fn new(time_limit_secs: u32) -> Self {
        Self {
            time_limit_secs,
            remaining_secs: time_limit_secs,
        }
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.time_limit_secs.saturating_sub(self.remaining_secs)
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }
}

/// The scoring outcome of a single item.
pub trait ScoredAttempt {
    fn points(&self) -> u32;
    fn is_correct(&self) -> bool;
}

/// Rules for one mini-game.
pub trait Game {
    type Item: Clone + fmt::Debug + Serialize + DeserializeOwned;
    type Answer: Clone + fmt::Debug + Serialize + DeserializeOwned;
    type Score: Clone + fmt::Debug + Serialize + ScoredAttempt;

    /// Reject items that could not be scored.
    fn validate_item(&self, item: &Self::Item) -> FinLitResult<()>;

    fn time_limit_secs(&self, item: &Self::Item) -> u32;

    /// Score one item. `answer` is `None` when the timer ran out.
    fn score(
        &self,
        item: &Self::Item,
        answer: Option<&Self::Answer>,
        clock: Clock,
        streak_before: u32,
    ) -> FinLitResult<Self::Score>;

    /// Label for a finished session, if the game grades one.
    fn rating_label(&self, _total_score: u32) -> Option<String> {
        None
    }
}
