use serde::{Deserialize, Serialize};

use super::{Clock, Game, ScoredAttempt};
use crate::error::FinLitError;
use crate::FinLitResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    InProgress { index: usize, clock: Clock },
    Completed,
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::NotStarted => "not started",
            Phase::InProgress { .. } => "in progress",
            Phase::Completed => "completed",
        }
    }
}

/// Inputs to the session reducer. Timer callbacks become `Tick`/`Expire`
/// so tests can drive a session without a wall clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event<A> {
    Start,
    Tick { elapsed_secs: u32 },
    Submit { index: usize, answer: A },
    Expire { index: usize },
    Restart,
}

impl<A> Event<A> {
    fn name(&self) -> &'static str {
        match self {
            Event::Start => "start",
            Event::Tick { .. } => "tick",
            Event::Submit { .. } => "submit",
            Event::Expire { .. } => "expire",
            Event::Restart => "restart",
        }
    }
}

/// What a single event did.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum Transition<S> {
    Started { time_limit_secs: u32 },
    Ticked { remaining_secs: u32 },
    Scored {
        index: usize,
        timed_out: bool,
        score: S,
        completed: bool,
    },
    /// Stale or duplicate event; nothing changed.
    Ignored { reason: String },
    Restarted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_score: u32,
    pub items: usize,
    pub correct: usize,
    pub timed_out: usize,
    pub best_streak: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
}

/// A scored item kept for the end-of-session review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRecord<S> {
    pub index: usize,
    pub timed_out: bool,
    pub score: S,
}

/// One play-through of a game over a fixed list of items.
///
/// `apply` either performs the whole transition or returns an error and
/// leaves the session untouched.
#[derive(Debug, Clone)]
pub struct Session<G: Game> {
    game: G,
    items: Vec<G::Item>,
    phase: Phase,
    score: u32,
    streak: u32,
    best_streak: u32,
    history: Vec<AttemptRecord<G::Score>>,
}

// ---------------------------------------------------------------------------
// Reducer
// ---------------------------------------------------------------------------

impl<G: Game> Session<G> {
    pub fn new(game: G, items: Vec<G::Item>) -> FinLitResult<Self> {
        if items.is_empty() {
            return Err(FinLitError::InvalidInput {
                field: "items".into(),
                reason: "a session needs at least one item".into(),
            });
        }
        for item in &items {
            game.validate_item(item)?;
        }
        Ok(Self {
            game,
            items,
            phase: Phase::NotStarted,
            score: 0,
            streak: 0,
            best_streak: 0,
            history: Vec::new(),
        })
    }

    pub fn apply(&mut self, event: Event<G::Answer>) -> FinLitResult<Transition<G::Score>> {
        tracing::debug!(event = event.name(), phase = self.phase.name(), "session event");

        match (self.phase, event) {
            (_, Event::Restart) => {
                self.reset();
                Ok(Transition::Restarted)
            }

            (Phase::NotStarted, Event::Start) => {
                let clock = Clock::new(self.game.time_limit_secs(&self.items[0]));
                self.phase = Phase::InProgress { index: 0, clock };
                Ok(Transition::Started {
                    time_limit_secs: clock.time_limit_secs,
                })
            }

            (Phase::InProgress { index, clock }, Event::Tick { elapsed_secs }) => {
                let mut clock = clock;
                clock.remaining_secs = clock.remaining_secs.saturating_sub(elapsed_secs);
                if clock.is_expired() {
                    self.score_current(index, None, clock)
                } else {
                    self.phase = Phase::InProgress { index, clock };
                    Ok(Transition::Ticked {
                        remaining_secs: clock.remaining_secs,
                    })
                }
            }

            (Phase::InProgress { index, clock }, Event::Submit { index: target, answer }) => {
                if target != index {
                    return Ok(stale("submit", target, index));
                }
                self.score_current(index, Some(&answer), clock)
            }

            (Phase::InProgress { index, clock }, Event::Expire { index: target }) => {
                if target != index {
                    return Ok(stale("expire", target, index));
                }
                let clock = Clock {
                    remaining_secs: 0,
                    ..clock
                };
                self.score_current(index, None, clock)
            }

            // Late timer callbacks and double submits after the final item.
            (Phase::NotStarted, Event::Tick { .. })
            | (Phase::Completed, Event::Tick { .. })
            | (Phase::Completed, Event::Submit { .. })
            | (Phase::Completed, Event::Expire { .. }) => Ok(Transition::Ignored {
                reason: format!("session is {}", self.phase.name()),
            }),

            (phase, event) => Err(FinLitError::InvalidTransition {
                phase: phase.name().into(),
                event: event.name().into(),
            }),
        }
    }

    fn score_current(
        &mut self,
        index: usize,
        answer: Option<&G::Answer>,
        clock: Clock,
    ) -> FinLitResult<Transition<G::Score>> {
        let item = &self.items[index];
        let score = self.game.score(item, answer, clock, self.streak)?;
        let timed_out = answer.is_none();

        self.score = self.score.saturating_add(score.points());
        if score.is_correct() {
            self.streak = self.streak.saturating_add(1);
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.streak = 0;
        }
        self.history.push(AttemptRecord {
            index,
            timed_out,
            score: score.clone(),
        });

        let next = index + 1;
        let completed = next >= self.items.len();
        self.phase = if completed {
            Phase::Completed
        } else {
            Phase::InProgress {
                index: next,
                clock: Clock::new(self.game.time_limit_secs(&self.items[next])),
            }
        };

        Ok(Transition::Scored {
            index,
            timed_out,
            score,
            completed,
        })
    }

    fn reset(&mut self) {
        self.phase = Phase::NotStarted;
        self.score = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.history.clear();
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn items(&self) -> &[G::Item] {
        &self.items
    }

    pub fn history(&self) -> &[AttemptRecord<G::Score>] {
        &self.history
    }

    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Completed
    }

    /// Final figures; `None` until the last item has been scored.
    pub fn summary(&self) -> Option<SessionSummary> {
        if !self.is_completed() {
            return None;
        }
        Some(SessionSummary {
            total_score: self.score,
            items: self.items.len(),
            correct: self.history.iter().filter(|a| a.score.is_correct()).count(),
            timed_out: self.history.iter().filter(|a| a.timed_out).count(),
            best_streak: self.best_streak,
            rating: self.game.rating_label(self.score),
        })
    }
}

fn stale<S>(event: &str, target: usize, current: usize) -> Transition<S> {
    tracing::warn!(event, target, current, "ignoring event for an item that is not current");
    Transition::Ignored {
        reason: format!("{event} for item {target} while item {current} is current"),
    }
}
