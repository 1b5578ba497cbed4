use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use finlit_core::config::EngineConfig;
use finlit_core::games::bill_split::{BillSplit, BillSplitScenario, Difficulty};
use finlit_core::games::fraud_quiz::{FraudQuiz, QuizItem, Verdict};
use finlit_core::games::scenarios::{generate_bill_split_scenarios, ScenarioRequest};
use finlit_core::games::session::{AttemptRecord, Event, Session, SessionSummary, Transition};
use finlit_core::games::Game;
use finlit_core::Money;

use crate::input;

/// Arguments for replaying a game session from a recorded event log
#[derive(Args)]
pub struct ReplayArgs {
    /// Path to JSON replay file ({"scenarios"|"items": [...], "events": [...]})
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(d: DifficultyArg) -> Self {
        match d {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

/// Arguments for bill-split scenario generation
#[derive(Args)]
pub struct ScenarioArgs {
    /// Difficulty tier
    #[arg(long, value_enum, default_value = "easy")]
    pub difficulty: DifficultyArg,

    /// Number of scenarios to generate
    #[arg(long, default_value = "5")]
    pub count: usize,

    /// RNG seed (same seed, same scenarios)
    #[arg(long, default_value = "42")]
    pub seed: u64,
}

#[derive(Debug, Deserialize)]
struct BillSplitReplay {
    #[serde(default)]
    scenarios: Vec<BillSplitScenario>,
    #[serde(default)]
    generate: Option<ScenarioRequest>,
    events: Vec<Event<Money>>,
}

#[derive(Debug, Deserialize)]
struct QuizReplay {
    items: Vec<QuizItem>,
    events: Vec<Event<Verdict>>,
}

#[derive(Debug, Serialize)]
struct ReplayOutput<S: Serialize> {
    transitions: Vec<Transition<S>>,
    score: u32,
    streak: u32,
    best_streak: u32,
    history: Vec<AttemptRecord<S>>,
    summary: Option<SessionSummary>,
}

fn replay<G: Game>(
    mut session: Session<G>,
    events: Vec<Event<G::Answer>>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut transitions = Vec::with_capacity(events.len());
    for (n, event) in events.into_iter().enumerate() {
        let t = session
            .apply(event)
            .map_err(|e| format!("event #{n}: {e}"))?;
        transitions.push(t);
    }

    let output = ReplayOutput {
        transitions,
        score: session.score(),
        streak: session.streak(),
        best_streak: session.best_streak(),
        history: session.history().to_vec(),
        summary: session.summary(),
    };
    Ok(serde_json::to_value(output)?)
}

pub fn run_bill_split(
    args: ReplayArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let replay_input: BillSplitReplay =
        input::require_record(args.input.as_deref(), "--input <replay.json>")?;
    let scenarios = match replay_input.generate {
        Some(req) if replay_input.scenarios.is_empty() => req.generate(&config.bill_split)?,
        Some(_) => return Err("Provide either \"scenarios\" or \"generate\", not both".into()),
        None => replay_input.scenarios,
    };
    let session = Session::new(BillSplit, scenarios)?;
    replay(session, replay_input.events)
}

pub fn run_fraud_quiz(
    args: ReplayArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let replay_input: QuizReplay =
        input::require_record(args.input.as_deref(), "--input <replay.json>")?;
    let session = Session::new(FraudQuiz::from_config(config), replay_input.items)?;
    replay(session, replay_input.events)
}

pub fn run_scenarios(
    args: ScenarioArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let scenarios =
        generate_bill_split_scenarios(&config.bill_split, args.difficulty.into(), args.count, args.seed)?;
    let mut with_answers: Vec<Value> = Vec::with_capacity(scenarios.len());
    for s in scenarios {
        let answer = s.correct_answer()?;
        let mut v = serde_json::to_value(&s)?;
        if let Value::Object(ref mut map) = v {
            map.insert("correct_answer".into(), serde_json::to_value(answer)?);
        }
        with_answers.push(v);
    }
    Ok(serde_json::json!({ "results": with_answers }))
}
