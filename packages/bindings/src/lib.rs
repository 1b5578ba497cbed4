use std::collections::BTreeMap;

use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use finlit_core::budget::BudgetProfile;
use finlit_core::config::EngineConfig;
use finlit_core::games::bill_split::{BillSplit, BillSplitScenario};
use finlit_core::games::fraud_quiz::{FraudQuiz, QuizItem, Verdict};
use finlit_core::games::scenarios::ScenarioRequest;
use finlit_core::games::session::{Event, Session, SessionSummary, Transition};
use finlit_core::games::Game;
use finlit_core::Money;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse<T: DeserializeOwned>(json: &str) -> NapiResult<T> {
    serde_json::from_str(json).map_err(to_napi_error)
}

fn to_json<T: Serialize>(value: &T) -> NapiResult<String> {
    serde_json::to_string(value).map_err(to_napi_error)
}

/// An absent or empty config string means built-in defaults.
fn engine_config(config_json: Option<String>) -> NapiResult<EngineConfig> {
    let config: EngineConfig = match config_json.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => parse(s)?,
        _ => EngineConfig::default(),
    };
    config.validate().map_err(to_napi_error)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Investment
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_sip(input_json: String) -> NapiResult<String> {
    let input: finlit_core::investment::sip::SipInput = parse(&input_json)?;
    let output = finlit_core::investment::sip::calculate_sip(&input).map_err(to_napi_error)?;
    to_json(&output)
}

#[napi]
pub fn calculate_fixed_deposit(input_json: String) -> NapiResult<String> {
    let input: finlit_core::investment::fixed_deposit::FixedDepositInput = parse(&input_json)?;
    let output = finlit_core::investment::fixed_deposit::calculate_fixed_deposit(&input)
        .map_err(to_napi_error)?;
    to_json(&output)
}

#[napi]
pub fn calculate_ppf(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: finlit_core::investment::ppf::PpfInput = parse(&input_json)?;
    let config = engine_config(config_json)?;
    let output =
        finlit_core::investment::ppf::calculate_ppf(&input, &config).map_err(to_napi_error)?;
    to_json(&output)
}

/// Largest monthly deposit that stays within a yearly PPF cap, e.g. "150000".
#[napi]
pub fn ppf_max_monthly_contribution(annual_cap: String) -> NapiResult<String> {
    let cap: Decimal = annual_cap.trim().parse().map_err(to_napi_error)?;
    if cap <= Decimal::ZERO {
        return Err(napi::Error::from_reason("annual_cap must be > 0"));
    }
    Ok(finlit_core::investment::ppf::max_monthly_contribution(cap).to_string())
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let input: finlit_core::loans::emi::LoanInput = parse(&input_json)?;
    let output = finlit_core::loans::emi::calculate_emi(&input).map_err(to_napi_error)?;
    to_json(&output)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: finlit_core::loans::emi::LoanInput = parse(&input_json)?;
    let output = finlit_core::loans::amortization::amortization_schedule(&input)
        .map_err(to_napi_error)?;
    to_json(&output)
}

// ---------------------------------------------------------------------------
// Budget
// ---------------------------------------------------------------------------

#[napi]
pub fn summarize_budget(profile_json: String) -> NapiResult<String> {
    let profile: BudgetProfile = parse(&profile_json)?;
    let output = finlit_core::budget::summary::summarize_budget(&profile).map_err(to_napi_error)?;
    to_json(&output)
}

/// Raw form fields (`{"income": "52000", "rent": "", ...}`) to a typed
/// profile plus coercion warnings.
#[napi]
pub fn budget_from_form(form_json: String) -> NapiResult<String> {
    let fields: BTreeMap<String, String> = parse(&form_json)?;
    to_json(&BudgetProfile::from_form(&fields))
}

#[napi]
pub fn prediction_request(profile_json: String) -> NapiResult<String> {
    let profile: BudgetProfile = parse(&profile_json)?;
    let payload =
        finlit_core::budget::prediction::prediction_request(&profile).map_err(to_napi_error)?;
    to_json(&payload)
}

#[napi]
pub fn assess_prediction(response_json: String) -> NapiResult<String> {
    let response: finlit_core::budget::prediction::PredictionResponse = parse(&response_json)?;
    let output =
        finlit_core::budget::prediction::assess_prediction(&response).map_err(to_napi_error)?;
    to_json(&output)
}

#[napi]
pub fn project_goal(input_json: String) -> NapiResult<String> {
    let input: finlit_core::budget::goal::GoalInput = parse(&input_json)?;
    let output = finlit_core::budget::goal::project_goal(&input).map_err(to_napi_error)?;
    to_json(&output)
}

// ---------------------------------------------------------------------------
// Games
// ---------------------------------------------------------------------------

#[napi]
pub fn generate_bill_split_scenarios(
    request_json: String,
    config_json: Option<String>,
) -> NapiResult<String> {
    let req: ScenarioRequest = parse(&request_json)?;
    let config = engine_config(config_json)?;
    let scenarios = req.generate(&config.bill_split).map_err(to_napi_error)?;
    to_json(&scenarios)
}

#[derive(Serialize)]
struct ReplayResult<S: Serialize> {
    transitions: Vec<Transition<S>>,
    score: u32,
    best_streak: u32,
    summary: Option<SessionSummary>,
}

fn replay<G: Game>(mut session: Session<G>, events: Vec<Event<G::Answer>>) -> NapiResult<String> {
    let transitions = events
        .into_iter()
        .map(|e| session.apply(e))
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_napi_error)?;
    to_json(&ReplayResult {
        transitions,
        score: session.score(),
        best_streak: session.best_streak(),
        summary: session.summary(),
    })
}

/// Run a recorded bill-split event log (`{"scenarios": [...], "events": [...]}`)
/// through a fresh session.
#[napi]
pub fn replay_bill_split(replay_json: String) -> NapiResult<String> {
    #[derive(Deserialize)]
    struct Replay {
        scenarios: Vec<BillSplitScenario>,
        events: Vec<Event<Money>>,
    }
    let r: Replay = parse(&replay_json)?;
    let session = Session::new(BillSplit, r.scenarios).map_err(to_napi_error)?;
    replay(session, r.events)
}

/// Run a recorded fraud-quiz event log (`{"items": [...], "events": [...]}`).
#[napi]
pub fn replay_fraud_quiz(replay_json: String, config_json: Option<String>) -> NapiResult<String> {
    #[derive(Deserialize)]
    struct Replay {
        items: Vec<QuizItem>,
        events: Vec<Event<Verdict>>,
    }
    let r: Replay = parse(&replay_json)?;
    let config = engine_config(config_json)?;
    let session = Session::new(FraudQuiz::from_config(&config), r.items).map_err(to_napi_error)?;
    replay(session, r.events)
}

