use std::collections::BTreeMap;

use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finlit_core::budget::goal::{self, GoalInput};
use finlit_core::budget::prediction::{self, PredictionResponse};
use finlit_core::budget::summary;
use finlit_core::budget::BudgetProfile;

use crate::input;

/// Arguments for the budget summary and prediction payload
#[derive(Args)]
pub struct BudgetArgs {
    /// Path to a JSON budget profile (typed amounts keyed by category)
    #[arg(long, conflicts_with = "form")]
    pub input: Option<String>,

    /// Path to raw form fields as a flat JSON object of strings
    #[arg(long)]
    pub form: Option<String>,
}

/// Arguments for interpreting a prediction-service response
#[derive(Args)]
pub struct GoalAssessmentArgs {
    /// Path to the JSON response returned by the prediction service
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for time-to-goal projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct GoalProjectionArgs {
    /// Target amount
    #[arg(long)]
    pub goal: Option<Decimal>,

    /// Amount already saved towards the goal
    #[arg(long, default_value = "0")]
    pub saved: Decimal,

    /// Amount set aside each month
    #[arg(long)]
    pub monthly: Option<Decimal>,

    /// First month of saving (YYYY-MM-DD) for a projected date
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Flatten a form object so numbers and strings both reach the coercion step.
fn form_fields(data: Value) -> Result<BTreeMap<String, String>, Box<dyn std::error::Error>> {
    let obj = match data {
        Value::Object(map) => map,
        _ => return Err("Budget form must be a JSON object of field -> value".into()),
    };
    Ok(obj
        .into_iter()
        .map(|(k, v)| {
            let raw = match v {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (k, raw)
        })
        .collect())
}

/// Resolve a profile from --input, --form or stdin. Form coercion warnings
/// are returned so they can be merged into the output envelope.
fn load_profile(args: &BudgetArgs) -> Result<(BudgetProfile, Vec<String>), Box<dyn std::error::Error>> {
    if let Some(ref path) = args.form {
        let parsed = BudgetProfile::from_form(&form_fields(input::file::read_json_value(path)?)?);
        return Ok((parsed.profile, parsed.warnings));
    }
    let profile = input::require_record(
        args.input.as_deref(),
        "--input <profile.json>, --form <form.json>",
    )?;
    Ok((profile, Vec::new()))
}

pub fn run_budget(args: BudgetArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (profile, mut warnings) = load_profile(&args)?;
    let mut result = summary::summarize_budget(&profile)?;
    warnings.append(&mut result.warnings);
    result.warnings = warnings;
    Ok(serde_json::to_value(result)?)
}

pub fn run_prediction_payload(args: BudgetArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (profile, form_warnings) = load_profile(&args)?;
    for w in &form_warnings {
        tracing::warn!("{w}");
    }
    let payload = prediction::prediction_request(&profile)?;
    Ok(serde_json::to_value(payload)?)
}

pub fn run_goal_assessment(args: GoalAssessmentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let response: PredictionResponse =
        input::require_record(args.input.as_deref(), "--input <response.json>")?;
    let result = prediction::assess_prediction(&response)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_goal_projection(args: GoalProjectionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let goal_input = match input::read_record::<GoalInput>(args.input.as_deref())? {
        Some(record) => record,
        None => GoalInput {
            goal_amount: args.goal.ok_or("--goal is required (or provide --input)")?,
            current_saved: args.saved,
            monthly_savings: args.monthly.ok_or("--monthly is required (or provide --input)")?,
            start_date: args.start,
        },
    };
    let result = goal::project_goal(&goal_input)?;
    Ok(serde_json::to_value(result)?)
}
