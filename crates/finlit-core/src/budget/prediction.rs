//! Payload preparation for the remote savings-prediction service and
//! interpretation of its answer. The prediction model itself lives remotely.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::categories::{FixedExpense, VariableExpense};
use super::summary::BudgetProfile;
use crate::checked;
use crate::error::FinLitError;
use crate::types::{with_metadata, ComputationOutput, Money, Ratio};
use crate::FinLitResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Flat, all-numeric request body. Every category is present (zero when the
/// user left it blank) and serialized as a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub desired_savings: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub rent: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub utilities: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub loan_emi: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub insurance: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub education: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub subscriptions: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub groceries: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub transport: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub dining: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub entertainment: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub shopping: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub healthcare: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub miscellaneous: Money,
}

/// What the prediction service sends back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub feasible: bool,
    pub predicted_savings: Money,
    pub desired_savings: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalAssessment {
    pub feasible: bool,
    pub predicted_savings: Money,
    pub desired_savings: Money,
    /// predicted / desired × 100, or "N/A" when nothing was desired.
    pub achievement_percent: Ratio,
    pub shortfall: Money,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

pub fn prediction_request(profile: &BudgetProfile) -> FinLitResult<PredictionRequest> {
    if profile.income < Decimal::ZERO {
        return Err(FinLitError::InvalidInput {
            field: "income".into(),
            reason: "income must be >= 0".into(),
        });
    }

    let f = |c: FixedExpense| profile.fixed_amount(c).max(Decimal::ZERO);
    let v = |c: VariableExpense| profile.variable_amount(c).max(Decimal::ZERO);

    Ok(PredictionRequest {
        income: profile.income,
        desired_savings: profile.desired_savings.max(Decimal::ZERO),
        rent: f(FixedExpense::Rent),
        utilities: f(FixedExpense::Utilities),
        loan_emi: f(FixedExpense::LoanEmi),
        insurance: f(FixedExpense::Insurance),
        education: f(FixedExpense::Education),
        subscriptions: f(FixedExpense::Subscriptions),
        groceries: v(VariableExpense::Groceries),
        transport: v(VariableExpense::Transport),
        dining: v(VariableExpense::Dining),
        entertainment: v(VariableExpense::Entertainment),
        shopping: v(VariableExpense::Shopping),
        healthcare: v(VariableExpense::Healthcare),
        miscellaneous: v(VariableExpense::Miscellaneous),
    })
}

/// Turn the service's raw answer into something the result screen can render
/// without dividing by zero.
pub fn assess_prediction(
    response: &PredictionResponse,
) -> FinLitResult<ComputationOutput<GoalAssessment>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if response.desired_savings < Decimal::ZERO {
        return Err(FinLitError::InvalidInput {
            field: "desired_savings".into(),
            reason: "desired_savings must be >= 0".into(),
        });
    }

    let achievement_percent =
        Ratio::percent_of(response.predicted_savings, response.desired_savings)?.round_dp(2);
    if !achievement_percent.is_applicable() {
        warnings.push("Desired savings is zero: achievement is not applicable".into());
    }

    let shortfall = checked::sub(response.desired_savings, response.predicted_savings, "shortfall")?
        .max(Decimal::ZERO);
    if response.feasible && shortfall > Decimal::ZERO {
        warnings.push("Service reports the goal feasible despite a predicted shortfall".into());
    }

    let result = GoalAssessment {
        feasible: response.feasible,
        predicted_savings: response.predicted_savings,
        desired_savings: response.desired_savings,
        achievement_percent,
        shortfall,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Savings goal assessment from remote prediction",
        &serde_json::json!({}),
        warnings,
        elapsed,
        result,
    ))
}
