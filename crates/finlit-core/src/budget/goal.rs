use chrono::{Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::checked;
use crate::error::FinLitError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::{require_positive, FinLitResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalInput {
    pub goal_amount: Money,
    #[serde(default)]
    pub current_saved: Money,
    pub monthly_savings: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProjection {
    pub remaining: Money,
    pub reachable: bool,
    pub months_to_goal: Option<u32>,
    pub projected_date: Option<NaiveDate>,
}

/// Months of saving at the current pace until `goal_amount` is reached
/// (no interest; partial months round up).
pub fn project_goal(input: &GoalInput) -> FinLitResult<ComputationOutput<GoalProjection>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_positive("goal_amount", input.goal_amount)?;
    if input.current_saved < Decimal::ZERO {
        return Err(FinLitError::InvalidInput {
            field: "current_saved".into(),
            reason: "current_saved must be >= 0".into(),
        });
    }

    let remaining = (input.goal_amount - input.current_saved).max(Decimal::ZERO);

    let months_to_goal = if remaining.is_zero() {
        Some(0)
    } else if input.monthly_savings <= Decimal::ZERO {
        warnings.push("Monthly savings is not positive: goal cannot be reached".into());
        None
    } else {
        let months = checked::div(remaining, input.monthly_savings, "monthly_savings")?.ceil();
        let m = months.to_u32();
        if m.is_none() {
            warnings.push(format!("Goal is {months} months away; too far to project"));
        }
        m
    };

    let projected_date = match (input.start_date, months_to_goal) {
        (Some(date), Some(m)) => date.checked_add_months(Months::new(m)),
        _ => None,
    };

    let result = GoalProjection {
        remaining,
        reachable: months_to_goal.is_some(),
        months_to_goal,
        projected_date,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Time to savings goal (linear, no interest)",
        &serde_json::json!({
            "monthly_savings": input.monthly_savings.to_string(),
        }),
        warnings,
        elapsed,
        result,
    ))
}
