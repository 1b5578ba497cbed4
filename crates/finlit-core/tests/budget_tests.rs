use std::collections::BTreeMap;

use finlit_core::budget::goal::{project_goal, GoalInput};
use finlit_core::budget::prediction::{assess_prediction, prediction_request, PredictionResponse};
use finlit_core::budget::summary::summarize_budget;
use finlit_core::budget::{BudgetProfile, FixedExpense, VariableExpense};
use finlit_core::Ratio;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn student_budget() -> BudgetProfile {
    BudgetProfile {
        income: dec!(25000),
        fixed: BTreeMap::from([
            (FixedExpense::Rent, dec!(9000)),
            (FixedExpense::Subscriptions, dec!(499)),
        ]),
        variable: BTreeMap::from([
            (VariableExpense::Groceries, dec!(4500)),
            (VariableExpense::Transport, dec!(1500)),
            (VariableExpense::Entertainment, dec!(2000)),
        ]),
        desired_savings: dec!(5000),
    }
}

#[test]
fn test_savings_identity() {
    let profile = student_budget();
    let s = summarize_budget(&profile).unwrap().result;
    assert_eq!(s.total_expense, s.fixed_total + s.variable_total);
    assert_eq!(s.current_savings, profile.income - s.total_expense);
    assert_eq!(s.current_savings, dec!(7501));
    assert_eq!(s.savings_rate_percent, Ratio::Value(dec!(30.00)));
    assert_eq!(s.desired_shortfall, Decimal::ZERO);
}

#[test]
fn test_zero_income_savings_rate_is_na() {
    let profile = BudgetProfile {
        income: Decimal::ZERO,
        ..student_budget()
    };
    let out = summarize_budget(&profile).unwrap();
    assert_eq!(out.result.savings_rate_percent, Ratio::NotApplicable);
    assert_eq!(out.result.current_savings, dec!(-17499));

    let json = serde_json::to_value(&out.result).unwrap();
    assert_eq!(json["savings_rate_percent"], "N/A");
    assert!(!out.warnings.is_empty());
}

#[test]
fn test_zero_income_and_no_expenses() {
    let out = summarize_budget(&BudgetProfile::default()).unwrap();
    assert_eq!(out.result.current_savings, Decimal::ZERO);
    assert_eq!(out.result.savings_rate_percent, Ratio::NotApplicable);
}

#[test]
fn test_form_to_payload_pipeline() {
    let fields = BTreeMap::from([
        ("income".to_string(), "30000".to_string()),
        ("desired_savings".to_string(), "six thousand".to_string()),
        ("rent".to_string(), "10000".to_string()),
        ("shopping".to_string(), "-50".to_string()),
    ]);
    let parsed = BudgetProfile::from_form(&fields);
    assert_eq!(parsed.warnings.len(), 2);

    let req = prediction_request(&parsed.profile).unwrap();
    assert_eq!(req.income, dec!(30000));
    assert_eq!(req.desired_savings, Decimal::ZERO);
    assert_eq!(req.rent, dec!(10000));
    assert_eq!(req.shopping, Decimal::ZERO);

    let json = serde_json::to_value(&req).unwrap();
    for (_, v) in json.as_object().unwrap() {
        assert!(v.is_number());
    }
}

#[test]
fn test_prediction_response_parses_numbers() {
    let resp: PredictionResponse = serde_json::from_str(
        r#"{"feasible": false, "predicted_savings": 4200, "desired_savings": 6000}"#,
    )
    .unwrap();
    let a = assess_prediction(&resp).unwrap().result;
    assert_eq!(a.achievement_percent, Ratio::Value(dec!(70)));
    assert_eq!(a.shortfall, dec!(1800));
}

#[test]
fn test_goal_projection_from_budget_savings() {
    let summary = summarize_budget(&student_budget()).unwrap().result;
    let out = project_goal(&GoalInput {
        goal_amount: dec!(60000),
        current_saved: dec!(15000),
        monthly_savings: summary.current_savings,
        start_date: None,
    })
    .unwrap();
    // 45,000 / 7,501 = 5.999 -> 6 months
    assert_eq!(out.result.months_to_goal, Some(6));
    assert!(out.result.reachable);
}
