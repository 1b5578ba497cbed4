use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use super::categories::{FixedExpense, VariableExpense};
use crate::checked;
use crate::error::FinLitError;
use crate::types::{with_metadata, ComputationOutput, Money, Ratio};
use crate::FinLitResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Monthly income, spending by category, and the savings the user wants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetProfile {
    pub income: Money,
    #[serde(default)]
    pub fixed: BTreeMap<FixedExpense, Money>,
    #[serde(default)]
    pub variable: BTreeMap<VariableExpense, Money>,
    #[serde(default)]
    pub desired_savings: Money,
}

/// A profile built from raw form strings, plus one warning per field that
/// had to be coerced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedBudgetForm {
    pub profile: BudgetProfile,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub fixed_total: Money,
    pub variable_total: Money,
    pub total_expense: Money,
    pub current_savings: Money,
    /// `current_savings / income × 100`, or "N/A" when income is zero.
    pub savings_rate_percent: Ratio,
    /// How far current savings fall short of the desired amount (never negative).
    pub desired_shortfall: Money,
}

// ---------------------------------------------------------------------------
// Form coercion
// ---------------------------------------------------------------------------

impl BudgetProfile {
    /// Coerce string form fields into a profile. Blank fields count as zero;
    /// unparseable or negative values become zero with a warning; unknown
    /// keys are reported and dropped.
    pub fn from_form(fields: &BTreeMap<String, String>) -> ParsedBudgetForm {
        let mut profile = BudgetProfile::default();
        let mut warnings = Vec::new();

        for (key, raw) in fields {
            let value = coerce_amount(key, raw, &mut warnings);
            let k = key.trim();
            if k.eq_ignore_ascii_case("income") {
                profile.income = value;
            } else if k.eq_ignore_ascii_case("desired_savings") {
                profile.desired_savings = value;
            } else if let Ok(cat) = k.parse::<FixedExpense>() {
                profile.fixed.insert(cat, value);
            } else if let Ok(cat) = k.parse::<VariableExpense>() {
                profile.variable.insert(cat, value);
            } else {
                warnings.push(format!("Unknown budget field '{key}' ignored"));
            }
        }

        ParsedBudgetForm { profile, warnings }
    }

    pub fn fixed_amount(&self, category: FixedExpense) -> Money {
        self.fixed.get(&category).copied().unwrap_or_default()
    }

    pub fn variable_amount(&self, category: VariableExpense) -> Money {
        self.variable.get(&category).copied().unwrap_or_default()
    }

    fn validate(&self) -> FinLitResult<()> {
        if self.income < Decimal::ZERO {
            return Err(negative("income"));
        }
        if self.desired_savings < Decimal::ZERO {
            return Err(negative("desired_savings"));
        }
        if let Some((cat, _)) = self.fixed.iter().find(|(_, v)| **v < Decimal::ZERO) {
            return Err(negative(cat.key()));
        }
        if let Some((cat, _)) = self.variable.iter().find(|(_, v)| **v < Decimal::ZERO) {
            return Err(negative(cat.key()));
        }
        Ok(())
    }
}

fn negative(field: &str) -> FinLitError {
    FinLitError::InvalidInput {
        field: field.into(),
        reason: format!("{field} must be >= 0"),
    }
}

fn coerce_amount(key: &str, raw: &str, warnings: &mut Vec<String>) -> Money {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    match trimmed.parse::<Decimal>() {
        Ok(v) if v >= Decimal::ZERO => v,
        Ok(v) => {
            warnings.push(format!("Field '{key}' is negative ({v}); using 0"));
            Decimal::ZERO
        }
        Err(_) => {
            tracing::debug!(key, raw, "coercing unparseable budget field to zero");
            warnings.push(format!("Field '{key}' is not a number ('{raw}'); using 0"));
            Decimal::ZERO
        }
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Totals, current savings and savings rate for a monthly budget.
pub fn summarize_budget(profile: &BudgetProfile) -> FinLitResult<ComputationOutput<BudgetSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    profile.validate()?;

    let fixed_total = checked::sum(profile.fixed.values(), "fixed_total")?;
    let variable_total = checked::sum(profile.variable.values(), "variable_total")?;
    let total_expense = checked::add(fixed_total, variable_total, "total_expense")?;
    let current_savings = profile.income - total_expense;

    let savings_rate_percent = Ratio::percent_of(current_savings, profile.income)?.round_dp(2);
    if !savings_rate_percent.is_applicable() {
        warnings.push("Income is zero: savings rate is not applicable".into());
    }
    if current_savings < Decimal::ZERO {
        warnings.push(format!(
            "Expenses exceed income by {}",
            (-current_savings).round_dp(2)
        ));
    }

    let desired_shortfall =
        checked::sub(profile.desired_savings, current_savings, "desired_shortfall")?.max(Decimal::ZERO);

    let result = BudgetSummary {
        fixed_total,
        variable_total,
        total_expense,
        current_savings,
        savings_rate_percent,
        desired_shortfall,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly budget summary",
        &serde_json::json!({
            "fixed_categories": profile.fixed.len(),
            "variable_categories": profile.variable.len(),
        }),
        warnings,
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn sample_profile() -> BudgetProfile {
        BudgetProfile {
            income: dec!(50000),
            fixed: BTreeMap::from([
                (FixedExpense::Rent, dec!(15000)),
                (FixedExpense::Utilities, dec!(3000)),
            ]),
            variable: BTreeMap::from([
                (VariableExpense::Groceries, dec!(8000)),
                (VariableExpense::Dining, dec!(4000)),
            ]),
            desired_savings: dec!(25000),
        }
    }

    #[test]
    fn test_summary_totals() {
        let out = summarize_budget(&sample_profile()).unwrap();
        assert_eq!(
            out.result,
            BudgetSummary {
                fixed_total: dec!(18000),
                variable_total: dec!(12000),
                total_expense: dec!(30000),
                current_savings: dec!(20000),
                savings_rate_percent: Ratio::Value(dec!(40)),
                desired_shortfall: dec!(5000),
            }
        );
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_summary_rejects_negative_category() {
        let mut p = sample_profile();
        p.variable.insert(VariableExpense::Shopping, dec!(-1));
        assert!(summarize_budget(&p).is_err());
    }

    #[test]
    fn test_summary_overflowing_totals_give_no_result() {
        let mut p = sample_profile();
        p.fixed.insert(FixedExpense::Rent, Decimal::MAX);
        p.fixed.insert(FixedExpense::Insurance, Decimal::MAX);
        assert!(summarize_budget(&p).is_err());

        let p = BudgetProfile {
            income: Decimal::ZERO,
            fixed: BTreeMap::from([(FixedExpense::Rent, Decimal::MAX)]),
            variable: BTreeMap::new(),
            desired_savings: Decimal::MAX,
        };
        assert!(summarize_budget(&p).is_err());
    }

    #[test]
    fn test_from_form_coerces_bad_values() {
        let fields = BTreeMap::from([
            ("income".to_string(), "42000".to_string()),
            ("rent".to_string(), "abc".to_string()),
            ("groceries".to_string(), " 6500.50 ".to_string()),
            ("dining".to_string(), "".to_string()),
            ("yacht".to_string(), "100".to_string()),
        ]);
        let parsed = BudgetProfile::from_form(&fields);
        assert_eq!(parsed.profile.income, dec!(42000));
        assert_eq!(parsed.profile.fixed_amount(FixedExpense::Rent), Decimal::ZERO);
        assert_eq!(
            parsed.profile.variable_amount(VariableExpense::Groceries),
            dec!(6500.50)
        );
        assert_eq!(parsed.warnings.len(), 2);
    }
}
