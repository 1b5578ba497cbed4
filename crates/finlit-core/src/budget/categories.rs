use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Commitments that recur at the same amount every month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedExpense {
    Rent,
    Utilities,
    LoanEmi,
    Insurance,
    Education,
    Subscriptions,
}

/// Discretionary spending that moves month to month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableExpense {
    Groceries,
    Transport,
    Dining,
    Entertainment,
    Shopping,
    Healthcare,
    Miscellaneous,
}

impl FixedExpense {
    pub const ALL: [FixedExpense; 6] = [
        FixedExpense::Rent,
        FixedExpense::Utilities,
        FixedExpense::LoanEmi,
        FixedExpense::Insurance,
        FixedExpense::Education,
        FixedExpense::Subscriptions,
    ];

    /// Form field key, matching the serde name.
    pub fn key(self) -> &'static str {
        match self {
            FixedExpense::Rent => "rent",
            FixedExpense::Utilities => "utilities",
            FixedExpense::LoanEmi => "loan_emi",
            FixedExpense::Insurance => "insurance",
            FixedExpense::Education => "education",
            FixedExpense::Subscriptions => "subscriptions",
        }
    }
}

impl VariableExpense {
    pub const ALL: [VariableExpense; 7] = [
        VariableExpense::Groceries,
        VariableExpense::Transport,
        VariableExpense::Dining,
        VariableExpense::Entertainment,
        VariableExpense::Shopping,
        VariableExpense::Healthcare,
        VariableExpense::Miscellaneous,
    ];

    pub fn key(self) -> &'static str {
        match self {
            VariableExpense::Groceries => "groceries",
            VariableExpense::Transport => "transport",
            VariableExpense::Dining => "dining",
            VariableExpense::Entertainment => "entertainment",
            VariableExpense::Shopping => "shopping",
            VariableExpense::Healthcare => "healthcare",
            VariableExpense::Miscellaneous => "miscellaneous",
        }
    }
}

impl fmt::Display for FixedExpense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for VariableExpense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FixedExpense {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FixedExpense::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

impl FromStr for VariableExpense {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VariableExpense::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_match_serde_names() {
        for c in FixedExpense::ALL {
            let json = serde_json::to_string(&c).unwrap();
            assert_eq!(json, format!("\"{}\"", c.key()));
        }
        for c in VariableExpense::ALL {
            let json = serde_json::to_string(&c).unwrap();
            assert_eq!(json, format!("\"{}\"", c.key()));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Loan_EMI".parse::<FixedExpense>(), Ok(FixedExpense::LoanEmi));
        assert!("rent".parse::<VariableExpense>().is_err());
    }
}
