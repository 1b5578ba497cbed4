pub mod fixed_deposit;
pub mod ppf;
pub mod sip;

use serde::{Deserialize, Serialize};

use crate::types::{round_display, Money};

/// Outcome shared by the SIP, FD and PPF calculators.
///
/// `future_value == total_contributed + total_gain` holds exactly because the
/// gain is derived by subtraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentResult {
    pub future_value: Money,
    pub total_contributed: Money,
    pub total_gain: Money,
}

impl InvestmentResult {
    pub(crate) fn from_parts(future_value: Money, total_contributed: Money) -> Self {
        Self {
            future_value,
            total_contributed,
            total_gain: future_value - total_contributed,
        }
    }

    /// Whole-currency figures for display. The gain is re-derived from the
    /// rounded totals so the displayed identity still adds up.
    pub fn rounded(&self) -> Self {
        Self::from_parts(
            round_display(self.future_value),
            round_display(self.total_contributed),
        )
    }
}
