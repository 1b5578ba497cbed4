pub mod categories;
pub mod goal;
pub mod prediction;
pub mod summary;

pub use categories::{FixedExpense, VariableExpense};
pub use summary::BudgetProfile;
