pub mod budget;
pub mod games;
pub mod investment;
pub mod loans;
