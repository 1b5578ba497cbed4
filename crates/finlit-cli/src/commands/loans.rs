use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finlit_core::loans::amortization;
use finlit_core::loans::emi::{self, LoanInput};

use crate::input;

/// Arguments shared by the EMI and amortization commands
#[derive(Args)]
pub struct LoanArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (0 for an interest-free loan)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan tenure in years
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

fn loan_input(args: LoanArgs) -> Result<LoanInput, Box<dyn std::error::Error>> {
    if let Some(record) = input::read_record(args.input.as_deref())? {
        return Ok(record);
    }
    Ok(LoanInput {
        principal: args.principal.ok_or("--principal is required (or provide --input)")?,
        annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
        term_years: args.years.ok_or("--years is required (or provide --input)")?,
    })
}

pub fn run_emi(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let result = emi::calculate_emi(&loan_input(args)?)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_amortization(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let result = amortization::amortization_schedule(&loan_input(args)?)?;
    Ok(serde_json::to_value(result)?)
}
