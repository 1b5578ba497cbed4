use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finlit_core::config::EngineConfig;
use finlit_core::investment::fixed_deposit::{self, FixedDepositInput};
use finlit_core::investment::ppf::{self, PpfInput};
use finlit_core::investment::sip::{self, SipInput};

use crate::input;

/// Arguments for SIP future value
#[derive(Args)]
pub struct SipArgs {
    /// Monthly contribution
    #[arg(long)]
    pub monthly: Option<Decimal>,

    /// Expected annual return in percent (e.g. 12 for 12%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Investment horizon in years
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for fixed deposit maturity
#[derive(Args)]
pub struct FdArgs {
    /// Amount deposited
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Deposit tenure in years
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for PPF maturity
#[derive(Args)]
pub struct PpfArgs {
    /// Monthly deposit
    #[arg(long)]
    pub monthly: Option<Decimal>,

    /// Years of deposits (PPF lock-in is 15)
    #[arg(long, default_value = "15")]
    pub years: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_sip(args: SipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sip_input = match input::read_record::<SipInput>(args.input.as_deref())? {
        Some(record) => record,
        None => SipInput {
            monthly_contribution: args.monthly.ok_or("--monthly is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
        },
    };
    let result = sip::calculate_sip(&sip_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_fd(args: FdArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fd_input = match input::read_record::<FixedDepositInput>(args.input.as_deref())? {
        Some(record) => record,
        None => FixedDepositInput {
            principal: args.principal.ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
        },
    };
    let result = fixed_deposit::calculate_fixed_deposit(&fd_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_ppf(args: PpfArgs, config: &EngineConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let ppf_input = match input::read_record::<PpfInput>(args.input.as_deref())? {
        Some(record) => record,
        None => PpfInput {
            monthly_contribution: args.monthly.ok_or("--monthly is required (or provide --input)")?,
            years: args.years,
            annual_rate_percent: None,
        },
    };
    let result = ppf::calculate_ppf(&ppf_input, config)?;
    Ok(serde_json::to_value(result)?)
}
