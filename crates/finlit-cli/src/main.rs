mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::budget::{BudgetArgs, GoalAssessmentArgs, GoalProjectionArgs};
use commands::games::{ReplayArgs, ScenarioArgs};
use commands::investment::{FdArgs, PpfArgs, SipArgs};
use commands::loans::LoanArgs;

/// Personal-finance calculators and learning-game scoring
#[derive(Parser)]
#[command(
    name = "finlit",
    version,
    about = "Personal-finance calculators and learning-game scoring",
    long_about = "A CLI for savings and loan arithmetic with decimal precision. \
                  Supports SIP, fixed deposit and PPF growth, EMI and amortization, \
                  budget summaries and savings goals, and replays of the bill-split \
                  and fraud-quiz games."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Engine config file (YAML or JSON)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log debug detail to stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Future value of a monthly SIP
    Sip(SipArgs),
    /// Maturity value of a fixed deposit
    Fd(FdArgs),
    /// Maturity value of PPF deposits at the configured rate
    Ppf(PpfArgs),
    /// Monthly instalment for a loan
    Emi(LoanArgs),
    /// Month-by-month loan amortization schedule
    Amortization(LoanArgs),
    /// Budget totals and savings rate
    Budget(BudgetArgs),
    /// Build the prediction-service request for a budget
    PredictionPayload(BudgetArgs),
    /// Interpret a prediction-service response
    GoalAssessment(GoalAssessmentArgs),
    /// Months until a savings goal is reached
    GoalProjection(GoalProjectionArgs),
    /// Replay a bill-split game session
    BillSplit(ReplayArgs),
    /// Replay a fraud-quiz game session
    FraudQuiz(ReplayArgs),
    /// Generate seeded bill-split scenarios
    Scenarios(ScenarioArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "finlit=debug,finlit_core=debug" } else { "finlit=warn,finlit_core=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match input::config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(2);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Sip(args) => commands::investment::run_sip(args),
        Commands::Fd(args) => commands::investment::run_fd(args),
        Commands::Ppf(args) => commands::investment::run_ppf(args, &config),
        Commands::Emi(args) => commands::loans::run_emi(args),
        Commands::Amortization(args) => commands::loans::run_amortization(args),
        Commands::Budget(args) => commands::budget::run_budget(args),
        Commands::PredictionPayload(args) => commands::budget::run_prediction_payload(args),
        Commands::GoalAssessment(args) => commands::budget::run_goal_assessment(args),
        Commands::GoalProjection(args) => commands::budget::run_goal_projection(args),
        Commands::BillSplit(args) => commands::games::run_bill_split(args, &config),
        Commands::FraudQuiz(args) => commands::games::run_fraud_quiz(args, &config),
        Commands::Scenarios(args) => commands::games::run_scenarios(args, &config),
        Commands::Version => {
            println!("finlit {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => output::format_output(&cli.output, &value),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
