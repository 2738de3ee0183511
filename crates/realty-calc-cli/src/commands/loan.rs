use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use realty_calc_core::loan::{self, LoanInput};

use crate::input;

/// Arguments for EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Include a per-year amortization schedule
    #[arg(long)]
    pub schedule: bool,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: LoanInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let principal = args
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
        let years = args
            .years
            .ok_or("--years is required (or provide --input)")?;

        LoanInput {
            principal,
            annual_rate_pct: rate,
            term_years: years,
            include_schedule: args.schedule,
        }
    };

    let result = loan::calculate_emi(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}
