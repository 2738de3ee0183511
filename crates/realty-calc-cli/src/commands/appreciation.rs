use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use realty_calc_core::appreciation::{self, AppreciationInput};

use crate::input;

/// Arguments for compound appreciation projection
#[derive(Args)]
pub struct AppreciationArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase / current value of the property
    #[arg(long)]
    pub value: Option<Decimal>,

    /// Annual appreciation rate in percent (negative for depreciation)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Holding period in years
    #[arg(long)]
    pub years: Option<u32>,
}

pub fn run_appreciation(args: AppreciationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let appreciation_input: AppreciationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let value = args
            .value
            .ok_or("--value is required (or provide --input)")?;
        let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
        let years = args
            .years
            .ok_or("--years is required (or provide --input)")?;

        AppreciationInput {
            initial_value: value,
            annual_rate_pct: rate,
            holding_years: years,
        }
    };

    let result = appreciation::calculate_appreciation(&appreciation_input)?;
    Ok(serde_json::to_value(result)?)
}
