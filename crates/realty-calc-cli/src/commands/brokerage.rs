use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use realty_calc_core::brokerage::{self, BrokerageInput};

use crate::input;

/// Arguments for brokerage calculation
#[derive(Args)]
pub struct BrokerageArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Transaction / deal value
    #[arg(long)]
    pub value: Option<Decimal>,

    /// Brokerage rate in percent (e.g. 1)
    #[arg(long)]
    pub rate: Option<Decimal>,
}

pub fn run_brokerage(args: BrokerageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let brokerage_input: BrokerageInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let value = args
            .value
            .ok_or("--value is required (or provide --input)")?;
        let rate = args.rate.ok_or("--rate is required (or provide --input)")?;

        BrokerageInput {
            deal_value: value,
            rate_pct: rate,
        }
    };

    let result = brokerage::calculate_brokerage(&brokerage_input)?;
    Ok(serde_json::to_value(result)?)
}
