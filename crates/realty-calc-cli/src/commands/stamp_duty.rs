use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use realty_calc_core::stamp_duty::{self, Jurisdiction, PropertyCategory, StampDutyInput};

use crate::input;

/// Arguments for stamp duty calculation
#[derive(Args)]
pub struct StampDutyArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Property value
    #[arg(long)]
    pub value: Option<Decimal>,

    /// State, e.g. "maharashtra" (unrecognised names use the default rate)
    #[arg(long)]
    pub jurisdiction: Option<String>,

    /// Property category: residential, commercial, or land
    #[arg(long)]
    pub category: Option<String>,

    /// Fail on unmapped (jurisdiction, category) pairs instead of
    /// falling back to the default rate
    #[arg(long)]
    pub strict: bool,
}

pub fn run_stamp_duty(args: StampDutyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let duty_input: StampDutyInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let value = args
            .value
            .ok_or("--value is required (or provide --input)")?;
        let jurisdiction: Jurisdiction = args
            .jurisdiction
            .as_deref()
            .ok_or("--jurisdiction is required (or provide --input)")?
            .parse()?;
        let category: PropertyCategory = args
            .category
            .as_deref()
            .ok_or("--category is required (or provide --input)")?
            .parse()?;

        StampDutyInput {
            property_value: value,
            jurisdiction,
            category,
            strict: args.strict,
        }
    };

    let result = stamp_duty::calculate_stamp_duty(&duty_input)?;
    Ok(serde_json::to_value(result)?)
}
