use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RealtyCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::RealtyCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a compound-appreciation projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppreciationInput {
    /// Purchase / current value of the asset
    pub initial_value: Money,
    /// Annual appreciation rate as a percentage. May be negative
    /// (depreciation) down to -100, a total loss.
    pub annual_rate_pct: Rate,
    /// Holding period in years
    pub holding_years: u32,
}

/// Projected returns over the holding period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppreciationOutput {
    /// initial_value * (1 + rate/100)^holding_years
    pub future_value: Money,
    /// future_value - initial_value
    pub total_gain: Money,
    /// total_gain / holding_years — a linear average, not re-compounded
    pub annual_gain: Money,
    /// annual_gain / 12 — a linear average, not re-compounded
    pub monthly_gain: Money,
    /// Projected value at the end of each year, for charting
    pub yearly_values: Vec<Money>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project the future value of a property under constant-rate annual
/// compounding (lump sum, one compounding per year).
///
/// The per-year and per-month gain figures are plain averages of the total
/// gain over the holding period. The source dashboard displays them that
/// way; they must not be recomputed via a finer-grained compounding model.
pub fn calculate_appreciation(
    input: &AppreciationInput,
) -> RealtyCalcResult<ComputationOutput<AppreciationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input, &mut warnings)?;

    let growth_factor = Decimal::ONE + input.annual_rate_pct / dec!(100);

    let mut yearly_values = Vec::with_capacity(input.holding_years as usize);
    let mut value = input.initial_value;
    for _ in 0..input.holding_years {
        value = value
            .checked_mul(growth_factor)
            .ok_or_else(|| RealtyCalcError::InvalidInput {
                field: "annual_rate_pct".into(),
                reason: "Rate and holding period combination overflows the decimal range".into(),
            })?;
        yearly_values.push(value);
    }

    let future_value = value;
    let total_gain = future_value - input.initial_value;
    let annual_gain = total_gain / Decimal::from(input.holding_years);
    let monthly_gain = annual_gain / dec!(12);

    let output = AppreciationOutput {
        future_value,
        total_gain,
        annual_gain,
        monthly_gain,
        yearly_values,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Compound Appreciation Projection (Annual Compounding)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &AppreciationInput, warnings: &mut Vec<String>) -> RealtyCalcResult<()> {
    if input.initial_value <= Decimal::ZERO {
        return Err(RealtyCalcError::InvalidInput {
            field: "initial_value".into(),
            reason: "Initial value must be positive".into(),
        });
    }

    if input.holding_years < 1 {
        return Err(RealtyCalcError::InvalidInput {
            field: "holding_years".into(),
            reason: "Holding period must be at least 1 year".into(),
        });
    }

    if input.annual_rate_pct < dec!(-100) {
        return Err(RealtyCalcError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Appreciation rate cannot be below -100%".into(),
        });
    }

    if input.annual_rate_pct > dec!(30) {
        warnings.push(format!(
            "Appreciation rate {}% exceeds 30% — well above historical market norms",
            input.annual_rate_pct
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
