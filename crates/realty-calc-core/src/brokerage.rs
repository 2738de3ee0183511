use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RealtyCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::RealtyCalcResult;

/// Input parameters for brokerage calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerageInput {
    /// Transaction / deal value
    pub deal_value: Money,
    /// Flat brokerage rate as a percentage (1 = 1%), supplied by the caller
    pub rate_pct: Rate,
}

/// Brokerage calculation output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerageOutput {
    /// deal_value * rate_pct / 100
    pub amount: Money,
    pub applied_rate_pct: Rate,
    /// deal_value - amount (seller net proceeds)
    pub net_of_brokerage: Money,
}

/// Apply a flat percentage brokerage rate to a deal value.
pub fn calculate_brokerage(
    input: &BrokerageInput,
) -> RealtyCalcResult<ComputationOutput<BrokerageOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.deal_value <= Decimal::ZERO {
        return Err(RealtyCalcError::InvalidInput {
            field: "deal_value".into(),
            reason: "Deal value must be positive".into(),
        });
    }

    if input.rate_pct < Decimal::ZERO {
        return Err(RealtyCalcError::InvalidInput {
            field: "rate_pct".into(),
            reason: "Brokerage rate cannot be negative".into(),
        });
    }

    if input.rate_pct > dec!(5) {
        warnings.push(format!(
            "Brokerage rate {}% exceeds 5% — well above market norms",
            input.rate_pct
        ));
    }

    let amount = input.deal_value * input.rate_pct / dec!(100);
    let net_of_brokerage = input.deal_value - amount;

    let output = BrokerageOutput {
        amount,
        applied_rate_pct: input.rate_pct,
        net_of_brokerage,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Flat-Rate Brokerage",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_one_percent_brokerage() {
        // 50L at 1% = 50k
        let input = BrokerageInput {
            deal_value: dec!(5000000),
            rate_pct: dec!(1),
        };
        let result = calculate_brokerage(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.amount, dec!(50000));
        assert_eq!(out.applied_rate_pct, dec!(1));
        assert_eq!(out.net_of_brokerage, dec!(4950000));
    }

    #[test]
    fn test_linear_in_deal_value_and_rate() {
        let base = BrokerageInput {
            deal_value: dec!(1000000),
            rate_pct: dec!(2),
        };
        let double_value = BrokerageInput {
            deal_value: dec!(2000000),
            rate_pct: dec!(2),
        };
        let double_rate = BrokerageInput {
            deal_value: dec!(1000000),
            rate_pct: dec!(4),
        };

        let base_amount = calculate_brokerage(&base).unwrap().result.amount;
        assert_eq!(
            calculate_brokerage(&double_value).unwrap().result.amount,
            base_amount * dec!(2)
        );
        assert_eq!(
            calculate_brokerage(&double_rate).unwrap().result.amount,
            base_amount * dec!(2)
        );
    }

    #[test]
    fn test_zero_rate() {
        let input = BrokerageInput {
            deal_value: dec!(1000000),
            rate_pct: Decimal::ZERO,
        };
        let result = calculate_brokerage(&input).unwrap();

        assert_eq!(result.result.amount, Decimal::ZERO);
        assert_eq!(result.result.net_of_brokerage, dec!(1000000));
    }

    #[test]
    fn test_zero_deal_value_error() {
        let input = BrokerageInput {
            deal_value: Decimal::ZERO,
            rate_pct: dec!(1),
        };
        let result = calculate_brokerage(&input);

        assert!(result.is_err());
        match result.unwrap_err() {
            RealtyCalcError::InvalidInput { field, .. } => assert_eq!(field, "deal_value"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_rate_error() {
        let input = BrokerageInput {
            deal_value: dec!(1000000),
            rate_pct: dec!(-0.5),
        };
        assert!(calculate_brokerage(&input).is_err());
    }

    #[test]
    fn test_high_rate_warning() {
        let input = BrokerageInput {
            deal_value: dec!(1000000),
            rate_pct: dec!(8),
        };
        let result = calculate_brokerage(&input).unwrap();
        let has_warning = result.warnings.iter().any(|w| w.contains("exceeds 5%"));
        assert!(has_warning, "Expected high-rate warning at 8%");
    }
}
