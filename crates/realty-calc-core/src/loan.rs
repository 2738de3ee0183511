use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RealtyCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::RealtyCalcResult;

/// Hard cap on loan terms. Keeps the month count and the compounding loop
/// inside the decimal range.
const MAX_TERM_YEARS: u32 = 100;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for EMI calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Loan principal
    pub principal: Money,
    /// Annual interest rate as a percentage (8.5 = 8.5%)
    pub annual_rate_pct: Rate,
    /// Loan term in years
    pub term_years: u32,
    /// Include a per-year amortization schedule in the output
    #[serde(default)]
    pub include_schedule: bool,
}

/// One year of the amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationYear {
    pub year: u32,
    pub opening_balance: Money,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub closing_balance: Money,
}

/// EMI calculation output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanOutput {
    /// Fixed monthly installment
    pub monthly_payment: Money,
    /// monthly_payment * term_years * 12
    pub total_payment: Money,
    /// total_payment - principal
    pub total_interest: Money,
    /// Per-year repayment breakdown (if requested)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<AmortizationYear>>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the equated monthly installment for a fixed-rate loan.
///
/// Uses the standard amortization formula `P * r(1+r)^n / ((1+r)^n - 1)`
/// with a straight-line branch for zero-interest loans. Results are full
/// precision; rounding is the caller's concern.
pub fn calculate_emi(input: &LoanInput) -> RealtyCalcResult<ComputationOutput<LoanOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input, &mut warnings)?;

    let monthly_rate = input.annual_rate_pct / dec!(12) / dec!(100);
    let total_months = input.term_years * 12;

    let monthly_payment = compute_monthly_payment(input.principal, monthly_rate, total_months)?;
    let total_payment = monthly_payment * Decimal::from(total_months);
    let total_interest = total_payment - input.principal;

    let schedule = if input.include_schedule {
        Some(build_schedule(
            input.principal,
            monthly_rate,
            monthly_payment,
            input.term_years,
        ))
    } else {
        None
    };

    let output = LoanOutput {
        monthly_payment,
        total_payment,
        total_interest,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Equated Monthly Installment (Fixed-Rate Amortization)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &LoanInput, warnings: &mut Vec<String>) -> RealtyCalcResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(RealtyCalcError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }

    if input.annual_rate_pct < Decimal::ZERO {
        return Err(RealtyCalcError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }

    if input.term_years < 1 {
        return Err(RealtyCalcError::InvalidInput {
            field: "term_years".into(),
            reason: "Loan term must be at least 1 year".into(),
        });
    }

    if input.term_years > MAX_TERM_YEARS {
        return Err(RealtyCalcError::InvalidInput {
            field: "term_years".into(),
            reason: format!("Loan term cannot exceed {MAX_TERM_YEARS} years"),
        });
    }

    if input.annual_rate_pct > dec!(15) {
        warnings.push(format!(
            "Interest rate {}% exceeds 15% — unusually high for a property loan",
            input.annual_rate_pct
        ));
    }

    if input.term_years > 30 {
        warnings.push(format!(
            "Term of {} years exceeds typical lender limits (30 years)",
            input.term_years
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Payment and schedule
// ---------------------------------------------------------------------------

/// Standard fixed-rate payment: P * r(1+r)^n / ((1+r)^n - 1)
fn compute_monthly_payment(
    principal: Money,
    monthly_rate: Rate,
    total_months: u32,
) -> RealtyCalcResult<Money> {
    if total_months == 0 {
        return Err(RealtyCalcError::DivisionByZero {
            context: "monthly payment with zero months".into(),
        });
    }

    if monthly_rate.is_zero() {
        // Interest-free: straight-line amortization
        return Ok(principal / Decimal::from(total_months));
    }

    // (1 + r)^n via iterative multiplication, erroring instead of
    // panicking if an extreme rate/term pair leaves the decimal range
    let growth = Decimal::ONE + monthly_rate;
    let mut compound = Decimal::ONE;
    for _ in 0..total_months {
        compound = compound
            .checked_mul(growth)
            .ok_or_else(|| RealtyCalcError::InvalidInput {
                field: "annual_rate_pct".into(),
                reason: "Rate and term combination overflows the decimal range".into(),
            })?;
    }

    let numerator = principal
        .checked_mul(monthly_rate)
        .and_then(|v| v.checked_mul(compound))
        .ok_or_else(|| RealtyCalcError::InvalidInput {
            field: "principal".into(),
            reason: "Principal, rate and term combination overflows the decimal range".into(),
        })?;
    let denominator = compound - Decimal::ONE;

    if denominator.is_zero() {
        return Err(RealtyCalcError::DivisionByZero {
            context: "EMI denominator".into(),
        });
    }

    Ok(numerator / denominator)
}

/// Walk the monthly schedule and aggregate it into yearly rows.
fn build_schedule(
    principal: Money,
    monthly_rate: Rate,
    monthly_payment: Money,
    term_years: u32,
) -> Vec<AmortizationYear> {
    let mut schedule = Vec::with_capacity(term_years as usize);
    let mut balance = principal;

    for year in 1..=term_years {
        let opening_balance = balance;
        let mut principal_paid = Decimal::ZERO;
        let mut interest_paid = Decimal::ZERO;

        for _ in 0..12 {
            let interest = balance * monthly_rate;
            let mut principal_payment = monthly_payment - interest;
            if principal_payment > balance {
                principal_payment = balance;
            }
            interest_paid += interest;
            principal_paid += principal_payment;
            balance -= principal_payment;
        }

        if balance < Decimal::ZERO {
            balance = Decimal::ZERO;
        }

        schedule.push(AmortizationYear {
            year,
            opening_balance,
            principal_paid,
            interest_paid,
            closing_balance: balance,
        });
    }

    schedule
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_input() -> LoanInput {
        LoanInput {
            principal: dec!(2000000),
            annual_rate_pct: dec!(8.5),
            term_years: 20,
            include_schedule: false,
        }
    }

    #[test]
    fn test_emi_standard_home_loan() {
        // 20L at 8.5% over 20 years — expected ~17,356/month
        let result = calculate_emi(&sample_input()).unwrap();
        let out = &result.result;

        assert!(
            out.monthly_payment > dec!(17350) && out.monthly_payment < dec!(17360),
            "EMI {} outside expected range",
            out.monthly_payment
        );
    }

    #[test]
    fn test_total_payment_identity() {
        let result = calculate_emi(&sample_input()).unwrap();
        let out = &result.result;

        // total = monthly * 240, interest = total - principal
        assert_eq!(out.total_payment, out.monthly_payment * dec!(240));
        assert_eq!(out.total_interest, out.total_payment - dec!(2000000));
    }

    #[test]
    fn test_zero_interest_loan() {
        let input = LoanInput {
            principal: dec!(1200000),
            annual_rate_pct: Decimal::ZERO,
            term_years: 10,
            include_schedule: false,
        };
        let result = calculate_emi(&input).unwrap();
        let out = &result.result;

        // 12L / 120 months = 10,000/month, no interest
        assert_eq!(out.monthly_payment, dec!(10000));
        assert_eq!(out.total_payment, dec!(1200000));
        assert_eq!(out.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_one_year_term() {
        let input = LoanInput {
            principal: dec!(100000),
            annual_rate_pct: dec!(12),
            term_years: 1,
            include_schedule: false,
        };
        let result = calculate_emi(&input).unwrap();
        let out = &result.result;

        // 1L at 12% over 12 months ~8,885/month
        assert!(out.monthly_payment > dec!(8880) && out.monthly_payment < dec!(8890));
        assert!(out.total_interest > Decimal::ZERO);
    }

    #[test]
    fn test_schedule_structure() {
        let mut input = sample_input();
        input.include_schedule = true;
        let result = calculate_emi(&input).unwrap();
        let out = &result.result;

        let schedule = out.schedule.as_ref().unwrap();
        assert_eq!(schedule.len(), 20);

        // Year 1 opens at the full principal
        assert_eq!(schedule[0].opening_balance, dec!(2000000));
        assert_eq!(schedule[0].year, 1);

        // Final year closes at (effectively) zero
        let last = schedule.last().unwrap();
        assert!(
            last.closing_balance.abs() < dec!(0.01),
            "Final balance {} should be ~0",
            last.closing_balance
        );
    }

    #[test]
    fn test_schedule_principal_sums_to_loan() {
        let mut input = sample_input();
        input.include_schedule = true;
        let result = calculate_emi(&input).unwrap();
        let schedule = result.result.schedule.as_ref().unwrap();

        let total_principal: Decimal = schedule.iter().map(|y| y.principal_paid).sum();
        let diff = (total_principal - dec!(2000000)).abs();
        assert!(diff < dec!(0.01), "Principal drift: {diff}");
    }

    #[test]
    fn test_schedule_interest_declines() {
        let mut input = sample_input();
        input.include_schedule = true;
        let result = calculate_emi(&input).unwrap();
        let schedule = result.result.schedule.as_ref().unwrap();

        for pair in schedule.windows(2) {
            assert!(
                pair[1].interest_paid < pair[0].interest_paid,
                "Interest should decline year over year"
            );
        }
    }

    #[test]
    fn test_no_schedule_by_default() {
        let result = calculate_emi(&sample_input()).unwrap();
        assert!(result.result.schedule.is_none());
    }

    #[test]
    fn test_zero_principal_error() {
        let mut input = sample_input();
        input.principal = Decimal::ZERO;

        let result = calculate_emi(&input);
        assert!(result.is_err());
        match result.unwrap_err() {
            RealtyCalcError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_rate_error() {
        let mut input = sample_input();
        input.annual_rate_pct = dec!(-1);
        assert!(calculate_emi(&input).is_err());
    }

    #[test]
    fn test_zero_term_error() {
        let mut input = sample_input();
        input.term_years = 0;
        assert!(calculate_emi(&input).is_err());
    }

    #[test]
    fn test_term_over_cap_error() {
        let mut input = sample_input();
        input.term_years = 101;

        let result = calculate_emi(&input);
        assert!(result.is_err());
        match result.unwrap_err() {
            RealtyCalcError::InvalidInput { field, .. } => assert_eq!(field, "term_years"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_extreme_rate_overflow_is_error() {
        // Absurd rate over a maximal term must come back as an error,
        // not a decimal overflow panic
        let input = LoanInput {
            principal: dec!(1000000),
            annual_rate_pct: dec!(1000000),
            term_years: 100,
            include_schedule: false,
        };
        let result = calculate_emi(&input);
        assert!(matches!(
            result,
            Err(RealtyCalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_max_term_computes() {
        let input = LoanInput {
            principal: dec!(1000000),
            annual_rate_pct: dec!(8),
            term_years: 100,
            include_schedule: false,
        };
        let result = calculate_emi(&input).unwrap();
        assert!(result.result.monthly_payment > Decimal::ZERO);
    }

    #[test]
    fn test_high_rate_warning() {
        let mut input = sample_input();
        input.annual_rate_pct = dec!(18);

        let result = calculate_emi(&input).unwrap();
        let has_warning = result.warnings.iter().any(|w| w.contains("exceeds 15%"));
        assert!(has_warning, "Expected high-rate warning at 18%");
    }

    #[test]
    fn test_long_term_warning() {
        let mut input = sample_input();
        input.term_years = 35;

        let result = calculate_emi(&input).unwrap();
        let has_warning = result.warnings.iter().any(|w| w.contains("lender limits"));
        assert!(has_warning, "Expected long-term warning at 35 years");
    }

    #[test]
    fn test_methodology_string() {
        let result = calculate_emi(&sample_input()).unwrap();
        assert_eq!(
            result.methodology,
            "Equated Monthly Installment (Fixed-Rate Amortization)"
        );
    }
}
