use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use crate::error::RealtyCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::RealtyCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// States with configured stamp duty rates. `Other` covers everything else
/// and resolves via the table's default rate.
///
/// Serialized as a plain lowercase string ("maharashtra"); any
/// unrecognised name deserializes to `Other` rather than failing, so the
/// lenient default-rate policy holds on the JSON surfaces too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Jurisdiction {
    Maharashtra,
    Karnataka,
    Delhi,
    TamilNadu,
    Telangana,
    Gujarat,
    Rajasthan,
    UttarPradesh,
    WestBengal,
    Haryana,
    Punjab,
    Other(String),
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jurisdiction::Maharashtra => write!(f, "maharashtra"),
            Jurisdiction::Karnataka => write!(f, "karnataka"),
            Jurisdiction::Delhi => write!(f, "delhi"),
            Jurisdiction::TamilNadu => write!(f, "tamil_nadu"),
            Jurisdiction::Telangana => write!(f, "telangana"),
            Jurisdiction::Gujarat => write!(f, "gujarat"),
            Jurisdiction::Rajasthan => write!(f, "rajasthan"),
            Jurisdiction::UttarPradesh => write!(f, "uttar_pradesh"),
            Jurisdiction::WestBengal => write!(f, "west_bengal"),
            Jurisdiction::Haryana => write!(f, "haryana"),
            Jurisdiction::Punjab => write!(f, "punjab"),
            Jurisdiction::Other(name) => write!(f, "{name}"),
        }
    }
}

impl Jurisdiction {
    /// Case-insensitive name resolution; unrecognised names become `Other`
    /// and resolve via the table's default rate.
    fn from_name(s: &str) -> Jurisdiction {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "maharashtra" => Jurisdiction::Maharashtra,
            "karnataka" => Jurisdiction::Karnataka,
            "delhi" => Jurisdiction::Delhi,
            "tamil_nadu" | "tamilnadu" => Jurisdiction::TamilNadu,
            "telangana" => Jurisdiction::Telangana,
            "gujarat" => Jurisdiction::Gujarat,
            "rajasthan" => Jurisdiction::Rajasthan,
            "uttar_pradesh" | "uttarpradesh" => Jurisdiction::UttarPradesh,
            "west_bengal" | "westbengal" => Jurisdiction::WestBengal,
            "haryana" => Jurisdiction::Haryana,
            "punjab" => Jurisdiction::Punjab,
            _ => Jurisdiction::Other(normalized),
        }
    }
}

impl std::str::FromStr for Jurisdiction {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Jurisdiction::from_name(s))
    }
}

impl From<String> for Jurisdiction {
    fn from(s: String) -> Self {
        Jurisdiction::from_name(&s)
    }
}

impl From<Jurisdiction> for String {
    fn from(j: Jurisdiction) -> Self {
        j.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCategory {
    Residential,
    Commercial,
    Land,
}

impl fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyCategory::Residential => write!(f, "residential"),
            PropertyCategory::Commercial => write!(f, "commercial"),
            PropertyCategory::Land => write!(f, "land"),
        }
    }
}

impl std::str::FromStr for PropertyCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "residential" => Ok(PropertyCategory::Residential),
            "commercial" => Ok(PropertyCategory::Commercial),
            "land" => Ok(PropertyCategory::Land),
            other => Err(format!(
                "Unknown property category '{other}' (expected residential, commercial, or land)"
            )),
        }
    }
}

/// Injectable (jurisdiction, category) -> rate-percent table. Read-only
/// after construction; share by reference across callers.
#[derive(Debug, Clone)]
pub struct StampDutyRateTable {
    rates: HashMap<(Jurisdiction, PropertyCategory), Rate>,
    default_rate_pct: Rate,
}

impl StampDutyRateTable {
    pub fn new(default_rate_pct: Rate) -> Self {
        StampDutyRateTable {
            rates: HashMap::new(),
            default_rate_pct,
        }
    }

    pub fn set_rate(&mut self, jurisdiction: Jurisdiction, category: PropertyCategory, pct: Rate) {
        self.rates.insert((jurisdiction, category), pct);
    }

    /// Exact-match lookup. `None` means the combination is unmapped and the
    /// caller decides between the default rate and a hard error.
    pub fn rate_for(&self, jurisdiction: &Jurisdiction, category: &PropertyCategory) -> Option<Rate> {
        self.rates
            .get(&(jurisdiction.clone(), category.clone()))
            .copied()
    }

    pub fn default_rate(&self) -> Rate {
        self.default_rate_pct
    }
}

impl Default for StampDutyRateTable {
    /// Built-in state rates, percent of property value.
    fn default() -> Self {
        use Jurisdiction::*;
        use PropertyCategory::*;

        let mut table = StampDutyRateTable::new(dec!(5));
        let entries = [
            (Maharashtra, Residential, dec!(5)),
            (Maharashtra, Commercial, dec!(6)),
            (Maharashtra, Land, dec!(4)),
            (Karnataka, Residential, dec!(5.6)),
            (Karnataka, Commercial, dec!(5.6)),
            (Karnataka, Land, dec!(5)),
            (Delhi, Residential, dec!(6)),
            (Delhi, Commercial, dec!(6)),
            (Delhi, Land, dec!(6)),
            (TamilNadu, Residential, dec!(7)),
            (TamilNadu, Commercial, dec!(7)),
            (TamilNadu, Land, dec!(7)),
            (Telangana, Residential, dec!(7.5)),
            (Telangana, Commercial, dec!(7.5)),
            (Telangana, Land, dec!(7.5)),
            (Gujarat, Residential, dec!(4.9)),
            (Gujarat, Commercial, dec!(4.9)),
            (Gujarat, Land, dec!(4.9)),
            (Rajasthan, Residential, dec!(6)),
            (Rajasthan, Commercial, dec!(6)),
            (Rajasthan, Land, dec!(5)),
            (UttarPradesh, Residential, dec!(7)),
            (UttarPradesh, Commercial, dec!(7)),
            (UttarPradesh, Land, dec!(7)),
            (WestBengal, Residential, dec!(6)),
            (WestBengal, Commercial, dec!(6)),
            (WestBengal, Land, dec!(5)),
            (Haryana, Residential, dec!(7)),
            (Haryana, Commercial, dec!(7)),
            (Haryana, Land, dec!(5)),
            (Punjab, Residential, dec!(7)),
            (Punjab, Commercial, dec!(7)),
            (Punjab, Land, dec!(6)),
        ];
        for (j, c, rate) in entries {
            table.set_rate(j, c, rate);
        }
        table
    }
}

/// Input parameters for stamp duty calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampDutyInput {
    pub property_value: Money,
    pub jurisdiction: Jurisdiction,
    pub category: PropertyCategory,
    /// When true, an unmapped (jurisdiction, category) pair is an error
    /// instead of falling back to the default rate.
    #[serde(default)]
    pub strict: bool,
}

/// Stamp duty calculation output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampDutyOutput {
    /// property_value * applied_rate_pct / 100
    pub duty_amount: Money,
    pub applied_rate_pct: Rate,
    /// True when the table had no entry and the default rate was applied
    pub used_default_rate: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Calculate stamp duty using the built-in rate table.
pub fn calculate_stamp_duty(
    input: &StampDutyInput,
) -> RealtyCalcResult<ComputationOutput<StampDutyOutput>> {
    calculate_stamp_duty_with_table(input, &StampDutyRateTable::default())
}

/// Calculate stamp duty against a caller-supplied rate table.
///
/// Unmapped combinations fall back to the table's default rate with a
/// warning, unless `input.strict` is set, in which case they return
/// `UnmappedRate`. The lenient path mirrors the source dashboard exactly.
pub fn calculate_stamp_duty_with_table(
    input: &StampDutyInput,
    table: &StampDutyRateTable,
) -> RealtyCalcResult<ComputationOutput<StampDutyOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.property_value <= Decimal::ZERO {
        return Err(RealtyCalcError::InvalidInput {
            field: "property_value".into(),
            reason: "Property value must be positive".into(),
        });
    }

    let (applied_rate_pct, used_default_rate) =
        match table.rate_for(&input.jurisdiction, &input.category) {
            Some(rate) => (rate, false),
            None => {
                if input.strict {
                    return Err(RealtyCalcError::UnmappedRate {
                        jurisdiction: input.jurisdiction.to_string(),
                        category: input.category.to_string(),
                    });
                }
                warnings.push(format!(
                    "No rate configured for {} / {} — applying default rate {}%",
                    input.jurisdiction,
                    input.category,
                    table.default_rate()
                ));
                (table.default_rate(), true)
            }
        };

    let duty_amount = input.property_value * applied_rate_pct / dec!(100);

    let output = StampDutyOutput {
        duty_amount,
        applied_rate_pct,
        used_default_rate,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Stamp Duty (State Rate Schedule)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
