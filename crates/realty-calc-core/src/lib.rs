pub mod error;
pub mod types;

#[cfg(feature = "loan")]
pub mod loan;

#[cfg(feature = "appreciation")]
pub mod appreciation;

#[cfg(feature = "stamp_duty")]
pub mod stamp_duty;

#[cfg(feature = "brokerage")]
pub mod brokerage;

pub use error::RealtyCalcError;
pub use types::*;

/// Standard result type for all realty-calc operations
pub type RealtyCalcResult<T> = Result<T, RealtyCalcError>;
