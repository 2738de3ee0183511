pub mod appreciation;
pub mod brokerage;
pub mod loan;
pub mod stamp_duty;
