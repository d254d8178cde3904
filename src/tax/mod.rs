pub mod accrual;
pub mod assemble;

pub use accrual::{accrue, surcharge_factor, Accrual, AgeBasis, MAX_BILLED_YEARS};
pub use assemble::{assemble, renewal_charge, CalculationResult};
