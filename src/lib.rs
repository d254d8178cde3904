//! Vehicle tax renewal estimation for Bikram Sambat (BS) registered
//! vehicles.
//!
//! Given a vehicle's tax category, its BS certificate expiry date, the BS
//! payment date and its AD manufacture year, the engine reconstructs every
//! unpaid fiscal year (capped at five), applies the age surcharge, accrues
//! arrears and the current-year fine, adds the renewal fee and optional
//! third-party insurance and commercial advance income tax, and returns a
//! money breakdown with a grand total.
//!
//! The engine is a pure, synchronous computation: rate tables and the
//! vehicle catalog are loaded once and read-only, and the reference date is
//! injected by the caller.

pub mod calendar;
pub mod error;
pub mod estimate;
pub mod rates;
pub mod tax;
pub mod vehicle;

pub use calendar::{approximate_bs_date, current_fiscal_year, BsDate, FiscalYear};
pub use error::EstimateError;
pub use estimate::{estimate, CalculationRequest, EngineConfig};
pub use rates::{RateTable, DEFAULT_THIRD_PARTY_PREMIUM};
pub use tax::{AgeBasis, CalculationResult, MAX_BILLED_YEARS};
pub use vehicle::{classify, Catalog, TaxCategory, VehicleIdentity};
