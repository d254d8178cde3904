use crate::calendar::FiscalYear;
use crate::vehicle::TaxCategory;

/// Errors surfaced by the estimation engine.
///
/// `RateNotFound` is a reference-data gap (the rate tables need updating),
/// not a caller mistake, and should be alerted on separately from the
/// input-validation variants.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EstimateError {
    #[error("invalid BS date '{0}': expected YYYY-MM-DD")]
    InvalidDateFormat(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("vehicle not found in catalog: {brand} {model_name}")]
    VehicleNotFound { brand: String, model_name: String },
    #[error("engine displacement given without a tax category")]
    MissingCategory,
    #[error("no tax rate for {category} in {fiscal_year} at {engine_cc}cc")]
    RateNotFound {
        category: TaxCategory,
        fiscal_year: FiscalYear,
        engine_cc: u32,
    },
}
