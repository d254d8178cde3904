//! Reference rate tables: annual vehicle tax, third-party insurance premiums
//! and commercial advance income tax (AIT).
//!
//! Tables ship as CSV fixtures embedded at compile time, so the engine's
//! behaviour is testable against fixed data with no runtime I/O. A loaded
//! [`RateTable`] is immutable; every calculation sees one consistent
//! snapshot for its whole duration.

use crate::calendar::FiscalYear;
use crate::error::EstimateError;
use crate::vehicle::TaxCategory;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Premium applied when the insurance table has no bracket for a vehicle.
/// An insurance-table gap must never block tax estimation.
pub const DEFAULT_THIRD_PARTY_PREMIUM: Decimal = dec!(2000);

/// Annual tax bracket. `max_cc = None` means unbounded above.
#[derive(Debug, Clone, Deserialize)]
pub struct RateEntry {
    pub fiscal_year: i32,
    pub category: TaxCategory,
    pub min_cc: u32,
    pub max_cc: Option<u32>,
    pub annual_amount: Decimal,
}

/// Third-party insurance premium bracket.
#[derive(Debug, Clone, Deserialize)]
pub struct PremiumEntry {
    pub category: TaxCategory,
    pub min_cc: u32,
    pub max_cc: Option<u32>,
    pub premium: Decimal,
}

/// Commercial advance-income-tax bracket.
#[derive(Debug, Clone, Deserialize)]
pub struct AitEntry {
    pub category: TaxCategory,
    pub min_cc: u32,
    pub max_cc: Option<u32>,
    pub amount: Decimal,
}

fn in_bracket(engine_cc: u32, min_cc: u32, max_cc: Option<u32>) -> bool {
    engine_cc >= min_cc && max_cc.map_or(true, |max| engine_cc <= max)
}

/// All reference rate data, loaded once per process.
#[derive(Debug, Clone)]
pub struct RateTable {
    tax: Vec<RateEntry>,
    insurance: Vec<PremiumEntry>,
    ait: Vec<AitEntry>,
}

const TAX_RATES_CSV: &str = include_str!("../data/tax_rates.csv");
const INSURANCE_CSV: &str = include_str!("../data/insurance.csv");
const AIT_CSV: &str = include_str!("../data/ait.csv");

fn read_rows<T: serde::de::DeserializeOwned>(csv_text: &str) -> Result<Vec<T>, csv::Error> {
    let mut rdr = csv::Reader::from_reader(csv_text.as_bytes());
    rdr.deserialize().collect()
}

impl RateTable {
    pub fn from_csv(
        tax_csv: &str,
        insurance_csv: &str,
        ait_csv: &str,
    ) -> Result<RateTable, csv::Error> {
        Ok(RateTable {
            tax: read_rows(tax_csv)?,
            insurance: read_rows(insurance_csv)?,
            ait: read_rows(ait_csv)?,
        })
    }

    /// The rate tables shipped with the crate.
    pub fn bundled() -> RateTable {
        RateTable::from_csv(TAX_RATES_CSV, INSURANCE_CSV, AIT_CSV)
            .expect("bundled rate tables are valid CSV")
    }

    /// Annual base tax for a category/fiscal-year/displacement triple.
    /// First matching bracket wins.
    pub fn annual_tax(
        &self,
        category: TaxCategory,
        fiscal_year: FiscalYear,
        engine_cc: u32,
    ) -> Result<Decimal, EstimateError> {
        self.tax
            .iter()
            .find(|r| {
                r.category == category
                    && r.fiscal_year == fiscal_year.0
                    && in_bracket(engine_cc, r.min_cc, r.max_cc)
            })
            .map(|r| r.annual_amount)
            .ok_or(EstimateError::RateNotFound {
                category,
                fiscal_year,
                engine_cc,
            })
    }

    /// Third-party insurance premium. Falls back to
    /// [`DEFAULT_THIRD_PARTY_PREMIUM`] when no bracket matches.
    pub fn insurance_premium(&self, category: TaxCategory, engine_cc: u32) -> Decimal {
        match self
            .insurance
            .iter()
            .find(|r| r.category == category && in_bracket(engine_cc, r.min_cc, r.max_cc))
        {
            Some(row) => row.premium,
            None => {
                log::warn!(
                    "no insurance bracket for {} at {}cc, using default premium {}",
                    category,
                    engine_cc,
                    DEFAULT_THIRD_PARTY_PREMIUM
                );
                DEFAULT_THIRD_PARTY_PREMIUM
            }
        }
    }

    /// Advance income tax for commercial vehicles; zero when the category
    /// has no AIT bracket.
    pub fn ait_amount(&self, category: TaxCategory, engine_cc: u32) -> Decimal {
        self.ait
            .iter()
            .find(|r| r.category == category && in_bracket(engine_cc, r.min_cc, r.max_cc))
            .map_or(Decimal::ZERO, |r| r.amount)
    }

    /// Tax brackets for a category and fiscal year, in table order.
    pub fn brackets(&self, category: TaxCategory, fiscal_year: FiscalYear) -> Vec<&RateEntry> {
        self.tax
            .iter()
            .filter(|r| r.category == category && r.fiscal_year == fiscal_year.0)
            .collect()
    }

    /// Insurance brackets for a category, in table order.
    pub fn insurance_brackets(&self, category: TaxCategory) -> Vec<&PremiumEntry> {
        self.insurance
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }
}
