//! Bikram Sambat (BS) calendar primitives.
//!
//! The engine only needs to parse `YYYY-MM-DD` BS strings and derive the
//! fiscal year from a reference date. Full BS<->AD conversion is an external
//! concern; [`approximate_bs_date`] exists solely so the CLI can default the
//! payment date to "today" when the user omits it.

use crate::error::EstimateError;
use chrono::{Datelike, NaiveDate};

/// A date in the Bikram Sambat calendar. BS months run up to 32 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BsDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl BsDate {
    /// Parse a `YYYY-MM-DD` BS date string.
    pub fn parse(s: &str) -> Result<BsDate, EstimateError> {
        let invalid = || EstimateError::InvalidDateFormat(s.to_string());
        let parts: Vec<&str> = s.trim().split('-').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }
        let year: i32 = parts[0].parse().map_err(|_| invalid())?;
        let month: u32 = parts[1].parse().map_err(|_| invalid())?;
        let day: u32 = parts[2].parse().map_err(|_| invalid())?;
        if !(1900..=2299).contains(&year) || !(1..=12).contains(&month) || !(1..=32).contains(&day)
        {
            return Err(invalid());
        }
        Ok(BsDate { year, month, day })
    }
}

impl std::fmt::Display for BsDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A BS fiscal year, identified by its start year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FiscalYear(pub i32);

impl FiscalYear {
    /// Display as "2079/080" format
    pub fn label(&self) -> String {
        format!("{}/{:03}", self.0, (self.0 + 1) % 1000)
    }
}

impl std::fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The fiscal year a payment made on `reference` falls into.
pub fn current_fiscal_year(reference: BsDate) -> FiscalYear {
    FiscalYear(reference.year)
}

/// Approximate the BS date for an AD date.
///
/// BS new year (1 Baishakh) falls around 14 April, putting BS roughly 57
/// years ahead of AD after mid-April and 56 before. The month/day mapping
/// here is only month-granular; callers that need an exact date must supply
/// one instead of relying on this.
pub fn approximate_bs_date(ad: NaiveDate) -> BsDate {
    let after_new_year = (ad.month(), ad.day()) >= (4, 14);
    let year = ad.year() + 56 + if after_new_year { 1 } else { 0 };
    // April -> Baishakh (month 1), March -> Chaitra (month 12)
    let month = (ad.month() as i32 - 4).rem_euclid(12) as u32 + 1;
    BsDate {
        year,
        month,
        day: ad.day(),
    }
}
