//! The fiscal-year accrual loop: walks every unpaid fiscal year, applies the
//! age surcharge and buckets each year's tax into arrears or the
//! current-year fine.

use crate::calendar::FiscalYear;
use crate::error::EstimateError;
use crate::rates::RateTable;
use crate::vehicle::TaxCategory;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Statutory maximum number of back-tax years assessed in one transaction.
/// Years beyond this window are not billed here.
pub const MAX_BILLED_YEARS: i32 = 5;

/// How vehicle age is derived for the surcharge.
///
/// The observed renewal policy subtracts the AD manufacture year directly
/// from the BS fiscal year, which overstates age by the ~57-year calendar
/// offset. That convention is kept as the default rather than silently
/// corrected; `NormalizedAd` converts the fiscal year to AD first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgeBasis {
    #[default]
    MixedBsAd,
    NormalizedAd,
}

/// Approximate BS minus AD year offset used by [`AgeBasis::NormalizedAd`].
pub const BS_AD_YEAR_OFFSET: i32 = 57;

/// Vehicle age at a fiscal year under the given basis.
pub fn vehicle_age(fiscal_year: FiscalYear, manufacture_year_ad: i32, basis: AgeBasis) -> i32 {
    match basis {
        AgeBasis::MixedBsAd => fiscal_year.0 - manufacture_year_ad,
        AgeBasis::NormalizedAd => fiscal_year.0 - BS_AD_YEAR_OFFSET - manufacture_year_ad,
    }
}

/// Age surcharge factor applied to the annual base tax.
///
/// 1.0 below 15 years, then +5% per year above 14, capped at 2.0 from age 34.
pub fn surcharge_factor(age: i32) -> Decimal {
    if age < 15 {
        dec!(1)
    } else if age < 34 {
        dec!(1) + dec!(0.05) * Decimal::from(age - 14)
    } else {
        dec!(2)
    }
}

/// Accrued amounts over the billed window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Accrual {
    pub tax_principal: Decimal,
    pub arrears_32: Decimal,
    pub current_fine: Decimal,
    pub is_up_to_date: bool,
}

/// Walk fiscal years `[expiry_year, current_year]` ascending, capped at
/// [`MAX_BILLED_YEARS`]. Fully elapsed years accrue a 32% arrears surcharge;
/// the still-open current year carries a 20% fine instead.
///
/// A window that collapses to zero years (payment recorded before expiry)
/// yields all-zero amounts rather than an error; temporal ordering of the
/// two dates is the caller's responsibility.
pub fn accrue(
    rates: &RateTable,
    category: TaxCategory,
    engine_cc: u32,
    expiry_year: FiscalYear,
    current_year: FiscalYear,
    manufacture_year_ad: i32,
    age_basis: AgeBasis,
) -> Result<Accrual, EstimateError> {
    let mut accrual = Accrual {
        is_up_to_date: current_year == expiry_year,
        ..Accrual::default()
    };

    let last_billed = current_year.0.min(expiry_year.0 + MAX_BILLED_YEARS - 1);
    for start_year in expiry_year.0..=last_billed {
        let fy = FiscalYear(start_year);
        let base_rate = rates.annual_tax(category, fy, engine_cc)?;
        let age = vehicle_age(fy, manufacture_year_ad, age_basis);
        let factor = surcharge_factor(age);
        let year_tax = (base_rate * factor).round_dp(2);

        accrual.tax_principal += year_tax;
        if start_year < current_year.0 {
            let arrears = (year_tax * dec!(0.32)).round_dp(2);
            accrual.arrears_32 += arrears;
            log::debug!(
                "{} {} {}cc: base={}, age={}, factor={}, tax={}, arrears={}",
                fy,
                category,
                engine_cc,
                base_rate,
                age,
                factor,
                year_tax,
                arrears
            );
        } else {
            accrual.current_fine = (year_tax * dec!(0.20)).round_dp(2);
            log::debug!(
                "{} {} {}cc: base={}, age={}, factor={}, tax={}, current fine={}",
                fy,
                category,
                engine_cc,
                base_rate,
                age,
                factor,
                year_tax,
                accrual.current_fine
            );
        }
    }

    Ok(accrual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::RateTable;

    fn rates() -> RateTable {
        RateTable::bundled()
    }

    #[test]
    fn surcharge_factor_bands() {
        assert_eq!(surcharge_factor(0), dec!(1));
        assert_eq!(surcharge_factor(14), dec!(1));
        assert_eq!(surcharge_factor(15), dec!(1.05));
        assert_eq!(surcharge_factor(20), dec!(1.30));
        assert_eq!(surcharge_factor(33), dec!(1.95));
        assert_eq!(surcharge_factor(34), dec!(2));
        assert_eq!(surcharge_factor(50), dec!(2));
    }

    #[test]
    fn surcharge_factor_monotone() {
        let mut prev = surcharge_factor(0);
        for age in 1..60 {
            let next = surcharge_factor(age);
            assert!(next >= prev, "factor decreased at age {}", age);
            prev = next;
        }
    }

    #[test]
    fn vehicle_age_bases() {
        let fy = FiscalYear(2082);
        assert_eq!(vehicle_age(fy, 2072, AgeBasis::MixedBsAd), 10);
        assert_eq!(vehicle_age(fy, 2015, AgeBasis::NormalizedAd), 10);
    }

    #[test]
    fn up_to_date_has_only_current_fine() {
        // 150cc, base 5000, age 10 so no surcharge
        let a = accrue(
            &rates(),
            TaxCategory::TwoWheelerPetrol,
            150,
            FiscalYear(2083),
            FiscalYear(2083),
            2073,
            AgeBasis::MixedBsAd,
        )
        .unwrap();
        assert!(a.is_up_to_date);
        assert_eq!(a.tax_principal, dec!(5000));
        assert_eq!(a.arrears_32, dec!(0));
        assert_eq!(a.current_fine, dec!(1000));
    }

    #[test]
    fn three_year_window_splits_arrears_and_fine() {
        let a = accrue(
            &rates(),
            TaxCategory::TwoWheelerPetrol,
            150,
            FiscalYear(2081),
            FiscalYear(2083),
            2073,
            AgeBasis::MixedBsAd,
        )
        .unwrap();
        assert!(!a.is_up_to_date);
        // 2081 and 2082 in arrears at 32% each, 2083 fined at 20%
        assert_eq!(a.tax_principal, dec!(15000));
        assert_eq!(a.arrears_32, dec!(3200));
        assert_eq!(a.current_fine, dec!(1000));
    }

    #[test]
    fn billing_capped_at_five_years() {
        // expiry 2078, current 2083: six elapsed years, only 2078..=2082
        // billed, all as arrears; the current year falls outside the cap so
        // no current fine applies
        let a = accrue(
            &rates(),
            TaxCategory::TwoWheelerPetrol,
            150,
            FiscalYear(2078),
            FiscalYear(2083),
            2073,
            AgeBasis::MixedBsAd,
        )
        .unwrap();
        assert_eq!(a.tax_principal, dec!(25000));
        assert_eq!(a.arrears_32, dec!(8000));
        assert_eq!(a.current_fine, dec!(0));
    }

    #[test]
    fn collapsed_window_yields_zeros() {
        // payment recorded before expiry: not validated, zero accrual
        let a = accrue(
            &rates(),
            TaxCategory::TwoWheelerPetrol,
            150,
            FiscalYear(2083),
            FiscalYear(2082),
            2073,
            AgeBasis::MixedBsAd,
        )
        .unwrap();
        assert_eq!(a, Accrual::default());
    }

    #[test]
    fn surcharge_applied_per_year() {
        // manufacture 2066 (mixed basis): ages 15 and 16 across the window
        let a = accrue(
            &rates(),
            TaxCategory::TwoWheelerPetrol,
            150,
            FiscalYear(2081),
            FiscalYear(2082),
            2066,
            AgeBasis::MixedBsAd,
        )
        .unwrap();
        // 2081: 5000 * 1.05 = 5250 (arrears 1680), 2082: 5000 * 1.10 = 5500
        assert_eq!(a.tax_principal, dec!(10750));
        assert_eq!(a.arrears_32, dec!(1680));
        assert_eq!(a.current_fine, dec!(1100));
    }

    #[test]
    fn missing_rate_year_propagates() {
        let err = accrue(
            &rates(),
            TaxCategory::TwoWheelerPetrol,
            150,
            FiscalYear(2070),
            FiscalYear(2071),
            2060,
            AgeBasis::MixedBsAd,
        )
        .unwrap_err();
        assert!(matches!(err, EstimateError::RateNotFound { .. }));
    }
}
