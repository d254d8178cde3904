//! Flat fees, optional premiums and the final breakdown.

use crate::rates::RateTable;
use crate::tax::accrual::Accrual;
use crate::vehicle::TaxCategory;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::Serialize;

/// Statutory renewal processing fee; doubled when the certificate is
/// overdue (a 100%-of-base late surcharge baked into the fee, distinct from
/// the per-year current fine).
pub fn renewal_charge(is_up_to_date: bool) -> Decimal {
    if is_up_to_date {
        dec!(300)
    } else {
        dec!(600)
    }
}

/// The complete money breakdown returned to the caller.
///
/// `grand_total` is always the exact sum of the seven components; the
/// components are mutually exclusive in meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct CalculationResult {
    pub tax_principal: Decimal,
    pub arrears_32: Decimal,
    pub current_fine: Decimal,
    pub renewal_charge: Decimal,
    pub insurance_premium: Decimal,
    pub ait_amount: Decimal,
    pub service_charge: Decimal,
    pub grand_total: Decimal,
    pub is_up_to_date: bool,
}

/// Add the fixed and optional charges to an accrual and sum the total.
pub fn assemble(
    rates: &RateTable,
    category: TaxCategory,
    engine_cc: u32,
    accrual: &Accrual,
    buys_insurance: bool,
    is_commercial: bool,
    service_charge: Decimal,
) -> CalculationResult {
    let renewal_charge = renewal_charge(accrual.is_up_to_date);
    let insurance_premium = if buys_insurance {
        rates.insurance_premium(category, engine_cc)
    } else {
        Decimal::ZERO
    };
    let ait_amount = if is_commercial {
        rates.ait_amount(category, engine_cc)
    } else {
        Decimal::ZERO
    };

    let grand_total = accrual.tax_principal
        + accrual.arrears_32
        + accrual.current_fine
        + renewal_charge
        + insurance_premium
        + ait_amount
        + service_charge;

    CalculationResult {
        tax_principal: accrual.tax_principal,
        arrears_32: accrual.arrears_32,
        current_fine: accrual.current_fine,
        renewal_charge,
        insurance_premium,
        ait_amount,
        service_charge,
        grand_total,
        is_up_to_date: accrual.is_up_to_date,
    }
}
