//! Request orchestration: classify the vehicle, accrue unpaid fiscal years,
//! assemble fees and premiums, and return the breakdown.

use crate::calendar::{current_fiscal_year, BsDate, FiscalYear};
use crate::error::EstimateError;
use crate::rates::RateTable;
use crate::tax::accrual::{accrue, AgeBasis};
use crate::tax::assemble::{assemble, CalculationResult};
use crate::vehicle::{classify, Catalog, TaxCategory, VehicleIdentity};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Deployment-level knobs the engine takes as given.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Fixed platform fee, constant across requests.
    pub service_charge: Decimal,
    /// How vehicle age is derived for the surcharge.
    pub age_basis: AgeBasis,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            service_charge: dec!(100),
            age_basis: AgeBasis::default(),
        }
    }
}

/// One renewal estimation request, as supplied by the transport layer.
///
/// The vehicle is identified either by `brand` + `model_name` (catalog
/// lookup) or by `engine_cc` + `category` (displacement mode).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CalculationRequest {
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub engine_cc: Option<u32>,
    #[serde(default)]
    pub category: Option<TaxCategory>,
    /// BS date the current certificate expired, `YYYY-MM-DD`.
    pub expiry_date_bs: String,
    /// BS date payment is made; today in BS when omitted.
    #[serde(default)]
    pub payment_date_bs: Option<String>,
    pub manufacture_year_ad: i32,
    #[serde(default)]
    pub buys_insurance: bool,
    #[serde(default)]
    pub is_commercial: bool,
}

impl CalculationRequest {
    /// Resolve the loose transport shape into a typed identity.
    pub fn identity(&self) -> Result<VehicleIdentity, EstimateError> {
        if let (Some(brand), Some(model_name)) = (&self.brand, &self.model_name) {
            return Ok(VehicleIdentity::ByCatalog {
                brand: brand.clone(),
                model_name: model_name.clone(),
            });
        }
        if let Some(engine_cc) = self.engine_cc {
            let category = self.category.ok_or(EstimateError::MissingCategory)?;
            return Ok(VehicleIdentity::ByDisplacement {
                engine_cc,
                category,
            });
        }
        Err(EstimateError::InvalidInput(
            "either brand and model_name, or engine_cc with category, must be given".to_string(),
        ))
    }
}

/// Run one complete estimation.
///
/// `today_bs` is only consulted when the request omits the payment date;
/// injecting it keeps the engine free of any clock dependency. Returns a
/// complete, internally consistent breakdown or a typed error, never a
/// partial record.
pub fn estimate(
    rates: &RateTable,
    catalog: &Catalog,
    config: &EngineConfig,
    request: &CalculationRequest,
    today_bs: BsDate,
) -> Result<CalculationResult, EstimateError> {
    let identity = request.identity()?;
    let (category, engine_cc) = classify(catalog, &identity)?;

    if request.manufacture_year_ad <= 0 {
        return Err(EstimateError::InvalidInput(
            "manufacture_year_ad must be a positive year".to_string(),
        ));
    }

    let expiry = BsDate::parse(&request.expiry_date_bs)?;
    let payment = match &request.payment_date_bs {
        Some(s) => BsDate::parse(s)?,
        None => today_bs,
    };

    let expiry_year = FiscalYear(expiry.year);
    let current_year = current_fiscal_year(payment);

    let accrual = accrue(
        rates,
        category,
        engine_cc,
        expiry_year,
        current_year,
        request.manufacture_year_ad,
        config.age_basis,
    )?;

    Ok(assemble(
        rates,
        category,
        engine_cc,
        &accrual,
        request.buys_insurance,
        request.is_commercial,
        config.service_charge,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CalculationRequest {
        CalculationRequest {
            brand: None,
            model_name: None,
            engine_cc: Some(150),
            category: Some(TaxCategory::TwoWheelerPetrol),
            expiry_date_bs: "2083-01-15".to_string(),
            payment_date_bs: Some("2083-05-01".to_string()),
            manufacture_year_ad: 2073,
            buys_insurance: false,
            is_commercial: false,
        }
    }

    #[test]
    fn displacement_without_category_is_missing_category() {
        let mut req = request();
        req.category = None;
        assert_eq!(req.identity(), Err(EstimateError::MissingCategory));
    }

    #[test]
    fn neither_mode_is_invalid_input() {
        let mut req = request();
        req.engine_cc = None;
        req.category = None;
        assert!(matches!(
            req.identity(),
            Err(EstimateError::InvalidInput(_))
        ));
    }

    #[test]
    fn catalog_mode_takes_precedence() {
        let mut req = request();
        req.brand = Some("Bajaj".to_string());
        req.model_name = Some("Pulsar 150".to_string());
        assert_eq!(
            req.identity(),
            Ok(VehicleIdentity::ByCatalog {
                brand: "Bajaj".to_string(),
                model_name: "Pulsar 150".to_string(),
            })
        );
    }

    #[test]
    fn payment_date_defaults_to_injected_today() {
        let rates = RateTable::bundled();
        let catalog = Catalog::bundled();
        let mut req = request();
        req.payment_date_bs = None;
        req.expiry_date_bs = "2082-01-15".to_string();
        let today = BsDate::parse("2083-05-01").unwrap();
        let result = estimate(&rates, &catalog, &EngineConfig::default(), &req, today).unwrap();
        assert!(!result.is_up_to_date);
        // 2082 arrears + 2083 current
        assert_eq!(result.tax_principal, dec!(10000));
    }

    #[test]
    fn non_positive_manufacture_year_rejected() {
        let rates = RateTable::bundled();
        let catalog = Catalog::bundled();
        let mut req = request();
        req.manufacture_year_ad = 0;
        let today = BsDate::parse("2083-05-01").unwrap();
        assert!(matches!(
            estimate(&rates, &catalog, &EngineConfig::default(), &req, today),
            Err(EstimateError::InvalidInput(_))
        ));
    }

    #[test]
    fn request_deserializes_with_defaults() {
        let json = r#"{
            "brand": "Bajaj",
            "model_name": "Pulsar 150",
            "expiry_date_bs": "2082-04-01",
            "manufacture_year_ad": 2018
        }"#;
        let req: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.payment_date_bs, None);
        assert!(!req.buys_insurance);
        assert!(!req.is_commercial);
    }
}
