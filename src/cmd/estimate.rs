//! Estimate command - compute a renewal bill for one vehicle

use crate::cmd::read_request;
use beema::{
    approximate_bs_date, estimate, AgeBasis, BsDate, CalculationRequest, CalculationResult,
    Catalog, EngineConfig, FiscalYear, RateTable, TaxCategory,
};
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct EstimateCommand {
    /// JSON file containing a calculation request (or stdin with "-");
    /// overrides the individual vehicle flags below
    #[arg(short, long)]
    request: Option<PathBuf>,

    /// Vehicle brand (catalog mode, together with --model)
    #[arg(short, long)]
    brand: Option<String>,

    /// Vehicle model name (catalog mode)
    #[arg(short, long)]
    model: Option<String>,

    /// Engine displacement in cc (displacement mode, requires --category)
    #[arg(short, long)]
    engine_cc: Option<u32>,

    /// Tax category (displacement mode)
    #[arg(short, long, value_enum)]
    category: Option<TaxCategory>,

    /// BS date the certificate expired (YYYY-MM-DD)
    #[arg(short = 'x', long)]
    expiry: Option<String>,

    /// BS payment date (YYYY-MM-DD); defaults to today in BS
    #[arg(short, long)]
    payment: Option<String>,

    /// Manufacture year (AD)
    #[arg(short = 'y', long)]
    manufacture_year: Option<i32>,

    /// Include third-party insurance in the bill
    #[arg(short, long)]
    insurance: bool,

    /// Vehicle is registered for commercial use (adds advance income tax)
    #[arg(long)]
    commercial: bool,

    /// Platform service fee
    #[arg(long, default_value = "100")]
    service_charge: Decimal,

    /// Normalize the BS fiscal year to AD before computing vehicle age
    #[arg(long)]
    normalize_age: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl EstimateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let request = match &self.request {
            Some(path) => read_request(path)?,
            None => self.request_from_flags()?,
        };

        let config = EngineConfig {
            service_charge: self.service_charge,
            age_basis: if self.normalize_age {
                AgeBasis::NormalizedAd
            } else {
                AgeBasis::MixedBsAd
            },
        };

        let rates = RateTable::bundled();
        let catalog = Catalog::bundled();
        let today = approximate_bs_date(chrono::Local::now().date_naive());

        let result = estimate(&rates, &catalog, &config, &request, today)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print_breakdown(&request, &result, today);
        }
        Ok(())
    }

    fn request_from_flags(&self) -> anyhow::Result<CalculationRequest> {
        let expiry = self
            .expiry
            .clone()
            .ok_or_else(|| anyhow::anyhow!("--expiry is required (or use --request)"))?;
        let manufacture_year = self
            .manufacture_year
            .ok_or_else(|| anyhow::anyhow!("--manufacture-year is required (or use --request)"))?;
        Ok(CalculationRequest {
            brand: self.brand.clone(),
            model_name: self.model.clone(),
            engine_cc: self.engine_cc,
            category: self.category,
            expiry_date_bs: expiry,
            payment_date_bs: self.payment.clone(),
            manufacture_year_ad: manufacture_year,
            buys_insurance: self.insurance,
            is_commercial: self.commercial,
        })
    }
}

fn print_breakdown(request: &CalculationRequest, result: &CalculationResult, today: BsDate) {
    let payment = request.payment_date_bs.clone().unwrap_or_else(|| {
        format!("{} (today, approximate)", today)
    });

    println!();
    println!("RENEWAL ESTIMATE (payment {})", payment);
    if result.is_up_to_date {
        println!("  Certificate is up to date; only the current fiscal year is due.");
    } else {
        println!(
            "  Certificate expired in {}.",
            BsDate::parse(&request.expiry_date_bs)
                .map(|d| FiscalYear(d.year).label())
                .unwrap_or_else(|_| request.expiry_date_bs.clone())
        );
    }
    println!();
    println!("  Tax principal:      Rs. {:>12.2}", result.tax_principal);
    println!("  Arrears (32%):      Rs. {:>12.2}", result.arrears_32);
    println!("  Current fine (20%): Rs. {:>12.2}", result.current_fine);
    println!("  Renewal charge:     Rs. {:>12.2}", result.renewal_charge);
    if result.insurance_premium > dec!(0) {
        println!(
            "  Insurance premium:  Rs. {:>12.2}",
            result.insurance_premium
        );
    }
    if result.ait_amount > dec!(0) {
        println!("  Advance income tax: Rs. {:>12.2}", result.ait_amount);
    }
    println!("  Service charge:     Rs. {:>12.2}", result.service_charge);
    println!();
    println!("  GRAND TOTAL:        Rs. {:>12.2}", result.grand_total);
    println!();
}
