//! Rates command - show the tax and insurance brackets for a category

use beema::{FiscalYear, RateTable, TaxCategory};
use clap::Args;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct RatesCommand {
    /// Tax category to show brackets for
    #[arg(short, long, value_enum)]
    category: TaxCategory,

    /// Fiscal year start (BS), e.g. 2083 for 2083/084
    #[arg(short, long, default_value = "2083")]
    fiscal_year: i32,
}

#[derive(Tabled)]
struct BracketRow {
    #[tabled(rename = "Displacement")]
    bracket: String,
    #[tabled(rename = "Annual Tax")]
    annual: String,
}

#[derive(Tabled)]
struct PremiumRow {
    #[tabled(rename = "Displacement")]
    bracket: String,
    #[tabled(rename = "Premium")]
    premium: String,
}

fn bracket_label(min_cc: u32, max_cc: Option<u32>) -> String {
    match max_cc {
        Some(max) => format!("{}-{} cc", min_cc, max),
        None => format!("{}+ cc", min_cc),
    }
}

impl RatesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let rates = RateTable::bundled();
        let fiscal_year = FiscalYear(self.fiscal_year);

        let tax_rows: Vec<BracketRow> = rates
            .brackets(self.category, fiscal_year)
            .into_iter()
            .map(|r| BracketRow {
                bracket: bracket_label(r.min_cc, r.max_cc),
                annual: format!("Rs. {:.2}", r.annual_amount),
            })
            .collect();

        if tax_rows.is_empty() {
            anyhow::bail!(
                "no tax brackets for {} in {}",
                self.category,
                fiscal_year
            );
        }

        println!();
        println!("ANNUAL TAX ({}, {})", self.category, fiscal_year);
        let table = Table::new(tax_rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);

        let premium_rows: Vec<PremiumRow> = rates
            .insurance_brackets(self.category)
            .into_iter()
            .map(|r| PremiumRow {
                bracket: bracket_label(r.min_cc, r.max_cc),
                premium: format!("Rs. {:.2}", r.premium),
            })
            .collect();

        if !premium_rows.is_empty() {
            println!();
            println!("THIRD-PARTY INSURANCE ({})", self.category);
            let table = Table::new(premium_rows)
                .with(Style::rounded())
                .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
                .to_string();
            println!("{}", table);
        }
        println!();
        Ok(())
    }
}
