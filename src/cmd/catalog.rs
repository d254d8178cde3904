//! Catalog command - list the brands and models known for a category

use beema::{Catalog, TaxCategory};
use clap::Args;
use tabled::{settings::Style, Table, Tabled};

#[derive(Args, Debug)]
pub struct CatalogCommand {
    /// Tax category to list
    #[arg(short, long, value_enum)]
    category: TaxCategory,

    /// Brand to list models for; omit to list brands
    #[arg(short, long)]
    brand: Option<String>,
}

#[derive(Tabled)]
struct ModelRow {
    #[tabled(rename = "Brand")]
    brand: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Displacement (cc)")]
    engine_cc: u32,
}

impl CatalogCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let catalog = Catalog::bundled();

        match &self.brand {
            None => {
                let brands = catalog.brands(self.category);
                if brands.is_empty() {
                    anyhow::bail!("no brands in catalog for {}", self.category);
                }
                println!();
                println!("BRANDS ({})", self.category);
                for brand in brands {
                    println!("  {}", brand);
                }
                println!();
            }
            Some(brand) => {
                let rows: Vec<ModelRow> = catalog
                    .models(self.category, brand)
                    .into_iter()
                    .map(|e| ModelRow {
                        brand: e.brand.clone(),
                        model: e.model_name.clone(),
                        engine_cc: e.engine_cc,
                    })
                    .collect();
                if rows.is_empty() {
                    anyhow::bail!("no models for {} {}", brand, self.category);
                }
                let table = Table::new(rows).with(Style::rounded()).to_string();
                println!("{}", table);
            }
        }
        Ok(())
    }
}
