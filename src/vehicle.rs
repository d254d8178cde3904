//! Vehicle classification: tax categories, identity resolution and the
//! brand/model catalog.

use crate::error::EstimateError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Vehicle class used for all rate lookups.
///
/// String forms (serde and CLI) accept the canonical kebab-case names and
/// the vehicle-type aliases used by upstream forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TaxCategory {
    #[value(alias("motorcycle"))]
    TwoWheelerPetrol,
    #[value(alias("car"))]
    FourWheelerPetrol,
    #[value(alias("electric-bike"))]
    TwoWheelerElectric,
    #[value(alias("electric-car"))]
    FourWheelerElectric,
    #[value(alias("truck"), alias("micro-bus"))]
    HeavyCommercial,
}

impl TaxCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxCategory::TwoWheelerPetrol => "two-wheeler-petrol",
            TaxCategory::FourWheelerPetrol => "four-wheeler-petrol",
            TaxCategory::TwoWheelerElectric => "two-wheeler-electric",
            TaxCategory::FourWheelerElectric => "four-wheeler-electric",
            TaxCategory::HeavyCommercial => "heavy-commercial",
        }
    }

    /// Parse a category name, accepting both the canonical kebab-case names
    /// and the vehicle-type aliases used by upstream forms.
    pub fn from_alias(s: &str) -> Option<TaxCategory> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "two-wheeler-petrol" | "motorcycle" => Some(TaxCategory::TwoWheelerPetrol),
            "four-wheeler-petrol" | "car" => Some(TaxCategory::FourWheelerPetrol),
            "two-wheeler-electric" | "electric-bike" => Some(TaxCategory::TwoWheelerElectric),
            "four-wheeler-electric" | "electric-car" => Some(TaxCategory::FourWheelerElectric),
            "heavy-commercial" | "truck" | "micro-bus" => Some(TaxCategory::HeavyCommercial),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaxCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Manual impl so transport requests and CSV fixtures both go through the
// alias-aware parser instead of only the canonical kebab names.
impl<'de> serde::Deserialize<'de> for TaxCategory {
    fn deserialize<D>(deserializer: D) -> Result<TaxCategory, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TaxCategory::from_alias(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown tax category '{}'", s)))
    }
}

/// How the caller identifies the vehicle.
///
/// Catalog mode resolves brand and model against the bundled catalog.
/// Displacement mode trusts the caller-supplied category, since vehicle
/// class cannot be inferred from displacement alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleIdentity {
    ByCatalog { brand: String, model_name: String },
    ByDisplacement { engine_cc: u32, category: TaxCategory },
}

/// One catalog row.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub category: TaxCategory,
    pub brand: String,
    pub model_name: String,
    pub engine_cc: u32,
}

/// The brand/model reference catalog, loaded once and read-only thereafter.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

const CATALOG_CSV: &str = include_str!("../data/catalog.csv");

impl Catalog {
    pub fn from_csv<R: std::io::Read>(reader: R) -> Result<Catalog, csv::Error> {
        let mut rdr = csv::Reader::from_reader(reader);
        let entries: Result<Vec<CatalogEntry>, _> = rdr.deserialize().collect();
        Ok(Catalog { entries: entries? })
    }

    /// The catalog shipped with the crate.
    pub fn bundled() -> Catalog {
        Catalog::from_csv(CATALOG_CSV.as_bytes()).expect("bundled catalog is valid CSV")
    }

    /// Case-insensitive brand + model lookup.
    pub fn resolve(&self, brand: &str, model_name: &str) -> Option<(TaxCategory, u32)> {
        self.entries
            .iter()
            .find(|e| {
                e.brand.eq_ignore_ascii_case(brand) && e.model_name.eq_ignore_ascii_case(model_name)
            })
            .map(|e| (e.category, e.engine_cc))
    }

    /// Distinct brands for a category, sorted.
    pub fn brands(&self, category: TaxCategory) -> Vec<String> {
        let mut brands: Vec<String> = self
            .entries
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.brand.clone())
            .collect();
        brands.sort();
        brands.dedup();
        brands
    }

    /// Models for a brand within a category, sorted by model name.
    pub fn models(&self, category: TaxCategory, brand: &str) -> Vec<&CatalogEntry> {
        let mut models: Vec<&CatalogEntry> = self
            .entries
            .iter()
            .filter(|e| e.category == category && e.brand.eq_ignore_ascii_case(brand))
            .collect();
        models.sort_by(|a, b| a.model_name.cmp(&b.model_name));
        models
    }
}

/// Resolve an identity to the `(category, engine_cc)` pair used for all
/// downstream rate lookups.
pub fn classify(
    catalog: &Catalog,
    identity: &VehicleIdentity,
) -> Result<(TaxCategory, u32), EstimateError> {
    match identity {
        VehicleIdentity::ByCatalog { brand, model_name } => catalog
            .resolve(brand, model_name)
            .ok_or_else(|| EstimateError::VehicleNotFound {
                brand: brand.clone(),
                model_name: model_name.clone(),
            }),
        VehicleIdentity::ByDisplacement {
            engine_cc,
            category,
        } => {
            if *engine_cc == 0 {
                return Err(EstimateError::InvalidInput(
                    "engine displacement must be a positive integer".to_string(),
                ));
            }
            Ok((*category, *engine_cc))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_aliases() {
        assert_eq!(
            TaxCategory::from_alias("motorcycle"),
            Some(TaxCategory::TwoWheelerPetrol)
        );
        assert_eq!(
            TaxCategory::from_alias("electric_bike"),
            Some(TaxCategory::TwoWheelerElectric)
        );
        assert_eq!(
            TaxCategory::from_alias("micro_bus"),
            Some(TaxCategory::HeavyCommercial)
        );
        assert_eq!(
            TaxCategory::from_alias("truck"),
            Some(TaxCategory::HeavyCommercial)
        );
        assert_eq!(
            TaxCategory::from_alias("four-wheeler-petrol"),
            Some(TaxCategory::FourWheelerPetrol)
        );
        assert_eq!(TaxCategory::from_alias("spaceship"), None);
    }

    #[test]
    fn category_deserializes_from_alias() {
        let c: TaxCategory = serde_json::from_str("\"motorcycle\"").unwrap();
        assert_eq!(c, TaxCategory::TwoWheelerPetrol);
        let c: TaxCategory = serde_json::from_str("\"two-wheeler-petrol\"").unwrap();
        assert_eq!(c, TaxCategory::TwoWheelerPetrol);
        assert!(serde_json::from_str::<TaxCategory>("\"spaceship\"").is_err());
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let catalog = Catalog::bundled();
        let (category, cc) = catalog.resolve("bajaj", "PULSAR 150").unwrap();
        assert_eq!(category, TaxCategory::TwoWheelerPetrol);
        assert_eq!(cc, 149);
    }

    #[test]
    fn classify_unknown_vehicle() {
        let catalog = Catalog::bundled();
        let identity = VehicleIdentity::ByCatalog {
            brand: "Yamaha".to_string(),
            model_name: "No Such Model".to_string(),
        };
        assert_eq!(
            classify(&catalog, &identity),
            Err(EstimateError::VehicleNotFound {
                brand: "Yamaha".to_string(),
                model_name: "No Such Model".to_string(),
            })
        );
    }

    #[test]
    fn classify_by_displacement_trusts_category() {
        let catalog = Catalog::bundled();
        let identity = VehicleIdentity::ByDisplacement {
            engine_cc: 1497,
            category: TaxCategory::FourWheelerPetrol,
        };
        assert_eq!(
            classify(&catalog, &identity),
            Ok((TaxCategory::FourWheelerPetrol, 1497))
        );
    }

    #[test]
    fn classify_rejects_zero_displacement() {
        let catalog = Catalog::bundled();
        let identity = VehicleIdentity::ByDisplacement {
            engine_cc: 0,
            category: TaxCategory::TwoWheelerPetrol,
        };
        assert!(matches!(
            classify(&catalog, &identity),
            Err(EstimateError::InvalidInput(_))
        ));
    }

    #[test]
    fn brands_sorted_and_distinct() {
        let catalog = Catalog::bundled();
        let brands = catalog.brands(TaxCategory::TwoWheelerPetrol);
        let mut sorted = brands.clone();
        sorted.sort();
        assert_eq!(brands, sorted);
        assert!(brands.contains(&"Honda".to_string()));
        assert_eq!(
            brands.iter().filter(|b| b.as_str() == "Honda").count(),
            1,
            "brands must be distinct"
        );
    }
}
