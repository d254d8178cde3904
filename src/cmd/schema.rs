//! Schema command - print the request/result JSON shapes

use beema::{CalculationRequest, CalculationResult};
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Which shape to print
    #[arg(value_enum, default_value = "request")]
    shape: SchemaShape,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaShape {
    /// JSON Schema for the calculation request
    Request,
    /// JSON Schema for the calculation result
    Result,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let schema = match self.shape {
            SchemaShape::Request => schema_for!(CalculationRequest),
            SchemaShape::Result => schema_for!(CalculationResult),
        };
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }
}
