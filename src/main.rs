use clap::{Parser, Subcommand};

mod cmd;

use cmd::catalog::CatalogCommand;
use cmd::estimate::EstimateCommand;
use cmd::rates::RatesCommand;
use cmd::schema::SchemaCommand;

/// Vehicle tax renewal estimator for Bikram Sambat registered vehicles
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate the renewal bill for a vehicle
    Estimate(EstimateCommand),
    /// Show the tax and insurance brackets for a category
    Rates(RatesCommand),
    /// List the brands and models known for a category
    Catalog(CatalogCommand),
    /// Print the request/result JSON shapes
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    match &cli.command {
        Command::Estimate(cmd) => cmd.exec(),
        Command::Rates(cmd) => cmd.exec(),
        Command::Catalog(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
