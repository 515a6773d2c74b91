mod commands;
mod input;
mod output;
mod store;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::catalog::PriceProductArgs;
use commands::rates::RatesArgs;
use commands::simulate::SimulateArgs;
use commands::store_ops::{DeleteArgs, ListArgs, SaveArgs};

/// Brazilian sale-tax simulations with decimal precision
#[derive(Parser)]
#[command(
    name = "nixtax",
    version,
    about = "Brazilian sale-tax simulations with decimal precision",
    long_about = "A CLI for simulating the tax burden and profitability of a prospective \
                  sale under Brazilian rules (ICMS, PIS, COFINS, IPI, ISS or the Simples \
                  Nacional single rate), with multi-level rate resolution, revenue \
                  redistribution, and a local simulation store."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a sale simulation
    Simulate(SimulateArgs),
    /// Price a catalog product into a sale line item (default markup)
    PriceProduct(PriceProductArgs),
    /// Resolve the six effective tax rates for a context
    Rates(RatesArgs),
    /// Compute a simulation and persist it to the store
    Save(SaveArgs),
    /// List stored simulations
    List(ListArgs),
    /// Delete a stored simulation by id
    Delete(DeleteArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::PriceProduct(args) => commands::catalog::run_price_product(args),
        Commands::Rates(args) => commands::rates::run_rates(args),
        Commands::Save(args) => commands::store_ops::run_save(args),
        Commands::List(args) => commands::store_ops::run_list(args),
        Commands::Delete(args) => commands::store_ops::run_delete(args),
        Commands::Version => {
            println!("nixtax {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
