use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use nixcon_tax_core::engine::{self, SimulationInput};

use crate::input;

/// Arguments for running a sale simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to JSON or YAML input file (items + context)
    #[arg(long)]
    pub input: Option<String>,

    /// Override the global sale value from the input
    #[arg(long)]
    pub global_sale_value: Option<Decimal>,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut sim_input: SimulationInput = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file or piped stdin is required for simulate".into());
    };

    if args.global_sale_value.is_some() {
        sim_input.global_sale_value = args.global_sale_value;
    }

    let report = engine::simulate(&sim_input);
    Ok(serde_json::to_value(report)?)
}
