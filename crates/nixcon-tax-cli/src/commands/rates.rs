use clap::Args;
use serde_json::Value;

use nixcon_tax_core::rates::{self, RateResolutionInput};

use crate::input;

/// Arguments for inspecting resolved tax rates
#[derive(Args)]
pub struct RatesArgs {
    /// Path to JSON or YAML input file (context + optional fiscal config)
    #[arg(long)]
    pub input: Option<String>,

    /// Print the first-use calculator rate profile instead of resolving
    #[arg(long)]
    pub seed: bool,
}

pub fn run_rates(args: RatesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.seed {
        return Ok(serde_json::to_value(rates::seed_user_tax_config())?);
    }

    let request: RateResolutionInput = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file or piped stdin is required for rates (or pass --seed)".into());
    };

    let resolved = rates::resolve_all(request.fiscal_config.as_ref(), &request.context);
    Ok(serde_json::to_value(resolved)?)
}
