use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::Args;
use serde_json::Value;

use nixcon_tax_core::engine::{self, SimulationInput};
use nixcon_tax_core::simulation::Simulation;

use crate::input;
use crate::store::SimulationStore;

/// Arguments for computing and persisting a simulation
#[derive(Args)]
pub struct SaveArgs {
    /// Path to JSON or YAML input file (items + context)
    #[arg(long)]
    pub input: Option<String>,

    /// Client name recorded on the simulation
    #[arg(long)]
    pub client: String,

    /// Simulation date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Company the simulation belongs to
    #[arg(long)]
    pub company_id: Option<String>,

    /// Store file location (defaults to ~/.nixcon/simulations.json)
    #[arg(long)]
    pub store: Option<PathBuf>,
}

/// Arguments for listing stored simulations
#[derive(Args)]
pub struct ListArgs {
    /// Store file location (defaults to ~/.nixcon/simulations.json)
    #[arg(long)]
    pub store: Option<PathBuf>,
}

/// Arguments for deleting a stored simulation
#[derive(Args)]
pub struct DeleteArgs {
    /// Id of the simulation to delete
    #[arg(long)]
    pub id: String,

    /// Store file location (defaults to ~/.nixcon/simulations.json)
    #[arg(long)]
    pub store: Option<PathBuf>,
}

fn open_store(path: Option<PathBuf>) -> SimulationStore {
    match path {
        Some(path) => SimulationStore::with_path(path),
        None => SimulationStore::open_default(),
    }
}

pub fn run_save(args: SaveArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sim_input: SimulationInput = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file or piped stdin is required for save".into());
    };

    let report = engine::simulate(&sim_input);
    let record = Simulation::from_outcome(
        args.date.unwrap_or_else(|| Utc::now().date_naive()),
        args.client,
        report.result,
        sim_input.global_sale_value,
        args.company_id,
    )?;

    let saved = open_store(args.store).save(record)?;
    Ok(serde_json::to_value(saved)?)
}

pub fn run_list(args: ListArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let simulations = open_store(args.store).list()?;
    Ok(serde_json::to_value(simulations)?)
}

pub fn run_delete(args: DeleteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let store = open_store(args.store);
    let deleted = store.delete(&args.id)?;
    Ok(serde_json::json!({ "id": args.id, "deleted": deleted }))
}
