use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use nixcon_tax_core::catalog::{LineItem, Product};

use crate::input;

/// Arguments for pricing a catalog product into a sale line item
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PriceProductArgs {
    /// Path to JSON input file (a catalog product; overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Product id
    #[arg(long, default_value = "manual")]
    pub id: String,

    /// Product description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Unit acquisition cost
    #[arg(long)]
    pub unit_cost: Option<Decimal>,

    /// Quantity to price
    #[arg(long, default_value = "1")]
    pub quantity: Decimal,
}

pub fn run_price_product(args: PriceProductArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let product: Product = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        Product {
            id: args.id,
            description: args.description,
            unit_cost: args
                .unit_cost
                .ok_or("--unit-cost is required (or provide --input)")?,
            fiscal_config: None,
        }
    };

    let item = LineItem::from_product(&product, args.quantity);
    Ok(serde_json::to_value(item)?)
}
