use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_sale(input_json: String) -> NapiResult<String> {
    let input: nixcon_tax_core::engine::SimulationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = nixcon_tax_core::engine::simulate(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Rates
// ---------------------------------------------------------------------------

#[napi]
pub fn resolve_rates(input_json: String) -> NapiResult<String> {
    let input: nixcon_tax_core::rates::RateResolutionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = nixcon_tax_core::rates::resolve_all(input.fiscal_config.as_ref(), &input.context);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn seed_tax_config() -> NapiResult<String> {
    let seed = nixcon_tax_core::rates::seed_user_tax_config();
    serde_json::to_string(&seed).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceProductBindingInput {
    product: nixcon_tax_core::catalog::Product,
    #[serde(default, deserialize_with = "nixcon_tax_core::parse::lenient_opt_decimal")]
    quantity: Option<rust_decimal::Decimal>,
}

#[napi]
pub fn price_product(input_json: String) -> NapiResult<String> {
    let binding_input: PriceProductBindingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let quantity = binding_input.quantity.unwrap_or(rust_decimal::Decimal::ONE);
    let output = nixcon_tax_core::catalog::LineItem::from_product(&binding_input.product, quantity);
    serde_json::to_string(&output).map_err(to_napi_error)
}
