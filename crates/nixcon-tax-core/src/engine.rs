use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::catalog::LineItem;
use crate::parse::{self, parse_decimal};
use crate::rates::{resolve_rate, CompanyProfile, SimulationContext, UserType};
use crate::types::*;

/// Flat purchase-side tax charged on total product cost.
const PURCHASE_TAX_RATE: Decimal = dec!(0.05);

/// Flat inter-state rate differential (DIFAL) charged on final revenue.
const DIFAL_RATE: Decimal = dec!(0.02);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInput {
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Target total for the sale. Positive values redistribute revenue
    /// across items; zero, negative, or absent values are ignored.
    #[serde(
        default,
        deserialize_with = "parse::lenient_opt_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub global_sale_value: Option<Money>,
    #[serde(default)]
    pub context: SimulationContext,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub total_revenue: Money,
    pub total_product_cost: Money,
    pub sales_taxes: Money,
    pub purchase_taxes: Money,
    pub difal: Money,
    pub gross_profit: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub items: Vec<LineItem>,
    /// Absent when the simulation had no items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SimulationSummary>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run a sale simulation: redistribute revenue against the global sale
/// value when one is set, resolve and apply tax rates per item, and build
/// the profitability summary.
///
/// The computation never fails; malformed numeric input has already been
/// coerced to zero at the parse boundary, and an empty item list returns
/// an outcome without a summary.
pub fn simulate(input: &SimulationInput) -> TaxReport<SimulationOutcome> {
    let start = Instant::now();
    let mut warnings = config_warnings(&input.context);

    let assumptions = serde_json::json!({
        "purchase_tax_rate": PURCHASE_TAX_RATE.to_string(),
        "difal_rate": DIFAL_RATE.to_string(),
        "ipi_basis": "cost",
        "rate_priority": "user config > product config > company default",
        "item_count": input.items.len(),
    });

    if input.items.is_empty() {
        let outcome = SimulationOutcome {
            items: Vec::new(),
            summary: None,
        };
        let elapsed = start.elapsed().as_micros() as u64;
        return with_metadata(METHODOLOGY, &assumptions, warnings, elapsed, outcome);
    }

    // -- Step 1: revenue redistribution --------------------------------------
    let mut items = input.items.clone();
    let items_revenue: Money = items.iter().map(LineItem::natural_revenue).sum();
    let override_value = input.global_sale_value.unwrap_or(Decimal::ZERO);

    let final_revenue = if override_value > Decimal::ZERO && items_revenue > Decimal::ZERO {
        let factor = override_value / items_revenue;
        for item in &mut items {
            item.line_total = item.natural_revenue() * factor;
            // Quantity floor of 1 keeps zero-quantity lines at a sane price.
            item.unit_sale_price = item.line_total / item.quantity.max(Decimal::ONE);
        }
        // Downstream figures use the override itself, not the re-summed
        // redistributed totals.
        override_value
    } else {
        if override_value > Decimal::ZERO {
            warnings
                .push("Global sale value ignored: items carry no revenue to redistribute.".into());
        }
        for item in &mut items {
            item.line_total = item.natural_revenue();
        }
        items_revenue
    };

    // -- Steps 2-3: rate resolution and tax accumulation ----------------------
    let simples_company = input.context.company_scoped()
        && input
            .context
            .company
            .as_ref()
            .is_some_and(CompanyProfile::is_simples_nacional);

    let mut total_product_cost = Decimal::ZERO;
    let mut sales_taxes = Decimal::ZERO;
    let mut simples_fallback = false;

    for item in &items {
        total_product_cost += item.cost_basis();

        let config = item.fiscal_config.as_ref();
        let simples_rate = resolve_rate(config, TaxKind::SimplesNacional, &input.context);

        let item_sales_tax = if simples_company && simples_rate > Decimal::ZERO {
            // Simples Nacional replaces itemized taxation entirely.
            item.line_total * simples_rate
        } else {
            if simples_company {
                simples_fallback = true;
            }
            let icms = resolve_rate(config, TaxKind::Icms, &input.context);
            let pis = resolve_rate(config, TaxKind::Pis, &input.context);
            let cofins = resolve_rate(config, TaxKind::Cofins, &input.context);
            let iss = resolve_rate(config, TaxKind::Iss, &input.context);
            let ipi = resolve_rate(config, TaxKind::Ipi, &input.context);

            // IPI applies at the acquisition stage, so it is charged on
            // cost, not on revenue.
            item.line_total * (icms + pis + cofins + iss) + item.cost_basis() * ipi
        };

        sales_taxes += item_sales_tax;
    }

    if simples_fallback {
        warnings.push(
            "Company is under Simples Nacional but no simples rate resolved; itemized rates applied."
                .into(),
        );
    }

    // -- Step 4: downstream aggregates ----------------------------------------
    let purchase_taxes = total_product_cost * PURCHASE_TAX_RATE;
    let difal = final_revenue * DIFAL_RATE;
    let gross_profit = final_revenue - total_product_cost - sales_taxes - purchase_taxes - difal;

    let summary = SimulationSummary {
        total_revenue: final_revenue,
        total_product_cost,
        sales_taxes,
        purchase_taxes,
        difal,
        gross_profit,
    };

    let outcome = SimulationOutcome {
        items,
        summary: Some(summary),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(METHODOLOGY, &assumptions, warnings, elapsed, outcome)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

const METHODOLOGY: &str =
    "Sale simulation with proportional revenue redistribution and priority-ordered rate resolution";

/// Flag configured rate strings that will not parse. These do not change
/// any number (the parse-or-zero policy already decided that); they only
/// surface the coercion.
fn config_warnings(ctx: &SimulationContext) -> Vec<String> {
    let mut warnings = Vec::new();

    if ctx.user_type == UserType::Calculadora {
        if let Some(config) = &ctx.user_tax_config {
            for (kind, raw) in config {
                if parse_decimal(raw).is_none() {
                    warnings.push(format!(
                        "User rate for {kind} is not numeric; lower-priority sources apply."
                    ));
                }
            }
        }
    }

    if let Some(company) = &ctx.company {
        if let Some(config) = &company.default_fiscal_config {
            for (kind, raw) in config {
                if parse_decimal(raw).is_none() {
                    warnings.push(format!(
                        "Company default rate for {kind} is not numeric; treated as zero."
                    ));
                }
            }
        }
    }

    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
