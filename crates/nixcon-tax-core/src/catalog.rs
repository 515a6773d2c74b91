use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::parse;
use crate::types::{Money, Quantity, Rate, TaxKind};

/// Markup applied when a catalog product is priced into a simulation:
/// sale price = registered cost * 1.3.
pub const DEFAULT_MARKUP: Decimal = dec!(1.3);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A product as registered in the company catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "parse::lenient_decimal")]
    pub unit_cost: Money,
    /// Per-product rates, stored as fractions (already divided by 100).
    #[serde(
        default,
        deserialize_with = "parse::lenient_opt_rate_map",
        skip_serializing_if = "Option::is_none"
    )]
    pub fiscal_config: Option<BTreeMap<TaxKind, Rate>>,
}

/// One product or service line inside a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "parse::lenient_decimal")]
    pub quantity: Quantity,
    #[serde(default, deserialize_with = "parse::lenient_decimal")]
    pub unit_sale_price: Money,
    #[serde(default, deserialize_with = "parse::lenient_decimal")]
    pub unit_cost: Money,
    #[serde(default, deserialize_with = "parse::lenient_decimal")]
    pub line_total: Money,
    #[serde(
        default,
        deserialize_with = "parse::lenient_opt_rate_map",
        skip_serializing_if = "Option::is_none"
    )]
    pub fiscal_config: Option<BTreeMap<TaxKind, Rate>>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

impl LineItem {
    /// Price a catalog product into a simulation line at the default markup.
    pub fn from_product(product: &Product, quantity: Quantity) -> Self {
        let unit_sale_price = product.unit_cost * DEFAULT_MARKUP;
        LineItem {
            product_id: product.id.clone(),
            description: product.description.clone(),
            quantity,
            unit_sale_price,
            unit_cost: product.unit_cost,
            line_total: quantity * unit_sale_price,
            fiscal_config: product.fiscal_config.clone(),
        }
    }

    /// Revenue this line generates before any redistribution.
    pub fn natural_revenue(&self) -> Money {
        self.quantity * self.unit_sale_price
    }

    /// Acquisition cost carried by this line.
    pub fn cost_basis(&self) -> Money {
        self.quantity * self.unit_cost
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
