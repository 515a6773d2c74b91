//! Permissive numeric parsing used at every input boundary.
//!
//! The host product never rejects malformed numeric input: a quantity,
//! price, or rate that does not parse is treated as zero. Every field
//! that crosses into the engine goes through these helpers so the policy
//! stays uniform.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::types::{Rate, TaxKind};

// ---------------------------------------------------------------------------
// Parse-or-zero primitives
// ---------------------------------------------------------------------------

/// Attempt to parse a decimal, accepting plain and scientific notation.
/// Returns None rather than an error; callers decide the fallback.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .ok()
        .or_else(|| Decimal::from_scientific(trimmed).ok())
}

/// Parse a decimal or coerce to zero. The engine-wide policy for every
/// malformed or missing numeric field.
pub fn decimal_or_zero(raw: &str) -> Decimal {
    parse_decimal(raw).unwrap_or(Decimal::ZERO)
}

/// Coerce an arbitrary JSON value to a decimal: numbers and numeric
/// strings parse, everything else is zero.
pub fn coerce_decimal(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => decimal_or_zero(&n.to_string()),
        Value::String(s) => decimal_or_zero(s),
        _ => Decimal::ZERO,
    }
}

// ---------------------------------------------------------------------------
// Serde adapters
// ---------------------------------------------------------------------------

/// Deserialize a decimal field leniently: number or numeric string parse,
/// anything else (null, junk text, wrong type) becomes zero.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_decimal(&value))
}

/// Deserialize an optional decimal: null stays None, present values go
/// through the lenient coercion.
pub fn lenient_opt_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        other => Ok(Some(coerce_decimal(&other))),
    }
}

/// Deserialize a fiscal-config map whose values are fractions. Unknown
/// keys are ignored (the host product only ever reads the six known tax
/// names); values coerce leniently. Anything that is not a JSON object
/// (null, absent via default, junk) is None.
pub fn lenient_opt_rate_map<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<TaxKind, Rate>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Object(map) => Ok(Some(coerce_rate_map(&map))),
        _ => Ok(None),
    }
}

/// Deserialize a percentage-string config map (user-level and company
/// default configs store rates as strings like "18" or "7.60"). Numbers
/// are kept as their string form; other value types become the empty
/// string, which later parses to zero.
pub fn lenient_opt_string_map<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<TaxKind, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Object(map) => {
            let mut out = BTreeMap::new();
            for (key, value) in &map {
                if let Some(kind) = kind_for_key(key) {
                    out.insert(kind, coerce_string(value));
                }
            }
            Ok(Some(out))
        }
        _ => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn kind_for_key(key: &str) -> Option<TaxKind> {
    TaxKind::ALL.into_iter().find(|kind| kind.key() == key)
}

fn coerce_rate_map(map: &serde_json::Map<String, Value>) -> BTreeMap<TaxKind, Rate> {
    let mut rates = BTreeMap::new();
    for (key, value) in map {
        if let Some(kind) = kind_for_key(key) {
            rates.insert(kind, coerce_decimal(value));
        }
    }
    rates
}

fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
