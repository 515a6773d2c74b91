use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::parse::{self, decimal_or_zero, parse_decimal};
use crate::types::{Rate, TaxKind};

/// Regime string the tax engine matches literally. Companies registered
/// under any other spelling are taxed itemized.
pub const SIMPLES_NACIONAL_REGIME: &str = "Simples Nacional";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Platform roles that affect rate resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    /// Accounting-office user managing client companies.
    #[default]
    #[serde(rename = "escritorio")]
    Escritorio,
    /// Company user operating inside their own company.
    #[serde(rename = "empresa")]
    Empresa,
    /// Calculator-only user with a personal rate profile.
    #[serde(rename = "calculadora")]
    Calculadora,
}

/// The slice of a company record the engine reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_regime: Option<String>,
    /// Company-wide fallback rates, stored as percentage strings ("18" = 18%).
    #[serde(
        default,
        deserialize_with = "parse::lenient_opt_string_map",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_fiscal_config: Option<BTreeMap<TaxKind, String>>,
}

impl CompanyProfile {
    /// Whether this company is registered under the Simples Nacional regime.
    pub fn is_simples_nacional(&self) -> bool {
        self.tax_regime.as_deref() == Some(SIMPLES_NACIONAL_REGIME)
    }
}

/// Everything rate resolution needs to know about who is simulating.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationContext {
    #[serde(default)]
    pub user_type: UserType,
    /// Office users browsing on behalf of a selected company.
    #[serde(default)]
    pub acting_as_company: bool,
    /// Personal rate profile, stored as percentage strings. Only read for
    /// calculator users.
    #[serde(
        default,
        deserialize_with = "parse::lenient_opt_string_map",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_tax_config: Option<BTreeMap<TaxKind, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyProfile>,
}

impl SimulationContext {
    /// Whether tax aggregation follows the company regime rather than the
    /// personal profile.
    pub fn company_scoped(&self) -> bool {
        self.user_type == UserType::Empresa || self.acting_as_company
    }
}

/// Wire shape for a standalone rate-resolution request: a context plus an
/// optional item fiscal config to resolve against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateResolutionInput {
    #[serde(default)]
    pub context: SimulationContext,
    #[serde(
        default,
        deserialize_with = "parse::lenient_opt_rate_map",
        skip_serializing_if = "Option::is_none"
    )]
    pub fiscal_config: Option<BTreeMap<TaxKind, Rate>>,
}

// ---------------------------------------------------------------------------
// Seed configuration
// ---------------------------------------------------------------------------

/// First-use rate profile for calculator users, as percentage strings.
/// Persisted per user after the first session.
pub fn seed_user_tax_config() -> BTreeMap<TaxKind, String> {
    BTreeMap::from([
        (TaxKind::Icms, "18".to_string()),
        (TaxKind::Ipi, "5".to_string()),
        (TaxKind::Pis, "1.65".to_string()),
        (TaxKind::Cofins, "7.60".to_string()),
        (TaxKind::Iss, "5".to_string()),
        (TaxKind::SimplesNacional, "6".to_string()),
    ])
}

// ---------------------------------------------------------------------------
// Unit conversion
// ---------------------------------------------------------------------------

// User and company configs store percentages; product fiscal configs store
// fractions. The two paths are kept separate on purpose: unifying them
// would change computed tax for existing data.

/// "18" means 18%, so divide by 100.
fn percent_to_fraction(percent: Decimal) -> Rate {
    percent / dec!(100)
}

/// 0.18 already means 18%; used as-is.
fn fraction_direct(rate: Rate) -> Rate {
    rate
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Resolve one tax rate for an item, first match wins:
///
/// 1. calculator user's own config, when the entry parses numerically
///    (percentage);
/// 2. the item's fiscal config (fraction, used directly);
/// 3. the company default config (percentage, parse-or-zero);
/// 4. zero.
pub fn resolve_rate(
    item_config: Option<&BTreeMap<TaxKind, Rate>>,
    kind: TaxKind,
    ctx: &SimulationContext,
) -> Rate {
    if ctx.user_type == UserType::Calculadora {
        if let Some(config) = &ctx.user_tax_config {
            if let Some(raw) = config.get(&kind) {
                // Non-numeric entries fall through to the next source.
                if let Some(percent) = parse_decimal(raw) {
                    return percent_to_fraction(percent);
                }
            }
        }
    }

    if let Some(config) = item_config {
        if let Some(rate) = config.get(&kind) {
            return fraction_direct(*rate);
        }
    }

    if let Some(company) = &ctx.company {
        if let Some(config) = &company.default_fiscal_config {
            if let Some(raw) = config.get(&kind) {
                return percent_to_fraction(decimal_or_zero(raw));
            }
        }
    }

    Rate::ZERO
}

/// Resolve all six taxes at once. Each tax is resolved independently;
/// different taxes may come from different sources.
pub fn resolve_all(
    item_config: Option<&BTreeMap<TaxKind, Rate>>,
    ctx: &SimulationContext,
) -> BTreeMap<TaxKind, Rate> {
    TaxKind::ALL
        .into_iter()
        .map(|kind| (kind, resolve_rate(item_config, kind, ctx)))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
