use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Decimal end to end; f64 never touches money.
pub type Money = Decimal;

/// Rates expressed as fractions (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Item quantities. Fractional quantities are allowed (e.g. service hours).
pub type Quantity = Decimal;

/// The tax categories a simulation resolves, one rate each.
///
/// Wire names match the fiscal-config keys used by the host product
/// (`icms`, `pis`, ... `simplesNacionalRate`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaxKind {
    #[serde(rename = "icms")]
    Icms,
    #[serde(rename = "pis")]
    Pis,
    #[serde(rename = "cofins")]
    Cofins,
    #[serde(rename = "ipi")]
    Ipi,
    #[serde(rename = "iss")]
    Iss,
    #[serde(rename = "simplesNacionalRate")]
    SimplesNacional,
}

impl TaxKind {
    /// Every resolvable tax, in fiscal-config key order.
    pub const ALL: [TaxKind; 6] = [
        TaxKind::Icms,
        TaxKind::Pis,
        TaxKind::Cofins,
        TaxKind::Ipi,
        TaxKind::Iss,
        TaxKind::SimplesNacional,
    ];

    /// The fiscal-config key for this tax.
    pub fn key(&self) -> &'static str {
        match self {
            TaxKind::Icms => "icms",
            TaxKind::Pis => "pis",
            TaxKind::Cofins => "cofins",
            TaxKind::Ipi => "ipi",
            TaxKind::Iss => "iss",
            TaxKind::SimplesNacional => "simplesNacionalRate",
        }
    }
}

impl std::fmt::Display for TaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Output envelope shared by every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxReport<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ReportMetadata,
}

/// Metadata attached to every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Wrap a computed result in the standard envelope
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> TaxReport<T> {
    TaxReport {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ReportMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
