use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::LineItem;
use crate::engine::{SimulationOutcome, SimulationSummary};
use crate::error::NixconTaxError;
use crate::parse;
use crate::types::Money;
use crate::NixconTaxResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A saved simulation. The summary is a snapshot taken at save time; the
/// engine recomputes it from the items whenever the record is reopened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Simulation {
    /// Assigned by the store on first save; stable afterwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub client_name: String,
    pub items: Vec<LineItem>,
    #[serde(
        default,
        deserialize_with = "parse::lenient_opt_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub global_sale_value: Option<Money>,
    /// The company this simulation was computed under, when any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    pub summary: SimulationSummary,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

impl Simulation {
    /// Turn a computed outcome into a persistable record. A simulation
    /// without items has nothing to save and is rejected.
    pub fn from_outcome(
        date: NaiveDate,
        client_name: impl Into<String>,
        outcome: SimulationOutcome,
        global_sale_value: Option<Money>,
        company_id: Option<String>,
    ) -> NixconTaxResult<Self> {
        let summary = match (outcome.items.is_empty(), outcome.summary) {
            (false, Some(summary)) => summary,
            _ => return Err(NixconTaxError::EmptySimulation),
        };

        Ok(Simulation {
            id: None,
            date,
            client_name: client_name.into(),
            items: outcome.items,
            global_sale_value,
            company_id,
            summary,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
