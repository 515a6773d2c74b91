use thiserror::Error;

#[derive(Debug, Error)]
pub enum NixconTaxError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Simulation must contain at least one item")]
    EmptySimulation,

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for NixconTaxError {
    fn from(e: serde_json::Error) -> Self {
        NixconTaxError::SerializationError(e.to_string())
    }
}
