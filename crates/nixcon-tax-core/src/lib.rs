pub mod catalog;
pub mod engine;
pub mod error;
pub mod parse;
pub mod rates;
pub mod simulation;
pub mod types;

pub use error::NixconTaxError;
pub use types::*;

/// Standard result type for all tax-engine operations
pub type NixconTaxResult<T> = Result<T, NixconTaxError>;
