pub mod catalog;
pub mod rates;
pub mod simulate;
pub mod store_ops;
