//! Runtime wrappers around static arena content.
//!
//! The catalog is immutable at runtime; balances, queues, battles and
//! inventories live in repositories.
mod catalog;

pub use catalog::CatalogOracleImpl;
