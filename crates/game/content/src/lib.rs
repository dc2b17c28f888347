//! Data-driven arena content and loaders.
//!
//! This crate houses static content and provides loaders for RON/TOML files:
//! - Power catalog with rarity tiers (RON)
//! - Game rule table (TOML)
//!
//! Content is consumed by runtime oracles and never appears in battle state.
//! A default catalog and rule table are embedded so a server can start
//! without a data directory.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogData, CatalogLoader, ConfigLoader, ContentFactory, LoadResult};
