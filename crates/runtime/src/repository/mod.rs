//! Repository layer for dynamic arena data
//!
//! Repositories handle data that CHANGES during play:
//! - Users (balances and records)
//! - Matchmaking queue
//! - Battles and per-battle cooldowns
//! - Inventories and loadouts
//!
//! Static content (powers, rarities) is handled by Oracles, not Repositories.

mod error;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use memory::InMemoryStore;
pub use traits::{
    ArenaStore, BattleRepository, CooldownRepository, InventoryRepository, QueueRepository,
    Transaction, UserRepository,
};
