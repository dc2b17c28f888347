//! Deterministic battle rules shared by the arena runtime and tools.
//!
//! `arena-core` defines the canonical rules (battle resolution, power effects,
//! cooldown gating, queue pairing, spin draws, loadouts) as pure functions over
//! plain data. Nothing here touches storage, clocks, or randomness: the caller
//! supplies `now` and dice rolls, and persists whatever the rules mutate.
pub mod catalog;
pub mod combat;
pub mod config;
pub mod error;
pub mod loadout;
pub mod matchmaking;
pub mod spin;
pub mod state;

pub use catalog::{PowerCatalog, PowerDefinition, PowerType, Rarity};
pub use combat::{
    AttackOutcome, AttackReport, BattleEnd, BattleError, CooldownKey, PowerEffect, apply_power,
    check_termination, resolve_attack,
};
pub use config::GameConfig;
pub use error::{ErrorSeverity, GameError};
pub use loadout::{EquipSlot, LoadoutError, UserPower};
pub use matchmaking::QueueEntry;
pub use spin::SpinCandidate;
pub use state::{
    Battle, BattleId, BattleStatus, Combatant, PlayerRecord, PowerId, RarityId, Side, Timestamp,
    UserId,
};
