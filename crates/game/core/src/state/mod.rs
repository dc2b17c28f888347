//! Authoritative arena state representation.
//!
//! This module owns the records the rules operate on: players, battles and
//! their per-side combatant windows. Runtime layers load these from storage,
//! hand them to the rule functions, and write back whatever changed.
mod battle;
mod common;
mod player;

pub use battle::{Battle, BattleStatus, Combatant, Side};
pub use common::{BattleId, PowerId, RarityId, Timestamp, UserId};
pub use player::PlayerRecord;
